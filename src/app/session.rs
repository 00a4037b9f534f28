use crate::config::toml_config::TomlConfig;
use crate::core::animation::{run_draw_animation, DrawAnimation, Frame};
use crate::core::app_state::{AppState, Debouncer};
use crate::core::draw_engine::DrawEngine;
use crate::core::export::{export_filename, groups_to_csv};
use crate::core::grouping::GroupingEngine;
use crate::core::{DrawSettings, FrameScheduler, Group, Participant, Screen, Storage};
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_group_size, NAME_LIST_EXTENSIONS};
use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Result of one grouping run.
#[derive(Debug, Clone, Serialize)]
pub struct GroupingReport {
    pub groups: Vec<Group>,
    pub csv_path: Option<String>,
}

/// Ties configuration and storage to the three screens.
pub struct HrSession<S: Storage> {
    storage: S,
    config: TomlConfig,
    state: AppState,
    debouncer: Debouncer,
}

impl<S: Storage> HrSession<S> {
    pub fn new(storage: S, config: TomlConfig) -> Self {
        let debouncer = Debouncer::new(config.debounce());
        Self {
            storage,
            config,
            state: AppState::new(),
            debouncer,
        }
    }

    pub fn config(&self) -> &TomlConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn load_text(&mut self, text: &str) -> &AppState {
        // 匯出的 CSV 帶 BOM，重新匯入時去掉
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let state = std::mem::take(&mut self.state);
        self.state = state.with_source_text(text);
        tracing::info!("Loaded {} participants", self.state.participant_count());
        &self.state
    }

    /// 編輯中的全文先暫存，安靜超過 `[input] debounce_ms` 才重新解析
    pub fn edit_text(&mut self, text: impl Into<String>, now: Instant) {
        self.debouncer.edit(text, now);
    }

    pub fn has_pending_edit(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn poll_edit(&mut self, now: Instant) -> Option<&AppState> {
        let text = self.debouncer.poll(now)?;
        Some(self.load_text(&text))
    }

    /// 輸入結束時立即套用最後一次編輯
    pub fn commit_edit(&mut self) -> &AppState {
        if let Some(text) = self.debouncer.flush() {
            self.load_text(&text);
        }
        &self.state
    }

    pub async fn load_file(&mut self, path: &str) -> Result<&AppState> {
        validate_file_extensions("input", &[path.to_string()], NAME_LIST_EXTENSIONS)?;
        let bytes = self.storage.read_file(path).await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(self.load_text(&text))
    }

    pub fn dedupe(&mut self) -> &AppState {
        let state = std::mem::take(&mut self.state);
        self.state = state.without_duplicates();
        &self.state
    }

    pub fn show(&mut self, screen: Screen) {
        let state = std::mem::take(&mut self.state);
        self.state = state.with_screen(screen);
        tracing::debug!("Screen: {}", screen.label());
    }

    pub fn participants(&self) -> &[Participant] {
        self.state.participants()
    }

    /// Draw engine over the current list; start from `config().draw_settings()` and apply CLI overrides.
    pub fn draw_engine(&self, settings: DrawSettings) -> Result<DrawEngine> {
        let mut engine = DrawEngine::new(self.state.participants().to_vec());
        engine.configure(settings.draw_count, settings.allow_repeat)?;
        Ok(engine)
    }

    pub async fn animated_draw<F, R, Sch>(
        &self,
        engine: &mut DrawEngine,
        scheduler: &mut Sch,
        rng: &mut R,
        on_frame: F,
    ) -> Result<Option<Vec<Participant>>>
    where
        F: FnMut(&Frame),
        R: Rng + ?Sized,
        Sch: FrameScheduler + ?Sized,
    {
        let mut animation = DrawAnimation::new(self.config.max_frames());
        run_draw_animation(&mut animation, engine, scheduler, rng, on_frame).await
    }

    pub async fn group<R: Rng + ?Sized>(
        &self,
        group_size: usize,
        export_date: Option<NaiveDate>,
        rng: &mut R,
    ) -> Result<GroupingReport> {
        validate_group_size("group_size", group_size)?;

        let engine = GroupingEngine::new(self.config.label_template());
        let groups = engine.group(self.state.participants(), group_size, rng);

        let csv_path = match export_date {
            Some(date) if !groups.is_empty() => {
                let bytes = groups_to_csv(&groups, &self.config.csv_header())?;
                let filename =
                    export_filename(self.config.filename_prefix(), date, self.config.date_format());
                let target = Path::new(self.config.output_path()).join(filename);
                let path = self
                    .storage
                    .write_file(&target.to_string_lossy(), &bytes)
                    .await?;
                tracing::info!("📁 Groups exported to {}", path);
                Some(path)
            }
            _ => None,
        };

        Ok(GroupingReport { groups, csv_path })
    }
}
