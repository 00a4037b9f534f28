use crate::core::name_parser::{
    duplicate_preview, find_duplicates, names_of, parse, remove_duplicates, split_names, to_text,
};
use crate::domain::model::{ListSummary, Participant, Screen};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
const DUPLICATE_PREVIEW_LIMIT: usize = 3;

/// Application state shared by the three screens.
///
/// Updates consume the current snapshot and return the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    screen: Screen,
    source_text: String,
    participants: Vec<Participant>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn with_screen(self, screen: Screen) -> Self {
        Self { screen, ..self }
    }

    pub fn with_source_text(self, text: impl Into<String>) -> Self {
        let source_text = text.into();
        let participants = parse(&source_text);
        Self {
            source_text,
            participants,
            ..self
        }
    }

    /// 排除重複姓名，編輯區內容改寫為去重後的名單
    pub fn without_duplicates(self) -> Self {
        let unique = remove_duplicates(&split_names(&self.source_text));
        self.with_source_text(to_text(&unique))
    }

    pub fn summary(&self) -> ListSummary {
        let duplicates = find_duplicates(&names_of(&self.participants));
        let preview = duplicate_preview(&duplicates, DUPLICATE_PREVIEW_LIMIT);
        ListSummary {
            count: self.participants.len(),
            duplicates,
            preview,
        }
    }
}

/// Holds back re-parses until the text has been quiet for `quiet_period`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    pending: Option<(String, Instant)>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    pub fn edit(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Releases the latest text once the quiet period has elapsed since the last edit.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let quiet = matches!(
            &self.pending,
            Some((_, edited_at)) if now.saturating_duration_since(*edited_at) >= self.quiet_period
        );
        if quiet {
            self.flush()
        } else {
            None
        }
    }

    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(text, _)| text)
    }
}
