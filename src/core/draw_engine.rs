use crate::domain::model::{DrawSettings, Participant, WinnerEntry};
use crate::utils::error::{HrError, Result};
use crate::utils::validation::validate_positive_number;
use rand::Rng;

/// Lucky-draw session over a candidate pool.
///
/// Every mutation happens only after a draw fully succeeds; a failed draw
/// leaves the pool and history untouched.
#[derive(Debug, Clone)]
pub struct DrawEngine {
    participants: Vec<Participant>,
    pool: Vec<Participant>,
    history: Vec<Participant>,
    settings: DrawSettings,
}

impl DrawEngine {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            pool: participants.clone(),
            participants,
            history: Vec::new(),
            settings: DrawSettings::default(),
        }
    }

    pub fn configure(&mut self, draw_count: usize, allow_repeat: bool) -> Result<()> {
        validate_positive_number("draw.draw_count", draw_count, 1)?;
        self.settings = DrawSettings {
            draw_count,
            allow_repeat,
        };
        tracing::debug!(
            "Draw configured: count={}, allow_repeat={}",
            draw_count,
            allow_repeat
        );
        Ok(())
    }

    /// Fails before any work when a no-repeat draw asks for more than the pool holds.
    pub fn check_ready(&self) -> Result<()> {
        let DrawSettings {
            draw_count,
            allow_repeat,
        } = self.settings;
        if !allow_repeat && self.pool.len() < draw_count {
            return Err(HrError::InsufficientCandidates {
                requested: draw_count,
                available: self.pool.len(),
            });
        }
        Ok(())
    }

    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<Participant>> {
        if self.pool.is_empty() {
            tracing::debug!("Draw skipped: candidate pool is empty");
            return Ok(Vec::new());
        }
        self.check_ready()?;

        let DrawSettings {
            draw_count,
            allow_repeat,
        } = self.settings;
        let mut available = self.pool.clone();
        let mut winners = Vec::with_capacity(draw_count);

        for _ in 0..draw_count {
            if available.is_empty() {
                break;
            }
            let idx = rng.gen_range(0..available.len());
            if allow_repeat {
                winners.push(available[idx].clone());
            } else {
                winners.push(available.remove(idx));
            }
        }

        // 新的中獎者排在歷史最前面，同一輪保持抽出順序
        let mut history = winners.clone();
        history.append(&mut self.history);
        self.history = history;

        if !allow_repeat {
            self.pool = available;
        }

        tracing::info!(
            "Drew {} winner(s), {} candidate(s) remaining",
            winners.len(),
            self.pool.len()
        );
        Ok(winners)
    }

    /// Uniform picks for the animation; never mutates the session.
    pub fn preview<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        if self.pool.is_empty() {
            return Vec::new();
        }
        (0..self.settings.draw_count)
            .map(|_| self.pool[rng.gen_range(0..self.pool.len())].name.clone())
            .collect()
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.pool = self.participants.clone();
        tracing::debug!("Draw reset: pool restored to {}", self.pool.len());
    }

    /// 上游名單變動時重建候選池，中獎歷史保留
    pub fn sync_participants(&mut self, participants: Vec<Participant>) {
        self.pool = participants.clone();
        self.participants = participants;
        tracing::debug!("Participant list synced: {}", self.pool.len());
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }

    pub fn history(&self) -> &[Participant] {
        &self.history
    }

    pub fn settings(&self) -> DrawSettings {
        self.settings
    }

    pub fn numbered_history(&self) -> Vec<WinnerEntry> {
        let total = self.history.len();
        self.history
            .iter()
            .enumerate()
            .map(|(idx, participant)| WinnerEntry {
                ordinal: total - idx,
                participant: participant.clone(),
            })
            .collect()
    }

    pub fn rule_label(&self) -> &'static str {
        if self.settings.allow_repeat {
            "允許重複"
        } else {
            "不重複"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::name_parser::parse;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn engine_with(names: &str) -> DrawEngine {
        DrawEngine::new(parse(names))
    }

    #[test]
    fn test_draw_without_repeat_shrinks_pool() {
        let mut engine = engine_with("A\nB\nC\nD\nE");
        engine.configure(2, false).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let before = engine.pool().to_vec();
        let winners = engine.draw(&mut rng).unwrap();

        assert_eq!(winners.len(), 2);
        assert_ne!(winners[0].id, winners[1].id);
        assert_eq!(engine.pool().len(), 3);

        let mut union: Vec<_> = engine.pool().iter().chain(winners.iter()).map(|p| p.id).collect();
        let mut expected: Vec<_> = before.iter().map(|p| p.id).collect();
        union.sort();
        expected.sort();
        assert_eq!(union, expected);
    }

    #[test]
    fn test_draw_with_repeat_keeps_pool() {
        let mut engine = engine_with("A\nB");
        engine.configure(5, true).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let winners = engine.draw(&mut rng).unwrap();
        assert_eq!(winners.len(), 5);
        assert_eq!(engine.pool().len(), 2);
        assert_eq!(engine.history().len(), 5);
    }

    #[test]
    fn test_insufficient_candidates_mutates_nothing() {
        let mut engine = engine_with("A\nB");
        engine.configure(3, false).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let err = engine.draw(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            HrError::InsufficientCandidates {
                requested: 3,
                available: 2
            }
        ));
        assert_eq!(engine.pool().len(), 2);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_empty_pool_is_silent_noop() {
        let mut engine = DrawEngine::new(Vec::new());
        engine.configure(2, false).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(engine.draw(&mut rng).unwrap().is_empty());
        assert!(engine.history().is_empty());
        assert!(engine.preview(&mut rng).is_empty());
    }

    #[test]
    fn test_zero_draw_count_rejected() {
        let mut engine = engine_with("A");
        assert!(engine.configure(0, false).is_err());
        assert_eq!(engine.settings(), DrawSettings::default());
    }

    #[test]
    fn test_history_prepends_latest_draw() {
        let mut engine = engine_with("A\nB\nC\nD");
        engine.configure(1, false).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let first = engine.draw(&mut rng).unwrap();
        let second = engine.draw(&mut rng).unwrap();
        assert_eq!(engine.history()[0], second[0]);
        assert_eq!(engine.history()[1], first[0]);

        let numbered = engine.numbered_history();
        assert_eq!(numbered[0].ordinal, 2);
        assert_eq!(numbered[1].ordinal, 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut engine = engine_with("A\nB\nC");
        engine.configure(2, false).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        engine.draw(&mut rng).unwrap();

        engine.reset();
        let pool_once = engine.pool().to_vec();
        engine.reset();
        assert_eq!(engine.pool(), pool_once.as_slice());
        assert_eq!(engine.pool(), engine.participants());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let mut engine = engine_with("A\nB\nC");
        engine.configure(2, false).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..20 {
            let names = engine.preview(&mut rng);
            assert_eq!(names.len(), 2);
        }
        assert_eq!(engine.pool().len(), 3);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_sync_participants_resets_pool_keeps_history() {
        let mut engine = engine_with("A\nB\nC");
        let mut rng = StdRng::seed_from_u64(2);
        engine.draw(&mut rng).unwrap();

        engine.sync_participants(parse("X\nY"));
        let names: HashSet<_> = engine.pool().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, HashSet::from(["X", "Y"]));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_rule_label() {
        let mut engine = engine_with("A");
        assert_eq!(engine.rule_label(), "不重複");
        engine.configure(1, true).unwrap();
        assert_eq!(engine.rule_label(), "允許重複");
    }
}
