//! Draw animation as an explicit state machine.
//!
//! Preview frames are independent uniform samples and are never committed.
//! The winners shown on the final frame are the committed winners.

use crate::core::draw_engine::DrawEngine;
use crate::domain::model::Participant;
use crate::domain::ports::FrameScheduler;
use crate::utils::error::Result;
use rand::Rng;

pub const DEFAULT_MAX_FRAMES: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating { frame: u32, max_frames: u32 },
    Committed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Preview(Vec<String>),
    Committed(Vec<Participant>),
}

#[derive(Debug, Clone)]
pub struct DrawAnimation {
    state: AnimationState,
    max_frames: u32,
}

impl Default for DrawAnimation {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAMES)
    }
}

impl DrawAnimation {
    pub fn new(max_frames: u32) -> Self {
        Self {
            state: AnimationState::Idle,
            max_frames: max_frames.max(1),
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    /// Returns `Ok(false)` when the request is ignored (already animating or
    /// nothing to draw from).
    pub fn start(&mut self, engine: &DrawEngine) -> Result<bool> {
        if self.is_animating() || engine.pool().is_empty() {
            return Ok(false);
        }
        engine.check_ready()?;

        self.state = AnimationState::Animating {
            frame: 0,
            max_frames: self.max_frames,
        };
        tracing::debug!("Animation started ({} frames)", self.max_frames);
        Ok(true)
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        engine: &mut DrawEngine,
        rng: &mut R,
    ) -> Result<Option<Frame>> {
        let AnimationState::Animating { frame, max_frames } = self.state else {
            return Ok(None);
        };

        let frame = frame + 1;
        if frame < max_frames {
            self.state = AnimationState::Animating { frame, max_frames };
            return Ok(Some(Frame::Preview(engine.preview(rng))));
        }

        match engine.draw(rng) {
            Ok(winners) => {
                self.state = AnimationState::Committed;
                Ok(Some(Frame::Committed(winners)))
            }
            Err(e) => {
                self.state = AnimationState::Idle;
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.is_animating() {
            tracing::debug!("Animation cancelled");
        }
        self.state = AnimationState::Idle;
    }
}

/// Drives an animation to completion, one scheduled frame per tick.
///
/// Returns `Ok(None)` if the animation was not started or the scheduler
/// reported cancellation before the commit frame.
pub async fn run_draw_animation<S, R, F>(
    animation: &mut DrawAnimation,
    engine: &mut DrawEngine,
    scheduler: &mut S,
    rng: &mut R,
    mut on_frame: F,
) -> Result<Option<Vec<Participant>>>
where
    S: FrameScheduler + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(&Frame),
{
    if !animation.start(engine)? {
        return Ok(None);
    }

    loop {
        if !scheduler.next_frame().await {
            animation.cancel();
            return Ok(None);
        }

        match animation.tick(engine, rng)? {
            Some(Frame::Committed(winners)) => {
                on_frame(&Frame::Committed(winners.clone()));
                return Ok(Some(winners));
            }
            Some(frame) => on_frame(&frame),
            None => return Ok(None),
        }
    }
}
