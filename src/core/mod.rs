pub mod animation;
pub mod app_state;
pub mod draw_engine;
pub mod export;
pub mod grouping;
pub mod name_parser;
pub mod samples;
pub mod scheduler;

pub use crate::domain::model::{
    DrawSettings, Group, ListSummary, Participant, ParticipantId, Screen, WinnerEntry,
};
pub use crate::domain::ports::{FrameScheduler, Storage};
pub use crate::utils::error::Result;
