pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use app::session::{GroupingReport, HrSession};
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    animation::DrawAnimation, draw_engine::DrawEngine, grouping::GroupingEngine,
};
pub use utils::error::{HrError, Result};
