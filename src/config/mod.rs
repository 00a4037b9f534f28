pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::DrawSettings;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hr-magic-box")]
#[command(about = "Participant lists, lucky draws and automatic grouping")]
pub struct CliConfig {
    /// Path to a TOML policy file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Name list (.txt or .csv); reads stdin when omitted
    #[arg(short, long, global = true)]
    pub input: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the parsed list and its duplicates
    Names(NamesArgs),
    /// Run lucky draws over the list
    Draw(DrawArgs),
    /// Split the list into fixed-size groups and export CSV
    Group(GroupArgs),
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct NamesArgs {
    /// Drop later duplicates before printing
    #[arg(long)]
    pub dedupe: bool,

    /// Use the built-in example list instead of the input
    #[arg(long, conflicts_with = "generate")]
    pub sample: bool,

    /// Generate N random names instead of reading the input
    #[arg(long, value_name = "N")]
    pub generate: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct DrawArgs {
    /// Winners per draw
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Allow the same participant to win more than once
    #[arg(long, overrides_with = "no_repeat")]
    pub repeat: bool,

    /// Remove winners from the pool even if the policy file allows repeats
    #[arg(long, overrides_with = "repeat")]
    pub no_repeat: bool,

    /// Number of consecutive draws in this session
    #[arg(long, default_value = "1")]
    pub rounds: usize,

    /// Play the preview animation before each commit
    #[arg(long)]
    pub animate: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl DrawArgs {
    /// 命令列旗標優先，沒指定時沿用設定檔
    pub fn draw_settings(&self, from_file: DrawSettings) -> DrawSettings {
        let allow_repeat = if self.repeat {
            true
        } else if self.no_repeat {
            false
        } else {
            from_file.allow_repeat
        };
        DrawSettings {
            draw_count: self.count.unwrap_or(from_file.draw_count),
            allow_repeat,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct GroupArgs {
    /// People per group (at least 2)
    #[arg(short = 'k', long)]
    pub size: Option<usize>,

    /// Directory for the CSV export
    #[arg(long)]
    pub output_path: Option<String>,

    /// Print groups without writing a CSV file
    #[arg(long)]
    pub no_export: bool,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub json: bool,
}
