use crate::types::catalog::{CostCategory, Level};
use crate::types::weights::WeightVector;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "toolradar",
    version,
    about = "Startup tool advisor: weight five axes, rank tools, track feedback"
)]
pub struct Cli {
    /// Directory holding toolradar.toml and the .toolradar session state
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Login(LoginCommand),
    Profile,
    Catalog(CatalogCommand),
    Radial(RadialCommand),
    Recommend(RecommendCommand),
    Feedback(FeedbackCommand),
    Feedbacks,
    Chat(ChatCommand),
}

#[derive(Args)]
pub struct LoginCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub company: String,
    #[arg(long, default_value = "founder")]
    pub role: String,
}

#[derive(Args)]
pub struct CatalogCommand {
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RadialCommand {
    /// Starting weights, five comma-separated values in [0,1]
    #[arg(long)]
    pub weights: Option<WeightVector>,
    /// Gesture script, e.g. "press:0 move:220,100 release"
    #[arg(long, default_value = "")]
    pub events: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct RecommendCommand {
    #[arg(long)]
    pub weights: Option<WeightVector>,
    /// Target business function; "General" means no preference
    #[arg(long)]
    pub function: Option<String>,
    #[arg(long, value_enum)]
    pub complexity: Option<Level>,
    #[arg(long, value_enum)]
    pub cost: Option<CostCategory>,
    #[arg(long)]
    pub top: Option<usize>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct FeedbackCommand {
    #[arg(long)]
    pub tool: String,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: u8,
    #[arg(long, default_value = "")]
    pub comment: String,
    /// Weights in effect when the tool was recommended
    #[arg(long)]
    pub weights: Option<WeightVector>,
}

#[derive(Args)]
pub struct ChatCommand {
    pub message: String,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
