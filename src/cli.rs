use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kyc::EntityKind;

/// Admin console for the KYC compliance backend.
#[derive(Parser, Debug)]
#[command(name = "kyc-console", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Base URL of the KYC API (overrides KYC_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in milliseconds (overrides KYC_TIMEOUT_MS)
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Never contact the backend; answer everything from sample data
    #[arg(long, global = true)]
    pub offline: bool,

    /// Directory of `<entity>.json` sample files replacing the built-in samples
    #[arg(long, global = true)]
    pub samples: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one page of a list
    List(ListArgs),

    /// Print a single record
    Show(ShowArgs),

    /// Approve or reject a user submission
    Review(ReviewArgs),

    /// Move a detail step within its level
    Reorder(ReorderArgs),

    /// Show a user's verification progress
    Progress(ProgressArgs),

    /// Launch the interactive list console
    Console(ConsoleArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityArg {
    Levels,
    Details,
    Users,
    UserLevels,
    UserDetails,
    Countries,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Levels => EntityKind::KycLevels,
            EntityArg::Details => EntityKind::KycDetails,
            EntityArg::Users => EntityKind::Users,
            EntityArg::UserLevels => EntityKind::UserKycLevels,
            EntityArg::UserDetails => EntityKind::UserKycDetails,
            EntityArg::Countries => EntityKind::CountryAssignments,
        }
    }
}

/// Arguments for the `list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Which list to show
    pub entity: EntityArg,

    /// 1-based page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page (5, 10, 20, 50 or 100)
    #[arg(long, default_value = "10")]
    pub page_size: u32,

    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Status filter (`all`, a status name or a legacy code)
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Sort field (defaults to the list's natural order)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Only records belonging to this KYC level
    #[arg(long)]
    pub level: Option<String>,

    /// Only records belonging to this user
    #[arg(long)]
    pub user: Option<String>,

    /// Return every matching record on one page
    #[arg(long)]
    pub all: bool,

    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    pub entity: EntityArg,

    pub id: String,

    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewTarget {
    /// A user's KYC level submission
    Level,
    /// A single submitted detail
    Detail,
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    pub target: ReviewTarget,

    /// Submission ID
    pub id: String,

    /// `approve` or `reject`
    pub decision: String,

    /// Reviewer comments (required when rejecting)
    #[arg(long)]
    pub comments: Option<String>,
}

/// Arguments for the `reorder` subcommand.
#[derive(Parser, Debug)]
pub struct ReorderArgs {
    /// KYC level whose detail steps are reordered
    pub level: String,

    /// Current 1-based position of the step
    pub from: usize,

    /// New 1-based position of the step
    pub to: usize,

    /// Print the new order without saving it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `progress` subcommand.
#[derive(Parser, Debug)]
pub struct ProgressArgs {
    /// User ID or email
    pub user: String,

    /// Output as JSON instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `console` subcommand.
#[derive(Parser, Debug)]
pub struct ConsoleArgs {
    /// Which list to open
    #[arg(default_value = "levels")]
    pub entity: EntityArg,

    /// Initial rows per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Only records belonging to this KYC level
    #[arg(long)]
    pub level: Option<String>,
}
