//! CLI argument definitions for SheetLink.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sheetlink",
    version,
    about = "SheetLink - connect a reseller ledger spreadsheet from the terminal",
    long_about = "Set up a SheetLink account without the web app: save the business\n\
                  profile, link a Google account, pick a spreadsheet, and map its\n\
                  headers onto the required ledger columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Backend base URL (default: $SHEETLINK_API_URL, then the hosted service).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show setup progress and the current step.
    Status,

    /// List the required ledger columns and their detection keywords.
    Columns,

    /// Detect a column mapping from worksheet headers.
    Detect(DetectArgs),

    /// Pick a spreadsheet and save its column mapping.
    Configure(ConfigureArgs),

    /// Save the business profile.
    Profile(ProfileArgs),

    /// Link a Google account using an OAuth code.
    Link(LinkArgs),

    /// Upload seed files or show upload progress.
    Upload(UploadArgs),
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Read headers from the first row of a local CSV file.
    #[arg(
        long = "file",
        value_name = "CSV",
        conflicts_with_all = ["spreadsheet", "worksheet"]
    )]
    pub file: Option<PathBuf>,

    /// Fetch headers from this spreadsheet instead of a local file.
    #[arg(long = "spreadsheet", value_name = "ID", requires = "worksheet")]
    pub spreadsheet: Option<String>,

    /// Worksheet title within the spreadsheet.
    #[arg(long = "worksheet", value_name = "TITLE")]
    pub worksheet: Option<String>,

    /// Acceptance threshold override. Scores at or below it stay unmapped.
    #[arg(long = "min-score", value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Save the detected mapping as a draft for `configure --from-draft`.
    #[arg(long = "save-draft", requires = "spreadsheet")]
    pub save_draft: bool,

    /// Print the result as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ConfigureArgs {
    /// Spreadsheet to configure. Omit to list available spreadsheets.
    #[arg(value_name = "SPREADSHEET_ID")]
    pub spreadsheet: Option<String>,

    /// Worksheet title (default: the first worksheet).
    #[arg(long = "worksheet", value_name = "TITLE")]
    pub worksheet: Option<String>,

    /// Assign a column by hand, repeatable ("Sale Price=Unit Price").
    #[arg(long = "map", value_name = "COLUMN=HEADER")]
    pub map: Vec<String>,

    /// Resume from the saved draft for this spreadsheet.
    #[arg(long = "from-draft")]
    pub from_draft: bool,

    /// Review the mapping without saving it.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Business or store name.
    #[arg(long = "business-name", value_name = "NAME")]
    pub business_name: Option<String>,

    /// Contact email address.
    #[arg(long = "email", value_name = "EMAIL")]
    pub email: Option<String>,

    /// Marketplace the business sells on (for example "amazon.com").
    #[arg(long = "marketplace", value_name = "MARKETPLACE")]
    pub marketplace: Option<String>,
}

#[derive(Parser)]
pub struct LinkArgs {
    /// OAuth authorization code from the Google consent screen.
    #[arg(value_name = "CODE")]
    pub code: String,
}

#[derive(Parser)]
pub struct UploadArgs {
    /// Upload this file as the purchases seed file.
    #[arg(long = "purchases", value_name = "FILE")]
    pub purchases: Option<PathBuf>,

    /// Upload this file as the inventory seed file.
    #[arg(long = "inventory", value_name = "FILE")]
    pub inventory: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_name_matches_installed_binary() {
        // The [[bin]] target is named "sheetlink"; usage text must agree.
        assert_eq!(Cli::command().get_name(), "sheetlink");
    }

    #[test]
    fn argument_wiring_is_consistent() {
        Cli::command().debug_assert();
    }
}
