use std::path::PathBuf;

use sheetlink_map::DetectionResult;
use sheetlink_model::AccountSession;
use sheetlink_onboard::StepDescriptor;

/// Everything `status` needs to render: the server session plus the
/// derived step rows.
#[derive(Debug)]
pub struct StatusReport {
    pub session: AccountSession,
    pub steps: Vec<StepDescriptor>,
    pub current_ordinal: u8,
}

/// Outcome of a `detect` run.
#[derive(Debug)]
pub struct DetectOutcome {
    /// Headers exactly as read from the file or worksheet.
    pub headers: Vec<String>,
    pub result: DetectionResult,
    /// Where the draft was written, when `--save-draft` was given.
    pub draft_path: Option<PathBuf>,
}
