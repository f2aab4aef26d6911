//! Setup steps and the ordered flows they form.

use std::fmt;

use serde::{Deserialize, Serialize};

use sheetlink_model::AccountSession;

/// One step of the guided setup.
///
/// Completion is always read from the server-reported session flags; a step
/// never decides locally that it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    /// Business profile details.
    Profile,
    /// Seed file uploads, only present on accounts that import history.
    FileUpload,
    /// Google account link.
    AccountLink,
    /// Spreadsheet selection and column mapping.
    SheetConfig,
}

impl SetupStep {
    pub fn label(&self) -> &'static str {
        match self {
            SetupStep::Profile => "Business Profile",
            SetupStep::FileUpload => "Seed Files",
            SetupStep::AccountLink => "Link Google Account",
            SetupStep::SheetConfig => "Configure Sheet",
        }
    }

    /// Whether the session marks this step complete.
    pub fn is_complete(&self, session: &AccountSession) -> bool {
        match self {
            SetupStep::Profile => session.profile_configured,
            SetupStep::FileUpload => session.files_complete(),
            SetupStep::AccountLink => session.google_linked,
            SetupStep::SheetConfig => session.sheet_configured,
        }
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An ordered sequence of setup steps. Ordinals are 1-based positions
/// within the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFlow {
    steps: Vec<SetupStep>,
}

impl SetupFlow {
    /// Profile → Account Link → Sheet Config.
    pub fn standard() -> Self {
        Self {
            steps: vec![
                SetupStep::Profile,
                SetupStep::AccountLink,
                SetupStep::SheetConfig,
            ],
        }
    }

    /// Profile → Seed Files → Account Link → Sheet Config, for accounts
    /// that start from exported purchase history.
    pub fn with_file_upload() -> Self {
        Self {
            steps: vec![
                SetupStep::Profile,
                SetupStep::FileUpload,
                SetupStep::AccountLink,
                SetupStep::SheetConfig,
            ],
        }
    }

    /// Pick the flow for an account. The backend includes `upload_status`
    /// only for accounts on the file-upload variant.
    pub fn for_session(session: &AccountSession) -> Self {
        if session.upload_status.is_some() {
            Self::with_file_upload()
        } else {
            Self::standard()
        }
    }

    pub fn steps(&self) -> &[SetupStep] {
        &self.steps
    }

    pub fn len(&self) -> u8 {
        self.steps.len() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 1-based position of a step in this flow.
    pub fn ordinal_of(&self, step: SetupStep) -> Option<u8> {
        self.steps
            .iter()
            .position(|s| *s == step)
            .map(|index| index as u8 + 1)
    }

    pub fn step_at(&self, ordinal: u8) -> Option<SetupStep> {
        if ordinal == 0 {
            return None;
        }
        self.steps.get(usize::from(ordinal) - 1).copied()
    }

    /// Ordinal of the first step the session has not completed. When every
    /// step is complete this stays on the terminal step.
    pub fn first_incomplete(&self, session: &AccountSession) -> u8 {
        for (index, step) in self.steps.iter().enumerate() {
            if !step.is_complete(session) {
                return index as u8 + 1;
            }
        }
        self.len()
    }

    pub fn is_fully_complete(&self, session: &AccountSession) -> bool {
        self.steps.iter().all(|step| step.is_complete(session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetlink_model::FileUploadStatus;

    #[test]
    fn standard_flow_ordinals() {
        let flow = SetupFlow::standard();
        assert_eq!(flow.len(), 3);
        assert_eq!(flow.ordinal_of(SetupStep::Profile), Some(1));
        assert_eq!(flow.ordinal_of(SetupStep::AccountLink), Some(2));
        assert_eq!(flow.ordinal_of(SetupStep::SheetConfig), Some(3));
        assert_eq!(flow.ordinal_of(SetupStep::FileUpload), None);
        assert_eq!(flow.step_at(2), Some(SetupStep::AccountLink));
        assert_eq!(flow.step_at(0), None);
        assert_eq!(flow.step_at(4), None);
    }

    #[test]
    fn upload_variant_inserts_file_step() {
        let flow = SetupFlow::with_file_upload();
        assert_eq!(flow.len(), 4);
        assert_eq!(flow.ordinal_of(SetupStep::FileUpload), Some(2));
        assert_eq!(flow.ordinal_of(SetupStep::SheetConfig), Some(4));
    }

    #[test]
    fn flow_is_selected_from_upload_status_presence() {
        let mut session = AccountSession::default();
        assert_eq!(SetupFlow::for_session(&session), SetupFlow::standard());

        session.upload_status = Some(FileUploadStatus::default());
        assert_eq!(
            SetupFlow::for_session(&session),
            SetupFlow::with_file_upload()
        );
    }

    #[test]
    fn first_incomplete_walks_server_flags() {
        let flow = SetupFlow::standard();
        let mut session = AccountSession::default();
        assert_eq!(flow.first_incomplete(&session), 1);

        session.profile_configured = true;
        assert_eq!(flow.first_incomplete(&session), 2);

        session.google_linked = true;
        assert_eq!(flow.first_incomplete(&session), 3);

        session.sheet_configured = true;
        assert_eq!(flow.first_incomplete(&session), 3);
        assert!(flow.is_fully_complete(&session));
    }
}
