use serde::{Deserialize, Serialize};

use crate::column::ColumnMapping;

/// Server-reported account state, as returned by `GET /api/user`.
///
/// The three completion flags are the only source of truth for setup
/// progress. They are never derived locally; the client may patch them
/// optimistically after the server confirms the matching save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSession {
    #[serde(default)]
    pub profile_configured: bool,
    /// Google account link state. Older backend payloads use `linked`.
    #[serde(default, alias = "linked")]
    pub google_linked: bool,
    #[serde(default)]
    pub sheet_configured: bool,
    #[serde(default)]
    pub user_record: UserRecord,
    #[serde(default)]
    pub upload_status: Option<FileUploadStatus>,
}

impl AccountSession {
    /// True when the file-upload requirement is satisfied. Absent status
    /// means the server has not confirmed any upload yet.
    pub fn files_complete(&self) -> bool {
        self.upload_status
            .as_ref()
            .map(|status| status.files_complete)
            .unwrap_or(false)
    }
}

/// Profile and sheet facts attached to the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub sheet_id: Option<String>,
    #[serde(default)]
    pub worksheet_title: Option<String>,
    #[serde(default)]
    pub column_mapping: Option<ColumnMapping>,
}

/// Upload progress for the two required seed files.
///
/// `files_complete` is computed server-side; the client reads it verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadStatus {
    #[serde(default)]
    pub has_purchases: bool,
    #[serde(default)]
    pub has_inventory: bool,
    #[serde(default)]
    pub files_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_alias_is_accepted() {
        let json = r#"{"profile_configured":true,"linked":true,"sheet_configured":false}"#;
        let session: AccountSession = serde_json::from_str(json).unwrap();
        assert!(session.profile_configured);
        assert!(session.google_linked);
        assert!(!session.sheet_configured);
    }

    #[test]
    fn missing_fields_default_to_incomplete() {
        let session: AccountSession = serde_json::from_str("{}").unwrap();
        assert!(!session.profile_configured);
        assert!(!session.google_linked);
        assert!(!session.files_complete());
        assert!(session.upload_status.is_none());
    }

    #[test]
    fn files_complete_reads_server_flag_only() {
        let mut session = AccountSession::default();
        session.upload_status = Some(FileUploadStatus {
            has_purchases: true,
            has_inventory: true,
            files_complete: false,
        });
        // Both files present but the server has not marked completion.
        assert!(!session.files_complete());
    }
}
