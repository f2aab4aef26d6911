use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::ColumnMapping;

/// A spreadsheet visible to the linked Google account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spreadsheet {
    pub id: String,
    pub name: String,
}

/// A worksheet (tab) within a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    #[serde(alias = "id")]
    pub sheet_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpreadsheetList {
    #[serde(default)]
    pub spreadsheets: Vec<Spreadsheet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorksheetList {
    #[serde(default)]
    pub worksheets: Vec<Worksheet>,
}

/// First row of a worksheet, in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderRow {
    #[serde(default)]
    pub headers: Vec<String>,
}

/// Payload for `POST /api/sheets/configure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfigRequest {
    pub spreadsheet_id: String,
    pub worksheet_title: String,
    pub column_mapping: ColumnMapping,
}

/// Payload for `POST /api/profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub marketplace: String,
}

impl ProfileUpdate {
    /// Required fields still blank, by display name. Checked before any
    /// request is issued.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.business_name.trim().is_empty() {
            missing.push("business name");
        }
        if self.contact_email.trim().is_empty() {
            missing.push("contact email");
        }
        if self.marketplace.trim().is_empty() {
            missing.push("marketplace");
        }
        missing
    }

    pub fn is_valid(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Payload for `POST /api/google/complete-auth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCodeRequest {
    pub code: String,
}

/// Which seed file an upload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Purchases,
    Inventory,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Purchases => "purchases",
            UploadKind::Inventory => "inventory",
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Generic backend acknowledgement envelope.
///
/// Mutating endpoints answer with this shape; `error` carries the
/// human-readable explanation when `success` is false.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    /// Fold the envelope into a result, keeping the backend's wording when
    /// it provided any.
    pub fn into_result(self) -> Result<Option<String>, String> {
        if self.success {
            Ok(self.message)
        } else {
            Err(self
                .error
                .or(self.message)
                .unwrap_or_else(|| "The request could not be completed.".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_validation_names_blank_fields() {
        let update = ProfileUpdate {
            business_name: "Acme Resale".to_string(),
            contact_email: "  ".to_string(),
            marketplace: String::new(),
        };
        assert_eq!(update.missing_fields(), vec!["contact email", "marketplace"]);
        assert!(!update.is_valid());
    }

    #[test]
    fn ack_prefers_backend_error_text() {
        let ack = Ack {
            success: false,
            message: Some("saved".to_string()),
            error: Some("Sheet is no longer accessible".to_string()),
        };
        assert_eq!(
            ack.into_result().unwrap_err(),
            "Sheet is no longer accessible"
        );
    }

    #[test]
    fn ack_falls_back_to_generic_text() {
        let ack = Ack::default();
        assert_eq!(
            ack.into_result().unwrap_err(),
            "The request could not be completed."
        );
    }

    #[test]
    fn worksheet_accepts_id_alias() {
        let json = r#"{"id":"12","title":"Inventory"}"#;
        let worksheet: Worksheet = serde_json::from_str(json).unwrap();
        assert_eq!(worksheet.sheet_id, "12");
    }
}
