pub mod api;
pub mod column;
pub mod error;
pub mod session;

pub use api::{
    Ack, AuthCodeRequest, HeaderRow, ProfileUpdate, SheetConfigRequest, Spreadsheet,
    SpreadsheetList, UploadKind, Worksheet, WorksheetList,
};
pub use column::{ColumnMapping, RequiredColumn};
pub use error::{ModelError, Result};
pub use session::{AccountSession, FileUploadStatus, UserRecord};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_config_request_round_trips() {
        let mut mapping = ColumnMapping::new();
        mapping.set(RequiredColumn::Date, "Order Date");
        mapping.set(RequiredColumn::Asin, "ASIN");

        let request = SheetConfigRequest {
            spreadsheet_id: "abc123".to_string(),
            worksheet_title: "2026 Purchases".to_string(),
            column_mapping: mapping,
        };

        let json = serde_json::to_string(&request).unwrap();
        let round: SheetConfigRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(round.spreadsheet_id, "abc123");
        assert_eq!(round.column_mapping.get(RequiredColumn::Date), "Order Date");
        assert_eq!(round.column_mapping.assigned_count(), 2);
    }

    #[test]
    fn session_mapping_key_shape_is_stable() {
        let session: AccountSession = serde_json::from_str(
            r#"{
                "profile_configured": true,
                "google_linked": true,
                "sheet_configured": true,
                "user_record": {
                    "email": "seller@example.com",
                    "column_mapping": {"Date": "Order Date", "COGS": "Unit Cost"}
                }
            }"#,
        )
        .unwrap();

        let mapping = session.user_record.column_mapping.unwrap();
        assert_eq!(mapping.get(RequiredColumn::Cogs), "Unit Cost");
        // Round-trip always emits the full key set.
        let value = serde_json::to_value(&mapping).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 10);
    }
}
