//! Error types for mapping operations.

use sheetlink_model::RequiredColumn;
use thiserror::Error;

/// Errors from mapping session operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    /// Header not present in the sheet's header row.
    #[error("header not found in sheet: '{0}'")]
    UnknownHeader(String),
    /// Save attempted while required columns are unassigned.
    #[error("missing required columns: {}", column_list(.0))]
    MissingColumns(Vec<RequiredColumn>),
}

fn column_list(columns: &[RequiredColumn]) -> String {
    columns
        .iter()
        .map(RequiredColumn::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_names_each_column() {
        let err = MappingError::MissingColumns(vec![
            RequiredColumn::SalePrice,
            RequiredColumn::PrepNotes,
        ]);
        assert_eq!(
            err.to_string(),
            "missing required columns: Sale Price, Prep Notes"
        );
    }

    #[test]
    fn unknown_header_message_quotes_the_header() {
        let err = MappingError::UnknownHeader("Unit Price".to_string());
        assert_eq!(err.to_string(), "header not found in sheet: 'Unit Price'");
    }
}
