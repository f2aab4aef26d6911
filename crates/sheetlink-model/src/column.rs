use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The ten business fields every configured sheet must provide.
///
/// The serialized labels are the exact strings the backend and stored
/// configurations use as JSON object keys. They are application-defined
/// and not user-editable; renaming one is a wire-format change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequiredColumn {
    /// Purchase date of the order line.
    #[serde(rename = "Date")]
    Date,
    /// Listed sale price per unit.
    #[serde(rename = "Sale Price")]
    SalePrice,
    /// Product name or title.
    #[serde(rename = "Name")]
    Name,
    /// Variation attributes (size, color).
    #[serde(rename = "Size/Color")]
    SizeColor,
    /// Units contained in one bundle listing.
    #[serde(rename = "# Units in Bundle")]
    UnitsInBundle,
    /// Quantity purchased.
    #[serde(rename = "Amount Purchased")]
    AmountPurchased,
    /// Amazon Standard Identification Number.
    #[serde(rename = "ASIN")]
    Asin,
    /// Cost of goods sold per unit.
    #[serde(rename = "COGS")]
    Cogs,
    /// Supplier order or PO reference.
    #[serde(rename = "Order #")]
    OrderNumber,
    /// Free-form prep instructions.
    #[serde(rename = "Prep Notes")]
    PrepNotes,
}

impl RequiredColumn {
    /// All required columns in canonical display order.
    pub const ALL: [RequiredColumn; 10] = [
        RequiredColumn::Date,
        RequiredColumn::SalePrice,
        RequiredColumn::Name,
        RequiredColumn::SizeColor,
        RequiredColumn::UnitsInBundle,
        RequiredColumn::AmountPurchased,
        RequiredColumn::Asin,
        RequiredColumn::Cogs,
        RequiredColumn::OrderNumber,
        RequiredColumn::PrepNotes,
    ];

    /// Returns the display label, which is also the serialized key.
    pub fn label(&self) -> &'static str {
        match self {
            RequiredColumn::Date => "Date",
            RequiredColumn::SalePrice => "Sale Price",
            RequiredColumn::Name => "Name",
            RequiredColumn::SizeColor => "Size/Color",
            RequiredColumn::UnitsInBundle => "# Units in Bundle",
            RequiredColumn::AmountPurchased => "Amount Purchased",
            RequiredColumn::Asin => "ASIN",
            RequiredColumn::Cogs => "COGS",
            RequiredColumn::OrderNumber => "Order #",
            RequiredColumn::PrepNotes => "Prep Notes",
        }
    }
}

impl fmt::Display for RequiredColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RequiredColumn {
    type Err = ModelError;

    /// Parse an exact column label. Labels are case-sensitive because they
    /// double as stored JSON keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequiredColumn::ALL
            .iter()
            .find(|column| column.label() == s)
            .copied()
            .ok_or_else(|| ModelError::UnknownColumn(s.to_string()))
    }
}

/// Assignment of spreadsheet headers to the ten required columns.
///
/// Every column is always present; an unassigned column holds an empty
/// string. Serializes as a JSON object with exactly ten keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnMapping {
    assignments: BTreeMap<RequiredColumn, String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        let assignments = RequiredColumn::ALL
            .iter()
            .map(|column| (*column, String::new()))
            .collect();
        Self { assignments }
    }
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header assigned to a column, empty string when unset.
    pub fn get(&self, column: RequiredColumn) -> &str {
        self.assignments
            .get(&column)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn set(&mut self, column: RequiredColumn, header: impl Into<String>) {
        self.assignments.insert(column, header.into());
    }

    pub fn clear(&mut self, column: RequiredColumn) {
        self.assignments.insert(column, String::new());
    }

    pub fn is_set(&self, column: RequiredColumn) -> bool {
        !self.get(column).is_empty()
    }

    /// Number of columns with a non-empty assignment.
    pub fn assigned_count(&self) -> usize {
        RequiredColumn::ALL
            .iter()
            .filter(|column| self.is_set(**column))
            .count()
    }

    /// True when all ten columns are assigned. This is the submission
    /// validity condition; it is never enforced on mutation.
    pub fn is_complete(&self) -> bool {
        self.assigned_count() == RequiredColumn::ALL.len()
    }

    /// Columns still without an assignment, in canonical order.
    pub fn missing_columns(&self) -> Vec<RequiredColumn> {
        RequiredColumn::ALL
            .iter()
            .filter(|column| !self.is_set(**column))
            .copied()
            .collect()
    }

    /// Iterate all ten columns with their current assignment.
    pub fn iter(&self) -> impl Iterator<Item = (RequiredColumn, &str)> {
        RequiredColumn::ALL
            .iter()
            .map(move |column| (*column, self.get(*column)))
    }

    /// Headers currently claimed by more than one column.
    pub fn duplicate_headers(&self) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for (_, header) in self.iter() {
            if !header.is_empty() {
                *counts.entry(header).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(header, _)| header.to_string())
            .collect()
    }
}

impl<'de> Deserialize<'de> for ColumnMapping {
    /// Boundary-hardened: unknown keys are ignored with a warning, absent
    /// keys come back as unassigned. A syntactically valid object can never
    /// fail to produce a full ten-key mapping.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        let mut mapping = ColumnMapping::default();
        for (key, value) in raw {
            match key.parse::<RequiredColumn>() {
                Ok(column) => mapping.set(column, value),
                Err(_) => {
                    tracing::warn!(key = %key, "ignoring unknown column key in mapping payload");
                }
            }
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for column in RequiredColumn::ALL {
            let parsed: RequiredColumn = column.label().parse().unwrap();
            assert_eq!(parsed, column);
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!("date".parse::<RequiredColumn>().is_err());
        assert!("Date".parse::<RequiredColumn>().is_ok());
    }

    #[test]
    fn serializes_with_exactly_ten_keys() {
        let mut mapping = ColumnMapping::new();
        mapping.set(RequiredColumn::Date, "Order Date");

        let value = serde_json::to_value(&mapping).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 10);
        assert_eq!(object["Date"], "Order Date");
        assert_eq!(object["Sale Price"], "");
        assert_eq!(object["Order #"], "");
    }

    #[test]
    fn deserialize_ignores_unknown_and_fills_absent_keys() {
        let json = r#"{"Date":"Order Date","Bogus Field":"x","ASIN":"ASIN"}"#;
        let mapping: ColumnMapping = serde_json::from_str(json).unwrap();

        assert_eq!(mapping.get(RequiredColumn::Date), "Order Date");
        assert_eq!(mapping.get(RequiredColumn::Asin), "ASIN");
        assert_eq!(mapping.get(RequiredColumn::Cogs), "");
        assert_eq!(mapping.assigned_count(), 2);
    }

    #[test]
    fn completeness_tracks_missing_columns() {
        let mut mapping = ColumnMapping::new();
        assert!(!mapping.is_complete());
        assert_eq!(mapping.missing_columns().len(), 10);

        for column in RequiredColumn::ALL {
            mapping.set(column, format!("col {}", column.label()));
        }
        assert!(mapping.is_complete());
        assert!(mapping.missing_columns().is_empty());

        mapping.clear(RequiredColumn::PrepNotes);
        assert!(!mapping.is_complete());
        assert_eq!(mapping.missing_columns(), vec![RequiredColumn::PrepNotes]);
    }

    #[test]
    fn duplicate_headers_are_reported() {
        let mut mapping = ColumnMapping::new();
        mapping.set(RequiredColumn::SalePrice, "Price");
        mapping.set(RequiredColumn::Cogs, "Price");
        assert_eq!(mapping.duplicate_headers(), vec!["Price".to_string()]);
    }
}
