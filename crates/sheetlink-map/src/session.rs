//! Mapping session state for the review-and-edit workflow.
//!
//! A session holds the editable mapping between detection and save. It
//! tracks where each assignment came from so the review step can show which
//! columns were detected, hand-picked, or restored from a saved
//! configuration.

use std::collections::BTreeMap;

use sheetlink_model::{ColumnMapping, RequiredColumn, SheetConfigRequest};

use crate::engine::{DetectionEngine, ScoreThresholds};
use crate::error::MappingError;

/// Where a column's current assignment came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssignmentSource {
    /// Assigned by the detection engine with this score.
    Detected { score: f64 },
    /// Assigned by hand during review.
    Manual,
    /// Restored from a previously saved configuration.
    Saved,
}

/// Editable mapping for one worksheet's headers.
#[derive(Debug, Clone)]
pub struct MappingSession {
    headers: Vec<String>,
    mapping: ColumnMapping,
    sources: BTreeMap<RequiredColumn, AssignmentSource>,
    thresholds: ScoreThresholds,
}

impl MappingSession {
    /// Start a session by running detection over the headers.
    pub fn new(headers: Vec<String>) -> Self {
        Self::with_thresholds(headers, ScoreThresholds::default())
    }

    pub fn with_thresholds(headers: Vec<String>, thresholds: ScoreThresholds) -> Self {
        let mut session = Self {
            headers,
            mapping: ColumnMapping::new(),
            sources: BTreeMap::new(),
            thresholds,
        };
        session.reset_to_detected();
        session
    }

    /// Start a session from a previously saved mapping, keeping the saved
    /// assignments verbatim. Assignments whose header no longer appears in
    /// the sheet are kept and reported by [`Self::stale_assignments`].
    pub fn resume(headers: Vec<String>, saved: ColumnMapping) -> Self {
        let mut sources = BTreeMap::new();
        for (column, header) in saved.iter() {
            if !header.is_empty() {
                sources.insert(column, AssignmentSource::Saved);
            }
        }
        Self {
            headers,
            mapping: saved,
            sources,
            thresholds: ScoreThresholds::default(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn source(&self, column: RequiredColumn) -> Option<AssignmentSource> {
        self.sources.get(&column).copied()
    }

    /// Assign a header by hand. The header must be one of the session's
    /// headers; the sheet is the authority on what exists.
    pub fn assign(&mut self, column: RequiredColumn, header: &str) -> Result<(), MappingError> {
        if !self.headers.iter().any(|h| h == header) {
            return Err(MappingError::UnknownHeader(header.to_string()));
        }
        self.mapping.set(column, header);
        self.sources.insert(column, AssignmentSource::Manual);
        tracing::debug!(column = %column, header = %header, "manual assignment");
        Ok(())
    }

    /// Remove a column's assignment.
    pub fn clear(&mut self, column: RequiredColumn) {
        self.mapping.clear(column);
        self.sources.remove(&column);
    }

    /// Discard all edits and re-run detection over the session's headers.
    /// Running it again without intervening edits changes nothing.
    pub fn reset_to_detected(&mut self) {
        let result = DetectionEngine::new(self.thresholds).detect(&self.headers);
        self.sources.clear();
        for m in &result.matches {
            self.sources
                .insert(m.column, AssignmentSource::Detected { score: m.score });
        }
        self.mapping = result.mapping;
    }

    /// True once any assignment was made or cleared by hand.
    pub fn is_touched(&self) -> bool {
        self.sources
            .values()
            .any(|source| matches!(source, AssignmentSource::Manual))
    }

    /// Assignments whose header is not present in the current sheet. Only
    /// possible after [`Self::resume`] against a changed sheet.
    pub fn stale_assignments(&self) -> Vec<(RequiredColumn, String)> {
        self.mapping
            .iter()
            .filter(|(_, header)| {
                !header.is_empty() && !self.headers.iter().any(|h| h == header)
            })
            .map(|(column, header)| (column, header.to_string()))
            .collect()
    }

    /// Check that every required column is assigned. Called before any
    /// save request is issued; the error names each missing column.
    pub fn validate_for_save(&self) -> Result<(), MappingError> {
        let missing = self.mapping.missing_columns();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(MappingError::MissingColumns(missing))
        }
    }

    /// Validate and build the save payload.
    pub fn into_request(
        self,
        spreadsheet_id: &str,
        worksheet_title: &str,
    ) -> Result<SheetConfigRequest, MappingError> {
        self.validate_for_save()?;
        Ok(SheetConfigRequest {
            spreadsheet_id: spreadsheet_id.to_string(),
            worksheet_title: worksheet_title.to_string(),
            column_mapping: self.mapping,
        })
    }

    /// Counts for the review display.
    pub fn summary(&self) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for column in RequiredColumn::ALL {
            match self.sources.get(&column) {
                Some(AssignmentSource::Detected { .. }) => summary.detected += 1,
                Some(AssignmentSource::Manual) => summary.manual += 1,
                Some(AssignmentSource::Saved) => summary.saved += 1,
                None => summary.missing += 1,
            }
        }
        summary
    }
}

/// Counts of assignment provenance across the ten columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub detected: usize,
    pub manual: usize,
    pub saved: usize,
    pub missing: usize,
}

impl SessionSummary {
    pub fn assigned(&self) -> usize {
        self.detected + self.manual + self.saved
    }
}
