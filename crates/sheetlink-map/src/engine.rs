//! Detection engine implementation.

use std::cmp::Ordering;

use serde::Serialize;

use sheetlink_model::{ColumnMapping, RequiredColumn};

use crate::patterns::column_patterns;

/// Configurable scoring constants for header detection.
///
/// The defaults reproduce the production behavior: an exact keyword match
/// scores 100, a partial match scores the covered fraction of the header
/// times 50, and a column is only assigned when its best score is strictly
/// above 30.
#[derive(Debug, Clone, Copy)]
pub struct ScoreThresholds {
    /// Score awarded for an exact keyword match (default: 100).
    pub exact: f64,
    /// Weight applied to the coverage fraction of a partial match
    /// (default: 50).
    pub partial_weight: f64,
    /// Minimum score, exclusive, for an assignment to be accepted
    /// (default: 30).
    pub accept: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            exact: 100.0,
            partial_weight: 50.0,
            accept: 30.0,
        }
    }
}

impl ScoreThresholds {
    /// Thresholds that only accept exact or near-complete keyword coverage.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            accept: 45.0,
            ..Self::default()
        }
    }

    /// Thresholds that admit weaker partial matches for exploratory runs.
    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            accept: 10.0,
            ..Self::default()
        }
    }

    /// True when a best score qualifies for assignment.
    #[must_use]
    pub fn accepts(&self, score: f64) -> bool {
        score > self.accept
    }
}

/// An accepted column assignment with its detection score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMatch {
    pub column: RequiredColumn,
    /// Header exactly as it appeared in the input.
    pub header: String,
    pub score: f64,
}

/// Result of a detection run.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    /// All ten columns with their assignments (empty string when undetected).
    pub mapping: ColumnMapping,
    /// Accepted assignments with scores, in canonical column order.
    pub matches: Vec<ColumnMatch>,
    /// Input headers no column claimed, in input order.
    pub unmatched_headers: Vec<String>,
}

impl DetectionResult {
    /// Number of columns that received an assignment.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matches.len()
    }

    /// True when every required column was assigned a header.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_count() == RequiredColumn::ALL.len()
    }

    /// Detection score for a column, if it was assigned.
    #[must_use]
    pub fn score_for(&self, column: RequiredColumn) -> Option<f64> {
        self.matches
            .iter()
            .find(|m| m.column == column)
            .map(|m| m.score)
    }

    /// Lowest score among accepted assignments, if any.
    #[must_use]
    pub fn min_score(&self) -> Option<f64> {
        self.matches
            .iter()
            .map(|m| m.score)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }
}

/// Engine for matching spreadsheet headers to the required columns.
///
/// Detection is a pure function of the header list and the fixed keyword
/// table: no I/O, no randomness, and the same input always produces the
/// same result. Columns are scored independently, so two columns may claim
/// the same header; the review step surfaces such duplicates instead of
/// the engine suppressing them.
///
/// # Example
///
/// ```ignore
/// use sheetlink_map::DetectionEngine;
///
/// let engine = DetectionEngine::default();
/// let result = engine.detect(&["Order Date".to_string(), "ASIN".to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectionEngine {
    thresholds: ScoreThresholds,
}

impl DetectionEngine {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> ScoreThresholds {
        self.thresholds
    }

    /// Detect the best header for each required column.
    ///
    /// For every column, each header is lowercased and tested against the
    /// column's keywords: equality scores [`ScoreThresholds::exact`] and
    /// stops further keyword tests for that header; containment scores the
    /// keyword's share of the header times
    /// [`ScoreThresholds::partial_weight`]. The best header per column is
    /// tracked with strictly-greater updates, so the earliest header wins
    /// ties. A column is assigned only when its best score is strictly
    /// above [`ScoreThresholds::accept`]; otherwise it stays empty.
    pub fn detect(&self, headers: &[String]) -> DetectionResult {
        let mut mapping = ColumnMapping::new();
        let mut matches = Vec::new();
        let mut claimed = vec![false; headers.len()];

        for column in RequiredColumn::ALL {
            let mut best: Option<(usize, f64)> = None;
            for (index, header) in headers.iter().enumerate() {
                let score = self.score_header(column, header);
                let improved = match best {
                    Some((_, best_score)) => score > best_score,
                    None => score > 0.0,
                };
                if improved {
                    best = Some((index, score));
                }
            }
            if let Some((index, score)) = best
                && self.thresholds.accepts(score)
            {
                mapping.set(column, headers[index].clone());
                claimed[index] = true;
                matches.push(ColumnMatch {
                    column,
                    header: headers[index].clone(),
                    score,
                });
            }
        }

        let unmatched_headers = headers
            .iter()
            .enumerate()
            .filter(|(index, _)| !claimed[*index])
            .map(|(_, header)| header.clone())
            .collect();

        DetectionResult {
            mapping,
            matches,
            unmatched_headers,
        }
    }

    /// Score one header against one column's keyword list.
    fn score_header(&self, column: RequiredColumn, header: &str) -> f64 {
        let lowered = header.to_lowercase();
        let header_len = lowered.chars().count();
        let mut score = 0.0_f64;

        for pattern in column_patterns(column) {
            if lowered == *pattern {
                // Best possible score for this header; stop testing keywords.
                return self.thresholds.exact;
            }
            if header_len > 0 && lowered.contains(pattern) {
                let coverage = pattern.chars().count() as f64 / header_len as f64;
                let partial = coverage * self.thresholds.partial_weight;
                if partial > score {
                    score = partial;
                }
            }
        }
        score
    }
}

/// Detect a mapping with the default thresholds.
///
/// Never fails: an empty or unrecognizable header list simply yields a
/// mapping with all ten columns unassigned.
pub fn detect_mapping(headers: &[String]) -> ColumnMapping {
    DetectionEngine::default().detect(headers).mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|h| (*h).to_string()).collect()
    }

    #[test]
    fn exact_match_scores_full_points() {
        let engine = DetectionEngine::default();
        let result = engine.detect(&headers(&["Date"]));
        assert_eq!(result.mapping.get(RequiredColumn::Date), "Date");
        assert_eq!(result.score_for(RequiredColumn::Date), Some(100.0));
    }

    #[test]
    fn partial_match_scores_coverage_fraction() {
        let engine = DetectionEngine::default();
        // "bundle" covers 6 of 7 chars: 6/7 * 50 ≈ 42.86.
        let result = engine.detect(&headers(&["Bundles"]));
        let score = result.score_for(RequiredColumn::UnitsInBundle).unwrap();
        assert!((score - 6.0 / 7.0 * 50.0).abs() < 1e-9);
        assert_eq!(result.mapping.get(RequiredColumn::UnitsInBundle), "Bundles");
    }

    #[test]
    fn score_exactly_at_threshold_is_rejected() {
        let engine = DetectionEngine::default();
        // "bundle" covers 6 of 10 chars: exactly 30, which does not qualify.
        let result = engine.detect(&headers(&["bundle-box"]));
        assert_eq!(result.mapping.get(RequiredColumn::UnitsInBundle), "");
        assert_eq!(result.unmatched_headers, vec!["bundle-box".to_string()]);
    }

    #[test]
    fn first_header_wins_score_ties() {
        let engine = DetectionEngine::default();
        let result = engine.detect(&headers(&["Purchase Date", "purchase date"]));
        assert_eq!(result.mapping.get(RequiredColumn::Date), "Purchase Date");
    }

    #[test]
    fn empty_input_yields_empty_mapping() {
        let mapping = detect_mapping(&[]);
        assert_eq!(mapping.assigned_count(), 0);
        for column in RequiredColumn::ALL {
            assert_eq!(mapping.get(column), "");
        }
    }

    #[test]
    fn relaxed_thresholds_allow_shared_headers() {
        // "Buy Price" is an exact COGS keyword and a partial Sale Price
        // match (5/9 * 50 ≈ 27.8), which only the relaxed profile accepts.
        let strictish = DetectionEngine::default().detect(&headers(&["Buy Price"]));
        assert_eq!(strictish.mapping.get(RequiredColumn::Cogs), "Buy Price");
        assert_eq!(strictish.mapping.get(RequiredColumn::SalePrice), "");

        let relaxed = DetectionEngine::new(ScoreThresholds::relaxed());
        let result = relaxed.detect(&headers(&["Buy Price"]));
        assert_eq!(result.mapping.get(RequiredColumn::Cogs), "Buy Price");
        assert_eq!(result.mapping.get(RequiredColumn::SalePrice), "Buy Price");
    }

    #[test]
    fn strict_thresholds_drop_weak_partials() {
        // "bundles" scores ≈ 42.86, above the default accept but below strict.
        let result = DetectionEngine::new(ScoreThresholds::strict()).detect(&headers(&["Bundles"]));
        assert_eq!(result.mapping.get(RequiredColumn::UnitsInBundle), "");
    }
}
