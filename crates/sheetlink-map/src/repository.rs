//! Draft repository for persisting in-progress sheet configurations.
//!
//! Drafts let a seller stop mid-review and pick the mapping back up later
//! without re-fetching headers. Each draft is a JSON file named
//! `{account}_{spreadsheet}.json` and carries a fingerprint of the header
//! row it was built against, so a changed sheet layout can be flagged
//! before the stale mapping is reused.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use sheetlink_model::SheetConfigRequest;

/// Directory drafts are stored in, overridable for tests and multi-profile
/// setups.
pub const DRAFT_DIR_ENV: &str = "SHEETLINK_DRAFT_DIR";

/// Resolve the draft directory from the environment, falling back to the
/// default location under the working directory.
pub fn default_draft_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DRAFT_DIR_ENV) {
        return PathBuf::from(dir);
    }
    PathBuf::from(".sheetlink").join("drafts")
}

/// A draft configuration with repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDraft {
    /// The in-progress save payload.
    #[serde(flatten)]
    pub request: SheetConfigRequest,
    /// When this draft was saved (RFC 3339).
    pub saved_at: Option<String>,
    /// Fingerprint of the header row the mapping was built against.
    pub headers_fingerprint: String,
    /// Version of the draft format.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl StoredDraft {
    pub fn new(request: SheetConfigRequest, headers: &[String]) -> Self {
        Self {
            request,
            saved_at: Some(chrono::Utc::now().to_rfc3339()),
            headers_fingerprint: headers_fingerprint(headers),
            version: default_version(),
        }
    }

    /// True when the sheet's current headers match the ones this draft was
    /// built against. A mismatch means the layout drifted since the draft
    /// was saved.
    pub fn matches_headers(&self, headers: &[String]) -> bool {
        self.headers_fingerprint == headers_fingerprint(headers)
    }
}

/// Fingerprint of a header row. Order-sensitive, since column positions
/// matter when the mapping is applied.
pub fn headers_fingerprint(headers: &[String]) -> String {
    let mut hasher = Sha256::new();
    for header in headers {
        hasher.update(header.as_bytes());
        // Separator keeps ["a b"] distinct from ["a", "b"].
        hasher.update([0x1f]);
    }
    hex::encode(hasher.finalize())
}

/// Summary of a stored draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftMetadata {
    pub account: String,
    pub spreadsheet_id: String,
    pub worksheet_title: String,
    pub file_path: PathBuf,
    pub assigned_count: usize,
    pub saved_at: Option<String>,
}

/// File-system store for draft sheet configurations.
#[derive(Debug, Clone)]
pub struct DraftRepository {
    base_dir: PathBuf,
}

impl DraftRepository {
    /// Open a repository at the given directory, creating it if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create draft repository: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Save a draft for an account and spreadsheet.
    pub fn save(
        &self,
        account: &str,
        request: &SheetConfigRequest,
        headers: &[String],
    ) -> Result<PathBuf> {
        let stored = StoredDraft::new(request.clone(), headers);
        let filename = self.draft_filename(account, &stored.request.spreadsheet_id);
        let path = self.base_dir.join(&filename);
        let json = serde_json::to_string_pretty(&stored)
            .with_context(|| format!("Failed to serialize draft for {filename}"))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write draft to {}", path.display()))?;
        tracing::debug!(path = %path.display(), "draft saved");
        Ok(path)
    }

    /// Load the draft for an account and spreadsheet, if one exists.
    pub fn load(&self, account: &str, spreadsheet_id: &str) -> Result<Option<StoredDraft>> {
        let filename = self.draft_filename(account, spreadsheet_id);
        let path = self.base_dir.join(&filename);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read draft from {}", path.display()))?;
        let stored: StoredDraft = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse draft from {}", path.display()))?;
        Ok(Some(stored))
    }

    pub fn exists(&self, account: &str, spreadsheet_id: &str) -> bool {
        let filename = self.draft_filename(account, spreadsheet_id);
        self.base_dir.join(filename).exists()
    }

    /// Delete a draft. Returns whether one existed.
    pub fn delete(&self, account: &str, spreadsheet_id: &str) -> Result<bool> {
        let filename = self.draft_filename(account, spreadsheet_id);
        let path = self.base_dir.join(&filename);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to delete draft: {}", path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// List all drafts for an account, sorted by spreadsheet id.
    pub fn list(&self, account: &str) -> Result<Vec<DraftMetadata>> {
        let prefix = format!("{}_", normalize_id(account));
        let mut drafts = Vec::new();

        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read repository: {}", self.base_dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            if !filename.starts_with(&prefix) || !filename.ends_with(".json") {
                continue;
            }

            let contents = fs::read_to_string(&path)?;
            if let Ok(stored) = serde_json::from_str::<StoredDraft>(&contents) {
                drafts.push(DraftMetadata {
                    account: account.to_string(),
                    spreadsheet_id: stored.request.spreadsheet_id.clone(),
                    worksheet_title: stored.request.worksheet_title.clone(),
                    file_path: path,
                    assigned_count: stored.request.column_mapping.assigned_count(),
                    saved_at: stored.saved_at.clone(),
                });
            }
        }

        drafts.sort_by(|a, b| a.spreadsheet_id.cmp(&b.spreadsheet_id));
        Ok(drafts)
    }

    fn draft_filename(&self, account: &str, spreadsheet_id: &str) -> String {
        format!(
            "{}_{}.json",
            normalize_id(account),
            normalize_id(spreadsheet_id)
        )
    }
}

/// Normalize an ID for use in filenames. Case is preserved because
/// spreadsheet ids are case-sensitive.
fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_order_sensitive() {
        let a = headers_fingerprint(&["Date".to_string(), "ASIN".to_string()]);
        let b = headers_fingerprint(&["ASIN".to_string(), "Date".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn fingerprint_distinguishes_split_headers() {
        let joined = headers_fingerprint(&["a b".to_string()]);
        let split = headers_fingerprint(&["a".to_string(), "b".to_string()]);
        assert_ne!(joined, split);
    }

    #[test]
    fn normalize_preserves_case() {
        assert_eq!(normalize_id(" 1aB-cD/2 "), "1aB_cD_2");
    }
}
