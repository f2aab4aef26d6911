#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod patterns;
pub mod repository;
pub mod session;

pub use engine::{
    ColumnMatch, DetectionEngine, DetectionResult, ScoreThresholds, detect_mapping,
};
pub use error::MappingError;
pub use patterns::column_patterns;
pub use repository::{
    DRAFT_DIR_ENV, DraftMetadata, DraftRepository, StoredDraft, default_draft_dir,
    headers_fingerprint,
};
pub use session::{AssignmentSource, MappingSession, SessionSummary};
