//! Setup flow state for SheetLink onboarding.
//!
//! [`SetupFlow`] describes which steps an account goes through and in what
//! order. [`StepTracker`] holds the position within that flow, auto-advancing
//! to the first incomplete step until the user takes over navigation.
//! Completion is always read from an [`sheetlink_model::AccountSession`]
//! supplied by the caller, never stored here.

pub mod steps;
pub mod tracker;

pub use steps::{SetupFlow, SetupStep};
pub use tracker::{NavigationMode, StepDescriptor, StepStage, StepTracker};
