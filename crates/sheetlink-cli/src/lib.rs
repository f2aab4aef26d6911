//! CLI library components for SheetLink.

pub mod input;
pub mod logging;
