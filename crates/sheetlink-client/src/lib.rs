//! Backend API client and session store for SheetLink.
//!
//! # Overview
//!
//! The backend owns all setup-progress truth. This crate provides:
//!
//! - [`ApiClient`]: blocking, cookie-carrying HTTP client covering every
//!   endpoint the setup flow touches
//! - [`SessionStore`]: the single in-process copy of the account session,
//!   refreshed through one path and patched only after confirmed saves
//! - [`ApiError`]: one error type for the whole surface, with
//!   display-ready messages via [`ApiError::user_message`]
//!
//! A failed request never mutates the store, so a dismissed error leaves
//! the user exactly where they were.

// Core modules
pub mod client;
pub mod error;
pub mod store;

// Re-export main types for convenience
pub use client::{API_URL_ENV, ApiClient, DEFAULT_API_URL};
pub use error::{ApiError, Result};
pub use store::{RefreshTicket, SessionPatch, SessionStore, SubscriberId};
