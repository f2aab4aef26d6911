//! One authoritative copy of the account session.
//!
//! Every view reads setup progress from this store, and the store is
//! written through exactly two paths: a full refresh from `GET /api/user`
//! and targeted [`SessionPatch`]es applied after the backend confirmed
//! the matching save. A generation counter increments on every write;
//! refresh responses that began before a later write carry an old
//! generation and are discarded instead of clobbering it.

use tracing::debug;

use sheetlink_model::{AccountSession, FileUploadStatus};

use crate::client::ApiClient;
use crate::error::Result;

/// Handle identifying a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(usize);

/// Proof that a refresh began at a particular store generation.
///
/// Obtained from [`SessionStore::begin_refresh`] before the network call
/// and redeemed with [`SessionStore::complete_refresh`] afterwards.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct RefreshTicket {
    generation: u64,
}

/// Targeted session mutations, applied only after the backend confirmed
/// the matching save.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPatch {
    ProfileConfigured,
    GoogleLinked,
    SheetConfigured,
    Uploads(FileUploadStatus),
    SheetSelection {
        spreadsheet_id: String,
        worksheet_title: String,
    },
}

/// Holds the session and fans out changes to subscribers.
pub struct SessionStore {
    session: Option<AccountSession>,
    generation: u64,
    next_subscriber: usize,
    subscribers: Vec<(SubscriberId, Box<dyn Fn(&AccountSession)>)>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            session: None,
            generation: 0,
            next_subscriber: 0,
            subscribers: Vec::new(),
        }
    }

    /// The current session, if one has been loaded.
    pub fn session(&self) -> Option<&AccountSession> {
        self.session.as_ref()
    }

    /// Write counter. Increments on every install and patch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetch the session and install it. This is the only call sites
    /// should use to load session state from the backend.
    pub fn refresh(&mut self, client: &ApiClient) -> Result<AccountSession> {
        let ticket = self.begin_refresh();
        let session = client.fetch_session()?;
        self.complete_refresh(ticket, session.clone());
        Ok(session)
    }

    /// Capture the current generation ahead of a refresh. Use the split
    /// `begin`/`complete` pair when other work runs between the two.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Install a fetched session, unless the store changed since the
    /// ticket was issued. Returns whether the response was installed.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, session: AccountSession) -> bool {
        if ticket.generation != self.generation {
            debug!(
                began_at = ticket.generation,
                now = self.generation,
                "discarding stale session response"
            );
            return false;
        }
        self.install(session);
        true
    }

    /// Apply a confirmed mutation. Returns `false` when no session is
    /// loaded, in which case nothing changes.
    pub fn apply(&mut self, patch: SessionPatch) -> bool {
        let Some(mut session) = self.session.take() else {
            debug!(?patch, "patch ignored, no session loaded");
            return false;
        };
        match patch {
            SessionPatch::ProfileConfigured => session.profile_configured = true,
            SessionPatch::GoogleLinked => session.google_linked = true,
            SessionPatch::SheetConfigured => session.sheet_configured = true,
            SessionPatch::Uploads(status) => session.upload_status = Some(status),
            SessionPatch::SheetSelection {
                spreadsheet_id,
                worksheet_title,
            } => {
                session.user_record.sheet_id = Some(spreadsheet_id);
                session.user_record.worksheet_title = Some(worksheet_title);
            }
        }
        self.install(session);
        true
    }

    /// Drop the session, for sign-out or an expired cookie. Subscribers
    /// are not called; there is no session to hand them.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.session = None;
    }

    /// Register a subscriber called after every install and patch.
    pub fn subscribe(&mut self, subscriber: impl Fn(&AccountSession) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn install(&mut self, session: AccountSession) {
        self.generation += 1;
        self.session = Some(session);
        self.notify();
    }

    fn notify(&self) {
        if let Some(session) = &self.session {
            for (_, subscriber) in &self.subscribers {
                subscriber(session);
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
