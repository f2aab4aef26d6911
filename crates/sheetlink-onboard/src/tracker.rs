//! Step tracker: where the seller is in the setup flow and where they may
//! go next.
//!
//! The tracker keeps no completion state of its own. Completion always
//! comes from the [`AccountSession`] passed into [`StepTracker::sync`] and
//! [`StepTracker::navigate_to`]; a failed save therefore leaves the tracker
//! exactly where it was, because the session was never patched.

use serde::Serialize;

use sheetlink_model::AccountSession;

use crate::steps::{SetupFlow, SetupStep};

/// Whether the tracker follows progress or holds a manual selection.
///
/// `Manual` is a latch: it is set by a successful [`StepTracker::navigate_to`]
/// and only cleared by [`StepTracker::resume_auto`]. While latched, session
/// refreshes never move the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    Auto,
    Manual,
}

/// Sub-stage within the current step.
///
/// `MappingReview` is the column-mapping review view inside the sheet
/// configuration step. It renders as a half-step (for example 3.5) without
/// the tracker holding a fractional ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStage {
    Entry,
    MappingReview,
}

/// One row of the step indicator.
#[derive(Debug, Clone, Serialize)]
pub struct StepDescriptor {
    pub ordinal: u8,
    pub step: SetupStep,
    pub label: &'static str,
    pub completed: bool,
    pub is_valid: bool,
    pub active: bool,
}

/// Tracks the current position in a setup flow.
#[derive(Debug, Clone)]
pub struct StepTracker {
    flow: SetupFlow,
    current: u8,
    stage: StepStage,
    mode: NavigationMode,
}

impl StepTracker {
    /// Start at the first step in auto mode.
    pub fn new(flow: SetupFlow) -> Self {
        Self {
            flow,
            current: 1,
            stage: StepStage::Entry,
            mode: NavigationMode::Auto,
        }
    }

    /// Start positioned on the session's first incomplete step.
    pub fn for_session(flow: SetupFlow, session: &AccountSession) -> Self {
        let mut tracker = Self::new(flow);
        tracker.sync(session);
        tracker
    }

    pub fn flow(&self) -> &SetupFlow {
        &self.flow
    }

    pub fn current_ordinal(&self) -> u8 {
        self.current
    }

    /// The step the tracker currently points at.
    pub fn current_step(&self) -> Option<SetupStep> {
        self.flow.step_at(self.current)
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn stage(&self) -> StepStage {
        self.stage
    }

    /// Ordinal for display, rendered as a half-step during mapping review.
    pub fn display_ordinal(&self) -> f32 {
        match self.stage {
            StepStage::Entry => f32::from(self.current),
            StepStage::MappingReview => f32::from(self.current) + 0.5,
        }
    }

    /// Move to the first incomplete step, unless a manual selection is
    /// latched. Called after every session refresh or optimistic patch.
    pub fn sync(&mut self, session: &AccountSession) {
        if self.mode == NavigationMode::Manual {
            return;
        }
        let target = self.flow.first_incomplete(session);
        if target != self.current {
            tracing::debug!(from = self.current, to = target, "auto-advance");
            self.current = target;
            self.stage = StepStage::Entry;
        }
    }

    /// Jump to a step by ordinal. Permitted only when every earlier step is
    /// complete; a rejected jump changes nothing and returns `false`. A
    /// successful jump latches manual mode.
    pub fn navigate_to(&mut self, ordinal: u8, session: &AccountSession) -> bool {
        if self.flow.step_at(ordinal).is_none() {
            return false;
        }
        let prior_incomplete = self
            .flow
            .steps()
            .iter()
            .take(usize::from(ordinal) - 1)
            .any(|step| !step.is_complete(session));
        if prior_incomplete {
            tracing::debug!(ordinal, "navigation rejected, earlier step incomplete");
            return false;
        }
        self.mode = NavigationMode::Manual;
        if ordinal != self.current {
            self.current = ordinal;
            self.stage = StepStage::Entry;
        }
        true
    }

    /// Clear the manual latch and follow progress again.
    pub fn resume_auto(&mut self, session: &AccountSession) {
        self.mode = NavigationMode::Auto;
        self.sync(session);
    }

    /// Enter the column-mapping review view. Only meaningful on the sheet
    /// configuration step; anywhere else this is a no-op.
    pub fn enter_mapping_review(&mut self) -> bool {
        if self.current_step() == Some(SetupStep::SheetConfig) {
            self.stage = StepStage::MappingReview;
            true
        } else {
            false
        }
    }

    pub fn leave_mapping_review(&mut self) {
        self.stage = StepStage::Entry;
    }

    /// Project the step indicator rows. `active_form_valid` is the local
    /// validity of the form on the active step; completed state always
    /// comes from the session.
    pub fn steps(&self, session: &AccountSession, active_form_valid: bool) -> Vec<StepDescriptor> {
        self.flow
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let ordinal = index as u8 + 1;
                let active = ordinal == self.current;
                StepDescriptor {
                    ordinal,
                    step: *step,
                    label: step.label(),
                    completed: step.is_complete(session),
                    is_valid: if active { active_form_valid } else { true },
                    active,
                }
            })
            .collect()
    }
}
