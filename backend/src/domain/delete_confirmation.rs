//! Two-step delete control shown next to each job on the profile page.
//!
//! The first press arms the control and offers confirm or cancel. Only the
//! confirm press issues the delete; whatever the result, the control falls
//! back to idle. One control exists per job row, so arming one row never
//! affects another.

use tracing::error;

use super::ports::ProfileCommand;
use super::{JobId, UserId};

/// Message shown when the delete call fails.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete job";

/// Where a control is in its two-step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    Idle,
    Confirming,
    Deleting,
}

/// Delete control for one job row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteJobControl {
    job_id: JobId,
    phase: DeletePhase,
    failure: Option<&'static str>,
}

impl DeleteJobControl {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            phase: DeletePhase::Idle,
            failure: None,
        }
    }

    pub fn phase(&self) -> DeletePhase {
        self.phase
    }

    /// Message from the last failed attempt, cleared when re-armed.
    pub fn failure(&self) -> Option<&'static str> {
        self.failure
    }

    /// First press: idle to confirming.
    pub fn arm(&mut self) -> bool {
        if self.phase != DeletePhase::Idle {
            return false;
        }
        self.phase = DeletePhase::Confirming;
        self.failure = None;
        true
    }

    /// Back out of a pending confirmation without deleting.
    pub fn cancel(&mut self) -> bool {
        if self.phase != DeletePhase::Confirming {
            return false;
        }
        self.phase = DeletePhase::Idle;
        true
    }

    /// Second press. Returns the job to delete when the control was armed.
    pub fn confirm(&mut self) -> Option<JobId> {
        if self.phase != DeletePhase::Confirming {
            return None;
        }
        self.phase = DeletePhase::Deleting;
        Some(self.job_id)
    }

    /// Record the outcome of the delete call and return to idle.
    ///
    /// Returns `true` when the job was deleted and the view should refresh.
    pub fn settle<E: std::fmt::Display>(&mut self, outcome: Result<(), E>) -> bool {
        if self.phase != DeletePhase::Deleting {
            return false;
        }
        self.phase = DeletePhase::Idle;
        match outcome {
            Ok(()) => true,
            Err(err) => {
                error!(job_id = %self.job_id, error = %err, "job delete failed");
                self.failure = Some(DELETE_FAILED_MESSAGE);
                false
            }
        }
    }

    /// Confirm and perform the delete through `command`.
    ///
    /// Does nothing unless the control is armed.
    pub async fn confirm_with(&mut self, command: &dyn ProfileCommand, viewer: &UserId) -> bool {
        let Some(job_id) = self.confirm() else {
            return false;
        };
        let outcome = command.delete_job(viewer, &job_id).await;
        self.settle(outcome)
    }
}
