//! State machine for a single validation attempt
//!
//! One instance per widget session. Every new run replaces the state
//! wholesale; settled states are never merged with earlier ones. Overlapping
//! runs are not queued or cancelled - the attempt that settles last wins.

use crate::gateway::GatewayResult;
use crate::types::ValidationReport;

/// Message shown when the controller reports failure without a detail
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// State of the current validation attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunState {
    /// No run has been requested yet
    #[default]
    Idle,
    /// A run is in flight
    Running,
    /// The controller completed the check
    Succeeded(ValidationReport),
    /// The run failed, in-band or at the transport
    Failed(String),
}

impl RunState {
    /// Enter the running state for a fresh attempt
    pub fn begin(&mut self) {
        *self = RunState::Running;
    }

    /// Settle the attempt from the remote call's outcome.
    ///
    /// A payload with `success == false` is a business-level failure carried
    /// in-band; its message wins, falling back to a generic one. A rejected
    /// call settles with the best message the error can offer.
    pub fn settle(&mut self, outcome: GatewayResult<ValidationReport>) {
        *self = match outcome {
            Ok(report) if report.success => RunState::Succeeded(report),
            Ok(report) => RunState::Failed(
                report
                    .error_message
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            ),
            Err(err) => RunState::Failed(err.user_message()),
        };
    }

    /// Whether a run is in flight
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// Whether the attempt has settled, successfully or not
    #[must_use]
    pub fn has_concluded(&self) -> bool {
        matches!(self, RunState::Succeeded(_) | RunState::Failed(_))
    }

    /// The successful report, when one is held
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            RunState::Succeeded(report) => Some(report),
            _ => None,
        }
    }

    /// The failure message, when the attempt failed
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            RunState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Settle a fresh attempt directly from a call outcome
impl From<GatewayResult<ValidationReport>> for RunState {
    fn from(outcome: GatewayResult<ValidationReport>) -> Self {
        let mut state = RunState::Idle;
        state.settle(outcome);
        state
    }
}
