//! Planner services: geographic lookup, prompt composition, the chat backend
//! client, the request orchestrator and the per-session registry.

pub mod chat_client;
pub mod geo;
pub mod metrics;
pub mod orchestrator;
pub mod prompt;
pub mod sessions;

use planner_core::error::AppError;
use thiserror::Error;

pub use chat_client::{ChatBackend, ChatClientError, HttpChatClient};
pub use geo::{GeoCatalog, GeoDataError};
pub use orchestrator::PlanOutcome;
pub use prompt::{compose, ComposedPrompt};
pub use sessions::{PlannerSessions, SharedSession};

/// Reasons a plan submission is refused before anything is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("Please choose a destination city and both travel dates first!")]
    IncompleteSelection,

    #[error("The end date must not be before the start date.")]
    InvalidDateRange,

    #[error("A plan is already being generated, please wait for it to finish.")]
    RequestInFlight,
}

impl PlanError {
    /// Outcome label for the `plan_requests_total` counter.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            PlanError::IncompleteSelection => "rejected_incomplete",
            PlanError::InvalidDateRange => "rejected_invalid_dates",
            PlanError::RequestInFlight => "rejected_in_flight",
        }
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::IncompleteSelection | PlanError::InvalidDateRange => {
                AppError::Validation(err.to_string())
            }
            PlanError::RequestInFlight => AppError::Conflict(err.to_string()),
        }
    }
}
