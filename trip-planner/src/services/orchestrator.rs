//! Request orchestration: Idle -> Pending -> Idle, one outbound call per submission.
//!
//! While a session is Pending, further submissions are refused with
//! [`PlanError::RequestInFlight`]. The session lock is never held across the
//! outbound call, so the selection stays editable while the agent works.

use super::metrics::record_plan_outcome;
use super::{compose, ChatBackend, ChatClientError, PlanError, SharedSession};
use crate::models::{ChatReply, PlannerSession, RequestPhase};
use std::sync::Arc;
use tracing::Instrument;

/// Transcript entry appended when the backend call fails for any reason.
pub const FALLBACK_REPLY: &str = "❌ Request failed, please check the backend.";

/// A submission that passed validation and now awaits the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    Replied,
    BackendFailed,
}

/// Validate, log the user's summary and enter Pending.
///
/// On error the session is left exactly as it was.
pub fn begin(session: &mut PlannerSession) -> Result<PendingRequest, PlanError> {
    begin_with_interests(session, None)
}

/// [`begin`], applying interests typed since the last edit was saved.
///
/// The interests are only stored once the submission is accepted.
pub fn begin_with_interests(
    session: &mut PlannerSession,
    interests: Option<String>,
) -> Result<PendingRequest, PlanError> {
    if session.phase == RequestPhase::Pending {
        return Err(rejected(PlanError::RequestInFlight));
    }

    let updated = interests.map(|interests| {
        let mut selection = session.selection.clone();
        selection.set_interests(interests);
        selection
    });
    let composed = compose(updated.as_ref().unwrap_or(&session.selection)).map_err(rejected)?;

    if let Some(selection) = updated {
        session.selection = selection;
    }
    session.log.push_user(composed.summary);
    session.previous_debug = session.debug.take();
    session.phase = RequestPhase::Pending;

    Ok(PendingRequest {
        prompt: composed.prompt,
    })
}

fn rejected(err: PlanError) -> PlanError {
    record_plan_outcome(err.outcome_label());
    err
}

/// Record the backend's answer (or the fallback) and return to Idle.
///
/// A failure puts back the trace that was showing before the request.
pub fn complete(
    session: &mut PlannerSession,
    result: Result<ChatReply, ChatClientError>,
) -> PlanOutcome {
    if session.phase != RequestPhase::Pending {
        tracing::warn!("Ignoring backend result for a session that is not pending");
        return match result {
            Ok(_) => PlanOutcome::Replied,
            Err(_) => PlanOutcome::BackendFailed,
        };
    }

    let outcome = match result {
        Ok(reply) => {
            session.log.push_assistant(reply.reply);
            session.debug = reply.details;
            session.previous_debug = None;
            record_plan_outcome("success");
            PlanOutcome::Replied
        }
        Err(e) => {
            tracing::warn!(error = %e, "Plan request failed");
            session.log.push_assistant(FALLBACK_REPLY);
            session.debug = session.previous_debug.take();
            record_plan_outcome("backend_error");
            PlanOutcome::BackendFailed
        }
    };
    session.phase = RequestPhase::Idle;
    outcome
}

/// Run one submission end to end.
///
/// The backend call runs on its own task so it finishes, and the session
/// leaves Pending, even if the caller goes away.
pub async fn submit(
    session: SharedSession,
    backend: Arc<dyn ChatBackend>,
) -> Result<PlanOutcome, PlanError> {
    submit_with_interests(session, backend, None).await
}

pub async fn submit_with_interests(
    session: SharedSession,
    backend: Arc<dyn ChatBackend>,
    interests: Option<String>,
) -> Result<PlanOutcome, PlanError> {
    let pending = {
        let mut guard = session.lock().await;
        begin_with_interests(&mut guard, interests)?
    };

    let task_session = session.clone();
    let task = tokio::spawn(
        async move {
            let result = backend.chat(&pending.prompt).await;
            let mut guard = task_session.lock().await;
            complete(&mut guard, result)
        }
        .instrument(tracing::Span::current()),
    );

    match task.await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            tracing::error!(error = %e, "Plan request task aborted");
            let mut guard = session.lock().await;
            Ok(complete(
                &mut guard,
                Err(ChatClientError::Network(format!("request task aborted: {}", e))),
            ))
        }
    }
}
