//! Transport-agnostic wire types for the two exposed operations.
//!
//! The engine itself defines no wire protocol; these serde shapes are the
//! request/response envelopes a binding (HTTP handler, message consumer,
//! in-process caller) serializes. This module is pure data transformation —
//! no I/O and no engine logic.

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, StepOutcome};
use crate::feedback::Feedback;
use crate::session::Session;
use crate::steps::StepKind;
use crate::summary::SessionSummary;

/// Request to create a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeRequest {
    pub case_id: String,
}

/// Response to a successful initialization: the full fresh session state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitializeResponse {
    #[serde(flatten)]
    pub session: Session,
}

impl From<Session> for InitializeResponse {
    fn from(session: Session) -> Self {
        Self { session }
    }
}

/// Request to submit one step's learner input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitStepRequest {
    pub session_id: String,
    pub step_kind: StepKind,
    pub learner_input: String,
}

/// Response to a successful submit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitStepResponse {
    /// Updated session state after the commit.
    pub session: Session,
    /// Feedback for the step just committed.
    pub feedback: Feedback,
    /// Final report, present only on the completing submit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SessionSummary>,
}

impl From<StepOutcome> for SubmitStepResponse {
    fn from(outcome: StepOutcome) -> Self {
        Self {
            session: outcome.session,
            feedback: outcome.feedback,
            summary: outcome.summary,
        }
    }
}

/// Wire-level error kind discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    CaseNotFound,
    SessionNotFound,
    SessionCompletedOrMissing,
    InvalidStepOrder,
    EmptyInput,
    GeneratorFailure,
}

/// Error envelope returned by either operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub detail: String,
}

impl From<&EngineError> for ErrorBody {
    fn from(err: &EngineError) -> Self {
        let kind = match err {
            EngineError::CaseNotFound { .. } => ErrorKind::CaseNotFound,
            EngineError::SessionNotFound { .. } => ErrorKind::SessionNotFound,
            EngineError::SessionCompletedOrMissing { .. } => ErrorKind::SessionCompletedOrMissing,
            EngineError::InvalidStepOrder { .. } => ErrorKind::InvalidStepOrder,
            EngineError::EmptyInput => ErrorKind::EmptyInput,
            EngineError::Generator(_) => ErrorKind::GeneratorFailure,
        };
        Self {
            kind,
            detail: err.to_string(),
        }
    }
}
