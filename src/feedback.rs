//! Feedback generator contract.
//!
//! The generator is the engine's only non-deterministic, potentially slow
//! collaborator. It is modeled as a trait with one method and two outcomes
//! (payload or typed failure) so the engine stays deterministic and testable
//! regardless of how feedback is produced — rule-based, template, or
//! model-backed.
//!
//! The engine treats a call as all-or-nothing: no session state is committed
//! unless the generator returns `Ok`, so a failed or timed-out call can be
//! retried with the same input safely.

use async_trait::async_trait;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::cases::CaseContext;
use crate::session::StepRecord;
use crate::steps::StepKind;

/// Structured feedback for one committed step.
///
/// `overall_assessment` is the minimum contract; everything else is optional
/// and generator-specific. When `summary_update` is present the engine
/// overwrites the session's accumulated learner summary with it; when absent
/// the prior summary is left unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// The generator's assessment of the learner's submission.
    pub overall_assessment: String,
    /// Replacement text for the session's accumulated learner summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_update: Option<String>,
    /// Opaque generator-specific structure (rubric scores, citations, ...).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl Feedback {
    /// Feedback carrying only an assessment.
    #[must_use]
    pub fn assessment(text: impl Into<String>) -> Self {
        Self {
            overall_assessment: text.into(),
            summary_update: None,
            details: serde_json::Value::Null,
        }
    }

    /// Attach a learner-summary replacement.
    #[must_use]
    pub fn with_summary_update(mut self, summary: impl Into<String>) -> Self {
        self.summary_update = Some(summary.into());
        self
    }

    /// Attach opaque generator details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Failures surfaced by a feedback generator call.
///
/// All variants are transient from the engine's point of view: validation has
/// already passed, nothing was committed, and the caller may resubmit the
/// identical step.
#[derive(Debug, Error, Diagnostic)]
pub enum GeneratorError {
    /// The backing provider reported an error.
    #[error("feedback provider error ({provider}): {message}")]
    #[diagnostic(
        code(caseflow::generator::provider),
        help("The step was not committed; resubmitting the same input is safe.")
    )]
    Provider {
        provider: &'static str,
        message: String,
    },

    /// The call exceeded the engine's configured deadline.
    #[error("feedback generation timed out after {timeout:?}")]
    #[diagnostic(
        code(caseflow::generator::timeout),
        help("The step was not committed; resubmitting the same input is safe.")
    )]
    Timeout { timeout: Duration },

    /// The provider returned a payload the engine could not decode.
    #[error(transparent)]
    #[diagnostic(code(caseflow::generator::serde))]
    Serde(#[from] serde_json::Error),
}

/// External service that evaluates one learner step.
///
/// Implementations receive the full case context and the committed history so
/// feedback can build on everything the learner has produced so far.
#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    /// Evaluate a learner's submission for the given step.
    async fn evaluate(
        &self,
        case: &CaseContext,
        history: &[StepRecord],
        step: StepKind,
        learner_input: &str,
    ) -> Result<Feedback, GeneratorError>;
}

/// Deterministic template-based generator.
///
/// Produces fixed-shape feedback from the case title and step kind. Useful as
/// an offline default and for exercising the engine without a remote service;
/// real deployments substitute a model-backed implementation of
/// [`FeedbackGenerator`].
#[derive(Debug, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn prompt_for(step: StepKind) -> &'static str {
        match step {
            StepKind::Summarize => "Concise summary received. Check that pertinent negatives are included.",
            StepKind::Narrow => "Differential narrowed. Confirm the leading diagnoses are the most probable ones.",
            StepKind::Analyze => "Comparison noted. Weigh the discriminating findings between your candidates.",
            StepKind::Probe => "Good questions. Focus probing on the genuine points of uncertainty.",
            StepKind::Plan => "Management plan recorded. Verify it addresses the leading diagnosis first.",
            StepKind::Select => "Learning issue selected. Keep it specific enough to resolve in one sitting.",
        }
    }
}

#[async_trait]
impl FeedbackGenerator for TemplateGenerator {
    async fn evaluate(
        &self,
        case: &CaseContext,
        history: &[StepRecord],
        step: StepKind,
        learner_input: &str,
    ) -> Result<Feedback, GeneratorError> {
        let assessment = format!(
            "[{}] {} ({})",
            step,
            Self::prompt_for(step),
            case.title
        );
        let mut feedback = Feedback::assessment(assessment).with_details(serde_json::json!({
            "generator": "template",
            "history_len": history.len(),
            "input_chars": learner_input.chars().count(),
        }));
        // The summarize and select steps carry the learner's own synthesis
        // forward as the accumulated summary state.
        if matches!(step, StepKind::Summarize | StepKind::Select) {
            feedback = feedback.with_summary_update(learner_input.trim().to_string());
        }
        Ok(feedback)
    }
}
