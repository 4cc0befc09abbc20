//! Completion synthesis: compiling a finished session into a final report.
//!
//! Synthesis is a pure function of the session's committed history — no
//! external calls, no side effects, deterministic for the same input. The
//! engine runs it exactly once, inside the commit that transitions a session
//! to `Completed`, and attaches the result to that response; because it is
//! pure it can also be recomputed from a stored session at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::steps::StepKind;

/// Per-step entry in the final report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    pub step: StepKind,
    pub learner_input: String,
    pub overall_assessment: String,
}

/// Structured report compiled from a completed session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub case_id: String,
    pub case_title: String,
    /// Timestamp of the final commit.
    pub completed_at: DateTime<Utc>,
    /// One entry per canonical step, in order.
    pub steps: Vec<StepSummary>,
    /// The learner's accumulated summary state at completion.
    pub student_summary: Option<String>,
    /// Explicit synthesis text from the final `SELECT` step's feedback,
    /// falling back to that step's assessment.
    pub final_synthesis: String,
}

impl SessionSummary {
    /// Compile the report from a session's history.
    ///
    /// Intended for completed sessions; for a partial session the report
    /// simply covers the steps committed so far.
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        let steps = session
            .history
            .iter()
            .map(|record| StepSummary {
                step: record.step,
                learner_input: record.learner_input.clone(),
                overall_assessment: record.feedback.overall_assessment.clone(),
            })
            .collect();

        let select_record = session
            .history
            .iter()
            .find(|record| record.step == StepKind::Select);
        let final_synthesis = select_record
            .map(|record| {
                record
                    .feedback
                    .summary_update
                    .clone()
                    .unwrap_or_else(|| record.feedback.overall_assessment.clone())
            })
            .unwrap_or_default();

        let completed_at = session
            .history
            .last()
            .map(|record| record.committed_at)
            .unwrap_or(session.last_updated_at);

        Self {
            session_id: session.session_id.clone(),
            case_id: session.case.case_id.clone(),
            case_title: session.case.title.clone(),
            completed_at,
            steps,
            student_summary: session.student_summary.clone(),
            final_synthesis,
        }
    }
}
