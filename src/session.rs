//! The session aggregate: one learner's run through the stepped workflow.
//!
//! A [`Session`] owns everything accumulated during the exercise: the copied
//! case context, the ordered history of committed step records, the learner's
//! accumulated summary state, and the lifecycle status. Mutation happens only
//! through the engine's commit path while the per-session lock is held, which
//! keeps the structural invariants airtight:
//!
//! - `history[i].step == StepKind::SEQUENCE[i]` for every committed index;
//! - `history.len() == current_step_index` at all times;
//! - `status == Completed` exactly when `current_step_index == StepKind::COUNT`,
//!   and never reverts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cases::CaseContext;
use crate::feedback::Feedback;
use crate::steps::StepKind;

/// Lifecycle status of a session. Monotonic: `Completed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Completed,
}

/// One committed turn: learner input paired with generated feedback.
///
/// Records are appended in canonical step order and never edited or removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Which canonical step this record commits.
    pub step: StepKind,
    /// The learner's submitted text, as validated (non-empty after trim).
    pub learner_input: String,
    /// The feedback payload returned by the generator for this step.
    pub feedback: Feedback,
    /// Commit timestamp.
    pub committed_at: DateTime<Utc>,
}

/// Aggregate root for one learner's exercise run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique identifier, generated at creation, never reused.
    pub session_id: String,
    /// Copy of the selected case, fixed for the session lifetime.
    #[serde(rename = "case_context")]
    pub case: CaseContext,
    /// Index of the next step to submit; `StepKind::COUNT` once finished.
    pub current_step_index: usize,
    /// Committed records, always exactly `current_step_index` long.
    pub history: Vec<StepRecord>,
    /// Accumulated learner summary, overwritten when feedback declares an
    /// update and left untouched otherwise.
    pub student_summary: Option<String>,
    /// Lifecycle status, `Completed` iff all six steps are committed.
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session at step zero for the given case.
    #[must_use]
    pub fn new(session_id: String, case: CaseContext) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            case,
            current_step_index: 0,
            history: Vec::new(),
            student_summary: None,
            status: SessionStatus::Active,
            created_at: now,
            last_updated_at: now,
        }
    }

    /// The next step this session will accept, or `None` once completed.
    #[must_use]
    pub fn expected_step(&self) -> Option<StepKind> {
        StepKind::at(self.current_step_index)
    }

    /// True once all six steps are committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Commit one validated step: append the record, advance the pointer,
    /// fold in any summary update, and flip to `Completed` on the final step.
    ///
    /// Callers (the engine's submit path) must already have validated that
    /// `step` is the expected next step and that the session is active.
    pub(crate) fn commit_step(&mut self, step: StepKind, learner_input: String, feedback: Feedback) {
        debug_assert_eq!(self.expected_step(), Some(step));
        debug_assert_eq!(self.status, SessionStatus::Active);

        if let Some(update) = &feedback.summary_update {
            self.student_summary = Some(update.clone());
        }
        let now = Utc::now();
        self.history.push(StepRecord {
            step,
            learner_input,
            feedback,
            committed_at: now,
        });
        self.current_step_index += 1;
        self.last_updated_at = now;
        if self.current_step_index == StepKind::COUNT {
            self.status = SessionStatus::Completed;
        }

        debug_assert_eq!(self.history.len(), self.current_step_index);
    }
}
