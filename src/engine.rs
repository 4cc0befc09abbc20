//! The session engine: creation, lookup, and the step-processing state machine.
//!
//! [`SessionEngine`] owns the session store and the two external
//! collaborators (case catalog and feedback generator) and exposes the three
//! operations of the workflow: [`initialize`](SessionEngine::initialize),
//! [`get_session`](SessionEngine::get_session), and
//! [`submit`](SessionEngine::submit).
//!
//! # State machine
//!
//! States are `Active(0)..Active(5)` and `Completed`. A submit of the exact
//! expected step advances `Active(i)` to `Active(i + 1)` (or to `Completed`
//! from `Active(5)`); every other submit is a self-loop that returns an error
//! and leaves the session untouched. There is no transition out of
//! `Completed`.
//!
//! # Serialization discipline
//!
//! The per-session mutex is held from validation through commit, including
//! across the generator call. A duplicate request racing a slow response
//! therefore blocks until the first commit lands and is then validated
//! against the advanced step pointer, surfacing as `InvalidStepOrder` rather
//! than a duplicate history entry. Different sessions never share a lock.

use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::cases::{CaseCatalog, CatalogError};
use crate::config::EngineConfig;
use crate::feedback::{Feedback, FeedbackGenerator, GeneratorError};
use crate::session::{Session, SessionStatus};
use crate::steps::StepKind;
use crate::store::SessionStore;
use crate::summary::SessionSummary;

/// Result of one successful submit.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// The session state after the commit.
    pub session: Session,
    /// Feedback for the step just committed.
    pub feedback: Feedback,
    /// Final report, present exactly on the submit that completed the session.
    pub summary: Option<SessionSummary>,
}

/// Typed, non-fatal failures of the engine's operations.
///
/// Validation errors are detected before any external call and carry zero
/// side effects; `Generator` is the only post-validation failure and is
/// transient — the identical step may be resubmitted safely.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    /// The requested case does not exist in the catalog.
    #[error("case not found: {case_id}")]
    #[diagnostic(
        code(caseflow::engine::case_not_found),
        help("Check the case identifier against the catalog.")
    )]
    CaseNotFound { case_id: String },

    /// Lookup of an unknown session identifier.
    #[error("session not found: {session_id}")]
    #[diagnostic(code(caseflow::engine::session_not_found))]
    SessionNotFound { session_id: String },

    /// Submit against a session that is unknown or already completed.
    #[error("session completed or missing: {session_id}")]
    #[diagnostic(
        code(caseflow::engine::session_completed_or_missing),
        help("Completed sessions accept no further submissions.")
    )]
    SessionCompletedOrMissing { session_id: String },

    /// Submit of any step other than the exact next expected one.
    #[error("invalid step order: submitted {submitted}, expected {expected}")]
    #[diagnostic(
        code(caseflow::engine::invalid_step_order),
        help("Steps must be submitted in the canonical order with no skips or repeats.")
    )]
    InvalidStepOrder {
        submitted: StepKind,
        expected: StepKind,
    },

    /// Learner input was empty after trimming.
    #[error("learner input must be non-empty")]
    #[diagnostic(code(caseflow::engine::empty_input))]
    EmptyInput,

    /// The feedback generator failed or timed out; nothing was committed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Generator(#[from] GeneratorError),
}

/// Request/response engine for the stepped case-presentation workflow.
///
/// Cheap to share: wrap it in an `Arc` and call it concurrently from any
/// number of request handlers.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use caseflow::cases::{CaseContext, InMemoryCaseCatalog};
/// use caseflow::engine::SessionEngine;
/// use caseflow::feedback::TemplateGenerator;
/// use caseflow::steps::StepKind;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), caseflow::engine::EngineError> {
/// let catalog = InMemoryCaseCatalog::with_cases([CaseContext {
///     case_id: "case-001".into(),
///     title: "Chest pain".into(),
///     brief: String::new(),
///     narrative: String::new(),
///     difficulty: "intermediate".into(),
///     specialty_tags: vec![],
///     learning_objectives: vec![],
/// }]);
/// let engine = SessionEngine::new(Arc::new(catalog), Arc::new(TemplateGenerator::new()));
///
/// let session = engine.initialize("case-001").await?;
/// let outcome = engine
///     .submit(&session.session_id, StepKind::Summarize, "My summary.")
///     .await?;
/// assert_eq!(outcome.session.current_step_index, 1);
/// # Ok(())
/// # }
/// ```
pub struct SessionEngine {
    catalog: Arc<dyn CaseCatalog>,
    generator: Arc<dyn FeedbackGenerator>,
    store: SessionStore,
    config: EngineConfig,
}

impl SessionEngine {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new(catalog: Arc<dyn CaseCatalog>, generator: Arc<dyn FeedbackGenerator>) -> Self {
        Self::with_config(catalog, generator, EngineConfig::default())
    }

    /// Create an engine with explicit configuration.
    #[must_use]
    pub fn with_config(
        catalog: Arc<dyn CaseCatalog>,
        generator: Arc<dyn FeedbackGenerator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            generator,
            store: SessionStore::new(),
            config,
        }
    }

    /// Create a new session for the given case.
    ///
    /// Allocates a fresh identifier, copies the case context, and stores the
    /// session at step zero. Safe to call concurrently; distinct sessions
    /// never collide.
    #[instrument(skip(self), err)]
    pub async fn initialize(&self, case_id: &str) -> Result<Session, EngineError> {
        let case = self.catalog.lookup(case_id).await.map_err(|err| match err {
            CatalogError::CaseNotFound { case_id } => EngineError::CaseNotFound { case_id },
        })?;

        let session_id = Uuid::new_v4().to_string();
        let session = Session::new(session_id, case);
        self.store.insert(session.clone()).await;

        tracing::info!(
            session = %session.session_id,
            case = %case_id,
            "session created"
        );
        Ok(session)
    }

    /// Read-only snapshot of a session's current state.
    #[instrument(skip(self), err)]
    pub async fn get_session(&self, session_id: &str) -> Result<Session, EngineError> {
        self.store
            .get(session_id)
            .await
            .ok_or_else(|| EngineError::SessionNotFound {
                session_id: session_id.to_string(),
            })
    }

    /// Identifiers of all sessions known to this engine.
    pub async fn session_ids(&self) -> Vec<String> {
        self.store.session_ids().await
    }

    /// Submit the learner's input for one step.
    ///
    /// Validation runs in order — session active, step is the exact expected
    /// one, input non-empty after trimming — before the generator is invoked,
    /// so every validation failure has zero side effects and never spends an
    /// external call. Commit happens only after a successful generator
    /// response; a failed or timed-out call leaves the session bit-for-bit
    /// unchanged and the same input may be resubmitted.
    #[instrument(skip(self, learner_input), fields(step = %step), err)]
    pub async fn submit(
        &self,
        session_id: &str,
        step: StepKind,
        learner_input: &str,
    ) -> Result<StepOutcome, EngineError> {
        let slot = self.store.slot(session_id).await.ok_or_else(|| {
            EngineError::SessionCompletedOrMissing {
                session_id: session_id.to_string(),
            }
        })?;

        // Exclusive per-session lock, held from validation through commit.
        let mut session = slot.lock().await;

        if session.status != SessionStatus::Active {
            return Err(EngineError::SessionCompletedOrMissing {
                session_id: session_id.to_string(),
            });
        }
        let expected = session.expected_step().ok_or_else(|| {
            // Active with an exhausted step pointer cannot happen; treat it
            // as the completed case rather than panicking.
            EngineError::SessionCompletedOrMissing {
                session_id: session_id.to_string(),
            }
        })?;
        if step != expected {
            return Err(EngineError::InvalidStepOrder {
                submitted: step,
                expected,
            });
        }
        let input = learner_input.trim();
        if input.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        let feedback = self.evaluate_with_deadline(&session, step, input).await?;

        session.commit_step(step, input.to_string(), feedback.clone());
        tracing::info!(
            session = %session.session_id,
            step = %step,
            step_index = session.current_step_index,
            completed = session.is_complete(),
            "step committed"
        );

        // Synthesis runs inside the same commit, exactly once, on the
        // Active -> Completed transition.
        let summary = session
            .is_complete()
            .then(|| SessionSummary::from_session(&session));

        Ok(StepOutcome {
            session: session.clone(),
            feedback,
            summary,
        })
    }

    /// Invoke the generator under the configured deadline.
    ///
    /// Timeout is reported identically to a provider failure: surfaced to the
    /// caller with nothing committed.
    async fn evaluate_with_deadline(
        &self,
        session: &Session,
        step: StepKind,
        input: &str,
    ) -> Result<Feedback, EngineError> {
        let timeout = self.config.generator_timeout;
        match tokio::time::timeout(
            timeout,
            self.generator
                .evaluate(&session.case, &session.history, step, input),
        )
        .await
        {
            Ok(Ok(feedback)) => Ok(feedback),
            Ok(Err(err)) => {
                tracing::warn!(
                    session = %session.session_id,
                    step = %step,
                    error = %err,
                    "feedback generator failed; step not committed"
                );
                Err(EngineError::Generator(err))
            }
            Err(_) => {
                tracing::warn!(
                    session = %session.session_id,
                    step = %step,
                    ?timeout,
                    "feedback generator deadline expired; step not committed"
                );
                Err(EngineError::Generator(GeneratorError::Timeout { timeout }))
            }
        }
    }
}
