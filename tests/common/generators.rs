use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use caseflow::cases::CaseContext;
use caseflow::feedback::{Feedback, FeedbackGenerator, GeneratorError};
use caseflow::session::StepRecord;
use caseflow::steps::StepKind;

/// Deterministic generator whose output encodes the step and call count.
///
/// Every step gets a summary update so tests can observe overwrite semantics.
#[derive(Default)]
pub struct ScriptedGenerator {
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackGenerator for ScriptedGenerator {
    async fn evaluate(
        &self,
        _case: &CaseContext,
        history: &[StepRecord],
        step: StepKind,
        learner_input: &str,
    ) -> Result<Feedback, GeneratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(
            Feedback::assessment(format!("scripted feedback for {step} (call {call})"))
                .with_summary_update(format!("summary after {step}: {learner_input}"))
                .with_details(serde_json::json!({ "history_len": history.len() })),
        )
    }
}

/// Fails the first `failures` calls with a provider error, then succeeds.
///
/// Used to exercise the no-partial-commit guarantee and idempotent retry.
pub struct FlakyGenerator {
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyGenerator {
    #[allow(dead_code)]
    pub fn failing(failures: usize) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackGenerator for FlakyGenerator {
    async fn evaluate(
        &self,
        _case: &CaseContext,
        _history: &[StepRecord],
        step: StepKind,
        _learner_input: &str,
    ) -> Result<Feedback, GeneratorError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(GeneratorError::Provider {
                provider: "flaky",
                message: format!("injected failure {call} for {step}"),
            });
        }
        Ok(Feedback::assessment(format!("recovered feedback for {step}")))
    }
}

/// Sleeps for an adjustable delay before answering.
///
/// The delay is read per call, so a test can start slow (to force a timeout
/// or to hold the per-session lock) and then drop to zero for the retry.
pub struct DelayedGenerator {
    delay_ms: Arc<AtomicU64>,
    calls: AtomicUsize,
}

impl DelayedGenerator {
    #[allow(dead_code)]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay_ms: Arc::new(AtomicU64::new(delay.as_millis() as u64)),
            calls: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn delay_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.delay_ms)
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedbackGenerator for DelayedGenerator {
    async fn evaluate(
        &self,
        _case: &CaseContext,
        _history: &[StepRecord],
        step: StepKind,
        _learner_input: &str,
    ) -> Result<Feedback, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(Feedback::assessment(format!("delayed feedback for {step}")))
    }
}
