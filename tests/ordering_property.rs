//! Property tests for the ordering invariant: whatever sequence of
//! submissions a client throws at a session, only the canonical prefix
//! commits and the structural invariants hold throughout.

mod common;

use std::sync::Arc;

use proptest::prelude::*;

use caseflow::engine::EngineError;
use caseflow::steps::StepKind;

use common::*;

fn block_on<F: std::future::Future<Output = ()>>(fut: F) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(fut);
}

/// A submission attempt: which canonical step, and whether to send blank input.
fn attempt_strategy() -> impl Strategy<Value = (usize, bool)> {
    (0usize..StepKind::COUNT, prop::bool::weighted(0.15))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn only_the_canonical_prefix_ever_commits(
        attempts in prop::collection::vec(attempt_strategy(), 0..24)
    ) {
        block_on(async move {
            let engine = engine_with(Arc::new(ScriptedGenerator::new()));
            let session = engine.initialize(TEST_CASE_ID).await.unwrap();

            let mut expected_index = 0usize;
            for (step_pos, blank) in attempts {
                let step = StepKind::SEQUENCE[step_pos];
                let input = if blank { "   " } else { "learner input" };
                let result = engine.submit(&session.session_id, step, input).await;

                let completed = expected_index == StepKind::COUNT;
                if completed {
                    assert!(matches!(
                        result,
                        Err(EngineError::SessionCompletedOrMissing { .. })
                    ));
                } else if step_pos != expected_index {
                    assert!(matches!(result, Err(EngineError::InvalidStepOrder { .. })));
                } else if blank {
                    assert!(matches!(result, Err(EngineError::EmptyInput)));
                } else {
                    let outcome = result.unwrap();
                    expected_index += 1;
                    assert_progress(&outcome.session, expected_index);
                }

                // Invariants hold after every attempt, success or failure.
                let state = engine.get_session(&session.session_id).await.unwrap();
                assert_progress(&state, expected_index);
            }
        });
    }
}
