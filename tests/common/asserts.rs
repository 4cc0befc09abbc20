use caseflow::session::{Session, SessionStatus};
use caseflow::steps::StepKind;

/// Check the structural invariants every session must satisfy at all times.
#[allow(dead_code)]
pub fn assert_session_invariants(session: &Session) {
    assert_eq!(
        session.history.len(),
        session.current_step_index,
        "history length must track the step pointer"
    );
    for (i, record) in session.history.iter().enumerate() {
        assert_eq!(
            record.step,
            StepKind::SEQUENCE[i],
            "history must match canonical order at index {i}"
        );
    }
    assert_eq!(
        session.status == SessionStatus::Completed,
        session.current_step_index == StepKind::COUNT,
        "completed status must hold exactly at six committed steps"
    );
}

/// Assert a session has advanced to the given index and remains consistent.
#[allow(dead_code)]
pub fn assert_progress(session: &Session, expected_index: usize) {
    assert_eq!(session.current_step_index, expected_index);
    assert_session_invariants(session);
}
