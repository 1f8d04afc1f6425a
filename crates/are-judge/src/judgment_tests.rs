use super::*;

#[test]
fn success_carries_no_failure() {
    let judgment = Judgment::success();
    assert!(judgment.success);
    assert!(judgment.failure.is_none());
}

#[test]
fn failure_carries_its_reason() {
    let failure = JudgeFailure::EnvOracleMatching(EnvOracleMatchingFailure { oracle_event_id: EventId::from_string("evt-1") });
    let judgment = Judgment::failure(failure.clone());
    assert!(!judgment.success);
    assert_eq!(judgment.failure, Some(failure));
}
