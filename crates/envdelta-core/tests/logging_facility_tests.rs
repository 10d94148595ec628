#![allow(clippy::unwrap_used, clippy::expect_used)]

use envdelta_core::errors::{EnvDeltaError, ExErrorKind};
use envdelta_core::logging_facility::test_capture::init_test_capture;
use envdelta_core::conflict::ScriptedPrompt;
use envdelta_core::{
    detect_conflicts, log_key_decision, log_op_cancelled, log_op_end, log_op_error,
    log_op_start, merge, resolve, Choice, Resolution, ResolutionPolicy, Snapshot,
};
use envdelta_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CHOICE, FIELD_CONFLICT_COUNT,
    FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND, FIELD_KEY, FIELD_LOCAL_LEN,
    FIELD_MERGED_LEN, FIELD_REMOTE_LEN, FIELD_CANCELLED, FIELD_KEY_COUNT,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert!(start_events > 0, "Should have captured a start event");
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let events = capture.events();
    let end_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = EnvDeltaError::UnsupportedFormat {
        format: "xml".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("error event should be captured");

    assert_eq!(
        error_event.fields.get(FIELD_ERR_KIND),
        Some(&format!("{:?}", ExErrorKind::UnsupportedFormat))
    );
    assert_eq!(
        error_event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_UNSUPPORTED_FORMAT".to_string())
    );
}

#[test]
fn test_merge_logs_keys_but_never_values() {
    let capture = init_test_capture();

    let local = Snapshot::from_pairs([("LOG_TEST_SECRET", "local-value-7f3a")]).unwrap();
    let remote = Snapshot::from_pairs([("LOG_TEST_SECRET", "remote-value-9c1d")]).unwrap();

    let err = merge(&local, &remote, &Resolution::new()).unwrap_err();
    assert!(matches!(err, EnvDeltaError::UnresolvedConflict { .. }));

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let resolution = rt
        .block_on(resolve(
            &detect_conflicts(&local, &remote),
            ResolutionPolicy::AlwaysRemote,
        ))
        .unwrap();
    merge(&local, &remote, &resolution).unwrap();

    capture.assert_event_exists("merge", EVENT_START);
    capture.assert_event_exists("merge", EVENT_END_ERROR);
    capture.assert_event_exists("merge", EVENT_END);
    capture.assert_event_exists("resolve", EVENT_END);

    let key_logged = capture.count_events(|e| {
        e.fields.get(FIELD_KEY).map(String::as_str) == Some("LOG_TEST_SECRET")
            && e.fields.get(FIELD_CHOICE).map(String::as_str) == Some("takeRemote")
    });
    assert!(key_logged > 0, "merge decisions should be traced by key");

    capture.assert_never_logged("local-value-7f3a");
    capture.assert_never_logged("remote-value-9c1d");
}

#[test]
fn test_merge_events_carry_counts() {
    let capture = init_test_capture();

    let local = Snapshot::from_pairs([("COUNT_A", "1"), ("COUNT_B", "2")]).unwrap();
    let remote = Snapshot::from_pairs([("COUNT_B", "3"), ("COUNT_C", "4"), ("COUNT_D", "5")])
        .unwrap();
    let resolution: Resolution = [("COUNT_B", envdelta_core::Choice::KeepLocal)]
        .into_iter()
        .collect();
    merge(&local, &remote, &resolution).unwrap();

    let field = |e: &envdelta_core::logging_facility::CapturedEvent, name: &str| {
        e.fields.get(name).cloned()
    };
    let start = capture.count_events(|e| {
        e.op.as_deref() == Some("merge")
            && e.event.as_deref() == Some(EVENT_START)
            && field(e, FIELD_LOCAL_LEN).as_deref() == Some("2")
            && field(e, FIELD_REMOTE_LEN).as_deref() == Some("3")
    });
    let end = capture.count_events(|e| {
        e.op.as_deref() == Some("merge")
            && e.event.as_deref() == Some(EVENT_END)
            && field(e, FIELD_CONFLICT_COUNT).as_deref() == Some("1")
            && field(e, FIELD_MERGED_LEN).as_deref() == Some("4")
    });
    assert!(start > 0, "merge start should record input sizes");
    assert!(end > 0, "merge end should record conflict and output counts");
}

#[test]
fn test_log_op_error_counts_named_keys() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_keys_unique_4";

    let err = EnvDeltaError::UnresolvedConflict {
        keys: vec!["A".to_string(), "B".to_string()],
    };
    log_op_error!(op_name, err, duration_ms = 1);

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name)
            && e.fields.get(FIELD_KEY_COUNT).map(String::as_str) == Some("2")
    });
    assert_eq!(found, 1);
}

#[test]
fn test_log_key_decision_records_key_and_choice() {
    let capture = init_test_capture();
    let op_name = "test_log_key_decision_unique_5";

    log_key_decision!(op_name, "DECISION_KEY", Choice::KeepLocal);

    let found = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name)
            && e.fields.get(FIELD_KEY).map(String::as_str) == Some("DECISION_KEY")
            && e.fields.get(FIELD_CHOICE).map(String::as_str) == Some("keepLocal")
    });
    assert_eq!(found, 1);
}

#[test]
fn test_log_op_cancelled_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_cancelled_unique_6";

    log_op_cancelled!(op_name, "ABORT_KEY", duration_ms = 2);

    let events = capture.events();
    let event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name))
        .expect("cancel event should be captured");
    assert_eq!(event.level, tracing::Level::INFO);
    assert_eq!(event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(event.fields.get(FIELD_CANCELLED), Some(&"true".to_string()));
    assert_eq!(
        event.fields.get(FIELD_ERR_CODE),
        Some(&"ERR_RESOLUTION_CANCELLED".to_string())
    );
}

#[tokio::test]
async fn test_resolve_cancellation_logged_as_cancelled() {
    let capture = init_test_capture();

    let local = Snapshot::from_pairs([("CANCEL_TEST_KEY", "l-5e1b")]).unwrap();
    let remote = Snapshot::from_pairs([("CANCEL_TEST_KEY", "r-8a2c")]).unwrap();
    let prompt = ScriptedPrompt::new([None]);

    let err = resolve(
        &detect_conflicts(&local, &remote),
        ResolutionPolicy::Interactive(&prompt),
    )
    .await
    .unwrap_err();
    assert!(err.is_cancellation());

    let cancelled = capture.count_events(|e| {
        e.op.as_deref() == Some("resolve")
            && e.fields.get(FIELD_KEY).map(String::as_str) == Some("CANCEL_TEST_KEY")
            && e.fields.get(FIELD_CANCELLED).map(String::as_str) == Some("true")
    });
    assert_eq!(cancelled, 1);
    capture.assert_never_logged("l-5e1b");
    capture.assert_never_logged("r-8a2c");
}
