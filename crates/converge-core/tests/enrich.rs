mod common;

use std::time::Duration;

use common::{status_diagnostic, Scripted, Status, Step};
use converge_core::{
    enrich, wait, Diagnostic, Outcome, WaitContext, WaitError, WaitSpec, WaitState,
};

fn cluster_spec(probe: Scripted) -> WaitSpec<Scripted> {
    WaitSpec::new("test_cluster", probe)
        .pending(["CREATING"])
        .target(["ACTIVE"])
        .poll_interval(Duration::from_secs(5))
        .timeout(Duration::from_secs(60))
}

fn failed_outcome(payload: Option<Status>) -> Outcome<Status> {
    Outcome {
        payload,
        last_state: Some("FAILED".into()),
        error: Some(WaitError::UnexpectedState {
            state: "FAILED".into(),
            target: vec!["ACTIVE".into()],
        }),
        probes: 2,
        elapsed: Duration::from_secs(5),
    }
}

fn failed_status(code: Option<&str>, message: Option<&str>) -> Status {
    Status {
        state: "FAILED".into(),
        seq: 2,
        error_code: code.map(String::from),
        error_message: message.map(String::from),
    }
}

#[tokio::test(start_paused = true)]
async fn failure_diagnostic_replaces_generic_error() {
    let probe = Scripted::new([
        Step::State("CREATING"),
        Step::Failed {
            state: "FAILED",
            code: "InvalidConfig",
            message: "bad param",
        },
    ]);

    let outcome = wait(&WaitContext::new(), cluster_spec(probe))
        .await
        .enriched(status_diagnostic);

    assert_eq!(outcome.kind(), WaitState::Failure);
    assert_eq!(outcome.error.unwrap().to_string(), "InvalidConfig: bad param");
}

#[test]
fn missing_diagnostic_keeps_original_error() {
    let outcome = failed_outcome(Some(failed_status(None, None)));

    let err = enrich(&outcome, status_diagnostic).unwrap();

    assert_eq!(err, outcome.error.clone().unwrap());
    assert_eq!(err.to_string(), "unexpected state 'FAILED', wanted target 'ACTIVE'");
}

#[test]
fn failure_without_payload_is_unchanged() {
    let outcome = failed_outcome(None);
    let err = enrich(&outcome, |_: &Status| Some(Diagnostic::new("Code", "msg")));
    assert_eq!(err, outcome.error);
}

#[test]
fn success_is_never_turned_into_an_error() {
    let outcome = Outcome {
        payload: Some(failed_status(Some("Code"), Some("msg"))),
        last_state: Some("ACTIVE".into()),
        error: None,
        probes: 1,
        elapsed: Duration::ZERO,
    };

    assert_eq!(enrich(&outcome, status_diagnostic), None);
}

#[test]
fn timeout_and_cancellation_are_not_hidden() {
    let payload = Some(failed_status(Some("Code"), Some("msg")));
    for error in [
        WaitError::Timeout {
            last_state: Some("CREATING".into()),
            target: vec!["ACTIVE".into()],
            timeout: Duration::from_secs(60),
        },
        WaitError::Cancelled {
            last_state: Some("CREATING".into()),
        },
    ] {
        let outcome = Outcome {
            payload: payload.clone(),
            last_state: Some("CREATING".into()),
            error: Some(error.clone()),
            probes: 3,
            elapsed: Duration::from_secs(60),
        };
        assert_eq!(enrich(&outcome, status_diagnostic), Some(error));
    }
}

#[test]
fn enrich_is_idempotent() {
    let outcome = failed_outcome(Some(failed_status(Some("InvalidConfig"), Some("bad param"))));

    let first = enrich(&outcome, status_diagnostic).unwrap().to_string();
    let second = enrich(&outcome, status_diagnostic).unwrap().to_string();
    assert_eq!(first, second);

    let twice = outcome
        .enriched(status_diagnostic)
        .enriched(status_diagnostic);
    assert_eq!(twice.error.unwrap().to_string(), first);
}

#[test]
fn outcome_kind_follows_error() {
    let mut outcome = failed_outcome(None);
    assert_eq!(outcome.kind(), WaitState::Failure);

    outcome.error = Some(WaitError::Failed {
        code: "c".into(),
        message: "m".into(),
    });
    assert_eq!(outcome.kind(), WaitState::Failure);

    outcome.error = Some(WaitError::Cancelled { last_state: None });
    assert_eq!(outcome.kind(), WaitState::Cancelled);
    assert!(outcome.kind().is_terminal());

    outcome.error = None;
    assert_eq!(outcome.kind(), WaitState::Success);
}
