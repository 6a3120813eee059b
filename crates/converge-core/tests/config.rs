use std::time::Duration;

use converge_core::{
    from_fn, Observation, ProbeError, StateToken, Timeouts, WaitError, WaitSpec, WaitState,
};

#[test]
fn timeouts_default_to_two_hours() {
    let timeouts = Timeouts::default();
    assert_eq!(timeouts.create, Duration::from_secs(7200));
    assert_eq!(timeouts.update, Duration::from_secs(7200));
    assert_eq!(timeouts.delete, Duration::from_secs(7200));
}

#[test]
fn timeouts_deserialize_partial_seconds() {
    let timeouts: Timeouts = serde_json::from_str(r#"{"create": 60, "delete": 300}"#).unwrap();
    assert_eq!(timeouts.create, Duration::from_secs(60));
    assert_eq!(timeouts.update, Timeouts::DEFAULT);
    assert_eq!(timeouts.delete, Duration::from_secs(300));

    let json = serde_json::to_value(timeouts).unwrap();
    assert_eq!(json["create"], 60);
}

#[test]
fn spec_builder_collects_states() {
    let probe = from_fn(|| async { Ok::<_, ProbeError>(Observation::new("ACTIVE", ())) });
    let spec = WaitSpec::new("msk_cluster", probe)
        .pending(["PENDING", "UPDATE_IN_PROGRESS"])
        .target(["UPDATE_COMPLETE"]);

    assert!(spec.validate().is_ok());
    assert!(spec.is_pending(&"PENDING".into()));
    assert!(spec.is_target(&StateToken::new("UPDATE_COMPLETE")));
    assert!(!spec.is_target(&"UPDATE_FAILED".into()));
    assert_eq!(spec.target_list(), vec![StateToken::from("UPDATE_COMPLETE")]);
    assert_eq!(spec.continuous_target_occurrence, 1);
    assert!(spec.timeout.is_zero());
}

#[test]
fn validate_rejects_overlap_and_zero_occurrence() {
    let probe = from_fn(|| async { Ok::<_, ProbeError>(Observation::new("ACTIVE", ())) });
    let spec = WaitSpec::new("msk_cluster", probe)
        .pending(["ACTIVE"])
        .target(["ACTIVE"]);
    assert_eq!(
        spec.validate(),
        Err(WaitError::InvalidSpec(
            "state 'ACTIVE' is both pending and target".into()
        ))
    );

    let probe = from_fn(|| async { Ok::<_, ProbeError>(Observation::new("ACTIVE", ())) });
    let spec = WaitSpec::new("msk_cluster", probe).continuous_target_occurrence(0);
    assert!(matches!(spec.validate(), Err(WaitError::InvalidSpec(_))));
}

#[test]
fn state_token_serializes_as_plain_string() {
    let token = StateToken::from("CREATING");
    assert_eq!(serde_json::to_string(&token).unwrap(), r#""CREATING""#);
    assert_eq!(token.to_string(), "CREATING");
    assert_eq!(
        serde_json::to_string(&WaitState::Cancelled).unwrap(),
        r#""cancelled""#
    );
}
