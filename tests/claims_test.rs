use starberry_grant::{claim_types, dedup_claims, Claim, ClaimValueType, ClaimsIdentity, ClaimsPrincipal, FixedClock, Clock};

#[test]
fn test_dedup_keeps_first_occurrence_in_order() {
    let claims = vec![
        Claim::new("role", "admin"),
        Claim::new("email", "a@example.com"),
        Claim::with_value_type("role", "admin", ClaimValueType::Other("urn:custom".into())),
        Claim::new("role", "auditor"),
        Claim::new("email", "a@example.com"),
    ];
    let deduped = dedup_claims(claims);
    assert_eq!(
        deduped,
        vec![
            Claim::new("role", "admin"),
            Claim::new("email", "a@example.com"),
            Claim::new("role", "auditor"),
        ]
    );
}

#[test]
fn test_dedup_of_empty_sequence() {
    assert!(dedup_claims(Vec::new()).is_empty());
}

#[test]
fn test_integer_claim() {
    let claim = Claim::integer(claim_types::AUTHENTICATION_TIME, 42);
    assert_eq!(claim.value, "42");
    assert_eq!(claim.value_type, ClaimValueType::Integer);
    assert!(claim.is("auth_time", "42"));
}

#[test]
fn test_principal_accessors_on_sparse_principal() {
    let principal: ClaimsPrincipal = ClaimsIdentity::new(
        "external",
        vec![Claim::new("sub", "dave"), Claim::new("auth_time", "not-a-number")],
    )
    .into();
    assert_eq!(principal.subject_id(), Some("dave"));
    assert!(principal.authentication_method().is_none());
    assert!(principal.identity_provider().is_none());
    assert!(principal.authentication_time().is_none());
    assert!(principal.find_first("email").is_none());
    assert_eq!(principal.missing_protocol_claims(), vec!["amr"]);
}

#[test]
fn test_authentication_time_parses_epoch_seconds() {
    let clock = FixedClock::from_timestamp(1_600_000_000);
    let principal = ClaimsPrincipal::new(ClaimsIdentity::new(
        "custom_otp",
        vec![Claim::integer("auth_time", clock.now().timestamp())],
    ));
    assert_eq!(principal.authentication_time(), Some(clock.now()));
}

#[test]
fn test_claim_serde_shape() {
    let claim = Claim::integer("auth_time", 7);
    let v = serde_json::to_value(&claim).unwrap();
    assert_eq!(v, serde_json::json!({ "claim_type": "auth_time", "value": "7", "value_type": "integer" }));
    let parsed: Claim = serde_json::from_str(r#"{"claim_type":"sub","value":"eve"}"#).unwrap();
    assert_eq!(parsed, Claim::new("sub", "eve"));
}

#[test]
fn test_json_projection_falls_back_to_text() {
    let principal = ClaimsPrincipal::new(ClaimsIdentity::new(
        "external",
        vec![
            Claim::with_value_type("age", "old", ClaimValueType::Integer),
            Claim::new("group", "a"),
            Claim::new("group", "b"),
            Claim::new("group", "c"),
        ],
    ));
    assert_eq!(
        principal.to_json(),
        serde_json::json!({ "age": "old", "group": ["a", "b", "c"] })
    );
}

#[test]
fn test_json_array_claim_followed_by_repeat_stays_nested() {
    let principal = ClaimsPrincipal::new(ClaimsIdentity::new(
        "external",
        vec![
            Claim::with_value_type("roles", r#"["a","b"]"#, ClaimValueType::Json),
            Claim::new("roles", "c"),
        ],
    ));
    assert_eq!(principal.to_json(), serde_json::json!({ "roles": [["a", "b"], "c"] }));

    let flat = ClaimsPrincipal::new(ClaimsIdentity::new(
        "external",
        vec![Claim::new("roles", "a"), Claim::new("roles", "b"), Claim::new("roles", "c")],
    ));
    assert_ne!(principal.to_json(), flat.to_json());
}

#[test]
fn test_two_json_array_claims_project_as_nested_arrays() {
    let principal = ClaimsPrincipal::new(ClaimsIdentity::new(
        "external",
        vec![
            Claim::with_value_type("roles", r#"["a","b"]"#, ClaimValueType::Json),
            Claim::with_value_type("roles", r#"["c","d"]"#, ClaimValueType::Json),
        ],
    ));
    assert_eq!(principal.to_json(), serde_json::json!({ "roles": [["a", "b"], ["c", "d"]] }));
}

#[test]
fn test_single_json_array_claim_is_not_wrapped() {
    let principal = ClaimsPrincipal::new(ClaimsIdentity::new(
        "external",
        vec![Claim::with_value_type("roles", r#"["a","b"]"#, ClaimValueType::Json)],
    ));
    assert_eq!(principal.to_json(), serde_json::json!({ "roles": ["a", "b"] }));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_fixed_clock_rejects_out_of_range_timestamp() {
    let _ = FixedClock::from_timestamp(i64::MAX);
}
