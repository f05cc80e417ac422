//! Authenticated principal built from a claim set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::claims::{claim_types, Claim, ClaimValueType};

/// A named identity wrapping an ordered claim set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsIdentity {
    /// How the identity was authenticated (the custom grant type for grant results).
    pub authentication_type: String,
    claims: Vec<Claim>,
}

impl ClaimsIdentity {
    /// Creates an identity from claims, kept in the given order.
    pub fn new<I>(authentication_type: impl Into<String>, claims: I) -> Self
    where
        I: IntoIterator<Item = Claim>,
    {
        ClaimsIdentity {
            authentication_type: authentication_type.into(),
            claims: claims.into_iter().collect(),
        }
    }

    /// The claims of this identity.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }
}

/// An authenticated subject as seen by the token-issuance pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsPrincipal {
    identity: ClaimsIdentity,
}

impl ClaimsPrincipal {
    /// Wraps an identity.
    pub fn new(identity: ClaimsIdentity) -> Self {
        ClaimsPrincipal { identity }
    }

    pub fn identity(&self) -> &ClaimsIdentity {
        &self.identity
    }

    pub fn claims(&self) -> &[Claim] {
        self.identity.claims()
    }

    /// First claim of the given type.
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims().iter().find(|c| c.claim_type == claim_type)
    }

    /// Whether a claim with exactly this type and value exists.
    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims().iter().any(|c| c.is(claim_type, value))
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.value_of(claim_types::SUBJECT)
    }

    pub fn authentication_method(&self) -> Option<&str> {
        self.value_of(claim_types::AUTHENTICATION_METHOD)
    }

    pub fn identity_provider(&self) -> Option<&str> {
        self.value_of(claim_types::IDENTITY_PROVIDER)
    }

    /// The `auth_time` claim as a UTC instant, if present and a valid epoch second count.
    pub fn authentication_time(&self) -> Option<DateTime<Utc>> {
        self.value_of(claim_types::AUTHENTICATION_TIME)
            .and_then(|v| v.parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    /// Protocol claims the pipeline relies on that this principal lacks.
    ///
    /// Principals assembled from a subject always return an empty list; passthrough
    /// principals may not.
    pub fn missing_protocol_claims(&self) -> Vec<&'static str> {
        [claim_types::SUBJECT, claim_types::AUTHENTICATION_METHOD]
            .into_iter()
            .filter(|t| self.find_first(t).is_none())
            .collect()
    }

    /// Projects the claims into a JSON object.
    ///
    /// Integer and boolean claims become JSON numbers/booleans when they parse,
    /// JSON-typed claims are embedded, and repeated claim types collapse into arrays.
    pub fn to_json(&self) -> Value {
        let mut grouped: Vec<(&str, Vec<Value>)> = Vec::new();
        for claim in self.claims() {
            let value = json_value(claim);
            match grouped.iter_mut().find(|(claim_type, _)| *claim_type == claim.claim_type) {
                Some((_, values)) => values.push(value),
                None => grouped.push((&claim.claim_type, vec![value])),
            }
        }
        // Only repeats collapse into an array; a single JSON array value stays nested as is.
        let map: Map<String, Value> = grouped
            .into_iter()
            .map(|(claim_type, mut values)| {
                let value = if values.len() == 1 { values.remove(0) } else { Value::Array(values) };
                (claim_type.to_owned(), value)
            })
            .collect();
        Value::Object(map)
    }

    fn value_of(&self, claim_type: &str) -> Option<&str> {
        self.find_first(claim_type).map(|c| c.value.as_str())
    }
}

impl From<ClaimsIdentity> for ClaimsPrincipal {
    fn from(identity: ClaimsIdentity) -> Self {
        ClaimsPrincipal::new(identity)
    }
}

fn json_value(claim: &Claim) -> Value {
    let text = || Value::String(claim.value.clone());
    match claim.value_type {
        ClaimValueType::Integer => claim.value.parse::<i64>().map(Value::from).unwrap_or_else(|_| text()),
        ClaimValueType::Boolean => claim.value.parse::<bool>().map(Value::Bool).unwrap_or_else(|_| text()),
        ClaimValueType::Json => serde_json::from_str(&claim.value).unwrap_or_else(|_| text()),
        _ => text(),
    }
}
