//! Claims carried by an authenticated subject.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};

/// Well-known JWT / OIDC claim type identifiers.
pub mod claim_types {
    /// Subject identifier.
    pub const SUBJECT: &str = "sub";
    /// Authentication method reference.
    pub const AUTHENTICATION_METHOD: &str = "amr";
    /// Identity provider.
    pub const IDENTITY_PROVIDER: &str = "idp";
    /// Time of authentication, seconds since the Unix epoch.
    pub const AUTHENTICATION_TIME: &str = "auth_time";
}

/// Identity provider label used for users authenticated by this server itself.
pub const LOCAL_IDENTITY_PROVIDER: &str = "local";

/// Type tag of a claim value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimValueType {
    #[default]
    String,
    Integer,
    Boolean,
    Json,
    /// Any other value type URI.
    Other(String),
}

/// A single (type, value, value-type) claim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Claim type, e.g. `sub`.
    pub claim_type: String,
    /// Claim value, always carried as text.
    pub value: String,
    /// How `value` should be interpreted.
    #[serde(default)]
    pub value_type: ClaimValueType,
}

impl Claim {
    /// Creates a string-typed claim.
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_value_type(claim_type, value, ClaimValueType::String)
    }

    /// Creates a claim with an explicit value type.
    pub fn with_value_type(
        claim_type: impl Into<String>,
        value: impl Into<String>,
        value_type: ClaimValueType,
    ) -> Self {
        Claim {
            claim_type: claim_type.into(),
            value: value.into(),
            value_type,
        }
    }

    /// Creates an integer-typed claim.
    pub fn integer(claim_type: impl Into<String>, value: i64) -> Self {
        Self::with_value_type(claim_type, value.to_string(), ClaimValueType::Integer)
    }

    /// Whether this claim has the given type and value.
    pub fn is(&self, claim_type: &str, value: &str) -> bool {
        self.claim_type == claim_type && self.value == value
    }
}

/// Removes claims that repeat an earlier (type, value) pair.
///
/// Order is preserved and the first occurrence wins, regardless of value type.
pub fn dedup_claims<I>(claims: I) -> Vec<Claim>
where
    I: IntoIterator<Item = Claim>,
{
    let mut seen: HashSet<(String, String)> = HashSet::new();
    claims
        .into_iter()
        .filter(|claim| seen.insert((claim.claim_type.clone(), claim.value.clone())))
        .collect()
}
