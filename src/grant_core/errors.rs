//! Token-endpoint error vocabulary for custom grant validation.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Reasons a grant validator may reject a token request.
///
/// Discriminants follow the order of the wire-code table and are stable, so raw
/// codes coming from other layers can be converted with [`TryFrom<u8>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TokenErrorReason {
    /// Client authentication failed.
    InvalidClient = 0,
    /// The grant (code, credentials, assertion) is invalid, expired or revoked.
    InvalidGrant = 1,
    /// The request is missing a parameter or is otherwise malformed.
    InvalidRequest = 2,
    /// The requested scope is invalid or exceeds what was granted.
    InvalidScope = 3,
    /// The client may not use this grant type.
    UnauthorizedClient = 4,
    /// The grant type is not supported by the server.
    UnsupportedGrantType = 5,
}

impl TokenErrorReason {
    /// Every reason, in table order.
    pub const ALL: [TokenErrorReason; 6] = [
        TokenErrorReason::InvalidClient,
        TokenErrorReason::InvalidGrant,
        TokenErrorReason::InvalidRequest,
        TokenErrorReason::InvalidScope,
        TokenErrorReason::UnauthorizedClient,
        TokenErrorReason::UnsupportedGrantType,
    ];

    /// The OAuth2 token-endpoint error code for this reason.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TokenErrorReason::InvalidClient => "invalid_client",
            TokenErrorReason::InvalidGrant => "invalid_grant",
            TokenErrorReason::InvalidRequest => "invalid_request",
            TokenErrorReason::InvalidScope => "invalid_scope",
            TokenErrorReason::UnauthorizedClient => "unauthorized_client",
            TokenErrorReason::UnsupportedGrantType => "unsupported_grant_type",
        }
    }
}

impl fmt::Display for TokenErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value that does not name any [`TokenErrorReason`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidTokenErrorReason {
    /// Discriminant outside the table.
    Code(u8),
    /// Wire code outside the vocabulary.
    Name(String),
}

impl fmt::Display for InvalidTokenErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTokenErrorReason::Code(code) => write!(f, "invalid token error code {code}"),
            InvalidTokenErrorReason::Name(name) => write!(f, "invalid token error `{name}`"),
        }
    }
}

impl std::error::Error for InvalidTokenErrorReason {}

impl TryFrom<u8> for TokenErrorReason {
    type Error = InvalidTokenErrorReason;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TokenErrorReason::ALL
            .get(code as usize)
            .copied()
            .ok_or(InvalidTokenErrorReason::Code(code))
    }
}

impl FromStr for TokenErrorReason {
    type Err = InvalidTokenErrorReason;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenErrorReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| InvalidTokenErrorReason::Name(s.to_owned()))
    }
}

/// JSON body of a token-endpoint error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenErrorResponse {
    /// Wire error code.
    pub error: TokenErrorReason,
    /// Optional human-readable detail.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    /// Serialize to the JSON bytes written by the token endpoint.
    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
