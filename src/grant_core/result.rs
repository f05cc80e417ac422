//! Outcome of validating a custom grant.
//!
//! A grant validator returns a [`GrantValidationResult`] to the token-issuance
//! pipeline: either an authenticated subject or a token-endpoint error. Protocol
//! errors are plain data here; the pipeline turns them into HTTP responses.

use std::sync::Arc;
use tracing::{debug, warn};
use super::claims::{claim_types, dedup_claims, Claim, LOCAL_IDENTITY_PROVIDER};
use super::clock::{Clock, SystemClock};
use super::errors::{TokenErrorReason, TokenErrorResponse};
use super::principal::{ClaimsIdentity, ClaimsPrincipal};

/// Fields shared by every validation result consumed by the pipeline.
pub trait ValidationResult {
    /// Whether validation failed.
    fn is_error(&self) -> bool;

    /// Wire error code, present iff [`is_error`](Self::is_error).
    fn error(&self) -> Option<&str>;

    /// Human-readable error detail. Only ever set on errors.
    fn error_description(&self) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Error {
        reason: TokenErrorReason,
        description: Option<String>,
    },
    Subject(Arc<ClaimsPrincipal>),
}

/// Immutable result of custom grant validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantValidationResult {
    outcome: Outcome,
}

impl GrantValidationResult {
    /// Error result without a description.
    pub fn from_error(reason: TokenErrorReason) -> Self {
        Self::build_error(reason, None)
    }

    /// Error result with a human-readable description.
    pub fn from_error_with_description(reason: TokenErrorReason, description: impl Into<String>) -> Self {
        Self::build_error(reason, Some(description.into()))
    }

    /// Error result from a raw reason discriminant.
    ///
    /// # Panics
    ///
    /// Panics if `code` does not name a [`TokenErrorReason`]. An unmapped reason is a
    /// programming error and is never turned into a client-facing error code.
    pub fn from_reason_code(code: u8, description: Option<String>) -> Self {
        match TokenErrorReason::try_from(code) {
            Ok(reason) => Self::build_error(reason, description),
            Err(err) => panic!("invalid token error: {err}"),
        }
    }

    /// Success result wrapping a caller-built principal as is.
    ///
    /// The claim set is not validated or completed: the caller is responsible for
    /// including at least the `sub` and `amr` claims. Prefer
    /// [`from_subject`](Self::from_subject) or [`SubjectGrant`], which always add the
    /// protocol claims. Missing protocol claims are logged, never patched.
    ///
    /// ```
    /// use starberry_grant::{Claim, ClaimsIdentity, ClaimsPrincipal, GrantValidationResult, ValidationResult};
    ///
    /// // No `amr` claim: a warning is logged and the principal is kept unchanged.
    /// let principal = ClaimsPrincipal::new(ClaimsIdentity::new("external", vec![Claim::new("sub", "carol")]));
    /// let result = GrantValidationResult::from_principal(principal);
    ///
    /// assert!(!result.is_error());
    /// let subject = result.subject().unwrap();
    /// assert_eq!(subject.claims().len(), 1);
    /// assert!(subject.authentication_method().is_none());
    /// assert_eq!(subject.missing_protocol_claims(), vec!["amr"]);
    /// ```
    pub fn from_principal(principal: impl Into<Arc<ClaimsPrincipal>>) -> Self {
        let principal = principal.into();
        let missing = principal.missing_protocol_claims();
        if !missing.is_empty() {
            warn!(?missing, "grant validation principal lacks protocol claims");
        }
        GrantValidationResult { outcome: Outcome::Subject(principal) }
    }

    /// Success result for `subject` authenticated by the custom grant
    /// `authentication_method`, with the local identity provider and no extra claims.
    pub fn from_subject(subject: impl Into<String>, authentication_method: impl Into<String>) -> Self {
        SubjectGrant::new(subject, authentication_method).build()
    }

    /// The authenticated principal of a success result.
    pub fn subject(&self) -> Option<&Arc<ClaimsPrincipal>> {
        match &self.outcome {
            Outcome::Subject(principal) => Some(principal),
            Outcome::Error { .. } => None,
        }
    }

    /// Consumes the result, yielding the principal of a success result.
    pub fn into_subject(self) -> Option<Arc<ClaimsPrincipal>> {
        match self.outcome {
            Outcome::Subject(principal) => Some(principal),
            Outcome::Error { .. } => None,
        }
    }

    /// The rejection reason of an error result.
    pub fn reason(&self) -> Option<TokenErrorReason> {
        match &self.outcome {
            Outcome::Error { reason, .. } => Some(*reason),
            Outcome::Subject(_) => None,
        }
    }

    /// Token-endpoint JSON body for an error result.
    pub fn error_response(&self) -> Option<TokenErrorResponse> {
        match &self.outcome {
            Outcome::Error { reason, description } => Some(TokenErrorResponse {
                error: *reason,
                error_description: description.clone(),
            }),
            Outcome::Subject(_) => None,
        }
    }

    fn build_error(reason: TokenErrorReason, description: Option<String>) -> Self {
        debug!(error = reason.as_str(), description = ?description, "grant validation failed");
        GrantValidationResult {
            outcome: Outcome::Error { reason, description },
        }
    }
}

impl ValidationResult for GrantValidationResult {
    fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error { .. })
    }

    fn error(&self) -> Option<&str> {
        self.reason().map(|reason| reason.as_str())
    }

    fn error_description(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Error { description, .. } => description.as_deref(),
            Outcome::Subject(_) => None,
        }
    }
}

impl From<TokenErrorReason> for GrantValidationResult {
    fn from(reason: TokenErrorReason) -> Self {
        GrantValidationResult::from_error(reason)
    }
}

/// Claims-assembly settings for a successful grant.
///
/// Produces a principal whose claims start with `sub`, `amr`, `idp` and `auth_time`,
/// followed by the extra claims in their original order, with repeated
/// (type, value) pairs dropped.
#[derive(Debug, Clone)]
pub struct SubjectGrant {
    subject: String,
    authentication_method: String,
    identity_provider: String,
    claims: Vec<Claim>,
}

impl SubjectGrant {
    /// Starts a grant for `subject` authenticated by `authentication_method`.
    pub fn new(subject: impl Into<String>, authentication_method: impl Into<String>) -> Self {
        SubjectGrant {
            subject: subject.into(),
            authentication_method: authentication_method.into(),
            identity_provider: LOCAL_IDENTITY_PROVIDER.to_owned(),
            claims: Vec::new(),
        }
    }

    /// Appends extra claims.
    pub fn claims<I>(mut self, claims: I) -> Self
    where
        I: IntoIterator<Item = Claim>,
    {
        self.claims.extend(claims);
        self
    }

    /// Overrides the identity provider (defaults to [`LOCAL_IDENTITY_PROVIDER`]).
    pub fn identity_provider(mut self, identity_provider: impl Into<String>) -> Self {
        self.identity_provider = identity_provider.into();
        self
    }

    /// Builds the result, stamping `auth_time` from the system clock.
    pub fn build(self) -> GrantValidationResult {
        self.build_with_clock(&SystemClock)
    }

    /// Builds the result, stamping `auth_time` from `clock`.
    pub fn build_with_clock(self, clock: &dyn Clock) -> GrantValidationResult {
        let SubjectGrant { subject, authentication_method, identity_provider, claims } = self;
        let auth_time = clock.now().timestamp();

        let mandatory = [
            Claim::new(claim_types::SUBJECT, subject),
            Claim::new(claim_types::AUTHENTICATION_METHOD, authentication_method.clone()),
            Claim::new(claim_types::IDENTITY_PROVIDER, identity_provider),
            Claim::integer(claim_types::AUTHENTICATION_TIME, auth_time),
        ];
        let claims = dedup_claims(mandatory.into_iter().chain(claims));

        let identity = ClaimsIdentity::new(authentication_method, claims);
        let principal = ClaimsPrincipal::new(identity);
        debug!(
            subject = principal.subject_id(),
            amr = principal.authentication_method(),
            claims = principal.claims().len(),
            "grant validation succeeded"
        );
        GrantValidationResult {
            outcome: Outcome::Subject(Arc::new(principal)),
        }
    }
}
