pub mod grant_core;

pub use grant_core::claims::{claim_types, dedup_claims, Claim, ClaimValueType, LOCAL_IDENTITY_PROVIDER};
pub use grant_core::clock::{Clock, FixedClock, SystemClock};
pub use grant_core::errors::{InvalidTokenErrorReason, TokenErrorReason, TokenErrorResponse};
pub use grant_core::principal::{ClaimsIdentity, ClaimsPrincipal};
pub use grant_core::registry::ExtensionGrantValidators;
pub use grant_core::result::{GrantValidationResult, SubjectGrant, ValidationResult};
pub use grant_core::validator::{GrantValidationRequest, GrantValidator};
