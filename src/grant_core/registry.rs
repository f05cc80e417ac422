//! Dispatch of custom grant requests to registered validators.

use std::sync::Arc;
use dashmap::DashMap;
use tracing::{debug, instrument, warn};
use super::errors::TokenErrorReason;
use super::result::GrantValidationResult;
use super::validator::{GrantValidationRequest, GrantValidator};

/// Registry of custom grant validators keyed by grant type.
#[derive(Clone, Default)]
pub struct ExtensionGrantValidators {
    validators: Arc<DashMap<String, Arc<dyn GrantValidator>>>,
}

impl ExtensionGrantValidators {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validator, replacing any previous one for the same grant type.
    pub fn register<V: GrantValidator>(&self, validator: V) -> &Self {
        let grant_type = validator.grant_type().to_owned();
        if self.validators.insert(grant_type.clone(), Arc::new(validator)).is_some() {
            warn!(grant_type = %grant_type, "replaced extension grant validator");
        }
        self
    }

    /// Registered grant types, sorted.
    pub fn grant_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.validators.iter().map(|entry| entry.key().clone()).collect();
        types.sort();
        types
    }

    pub fn is_supported(&self, grant_type: &str) -> bool {
        self.validators.contains_key(grant_type)
    }

    /// Validates a request with the validator registered for its grant type.
    ///
    /// Unknown grant types yield an `unsupported_grant_type` error result.
    #[instrument(skip(self, request), fields(grant_type = %request.grant_type), level = "debug")]
    pub async fn validate(&self, request: &GrantValidationRequest) -> GrantValidationResult {
        // Clone out of the map so no shard lock is held across the await.
        let validator = self
            .validators
            .get(&request.grant_type)
            .map(|entry| Arc::clone(entry.value()));
        match validator {
            Some(validator) => validator.validate(request).await,
            None => {
                debug!("no validator registered");
                GrantValidationResult::from_error(TokenErrorReason::UnsupportedGrantType)
            }
        }
    }
}
