//! Extension point for custom token-issuance flows.

use std::collections::HashMap;
use async_trait::async_trait;
use super::result::GrantValidationResult;

/// A token request for a custom grant type, after client authentication.
#[derive(Debug, Clone, Default)]
pub struct GrantValidationRequest {
    /// The `grant_type` form parameter.
    pub grant_type: String,
    /// Identifier of the authenticated client.
    pub client_id: String,
    /// Remaining form parameters of the token request.
    pub parameters: HashMap<String, String>,
}

impl GrantValidationRequest {
    /// Creates a request without parameters.
    pub fn new(grant_type: impl Into<String>, client_id: impl Into<String>) -> Self {
        GrantValidationRequest {
            grant_type: grant_type.into(),
            client_id: client_id.into(),
            parameters: HashMap::new(),
        }
    }

    /// Adds a form parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Looks up a form parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

/// Trait for validating one custom grant type.
///
/// Rejections are returned as error results, not as `Err`.
#[async_trait]
pub trait GrantValidator: Send + Sync + 'static {
    /// The `grant_type` value this validator handles.
    fn grant_type(&self) -> &str;

    /// Validates the request asynchronously.
    async fn validate(&self, request: &GrantValidationRequest) -> GrantValidationResult;
}
