//! Custom grant validation primitives: error vocabulary, claims, principals and results.

pub mod claims;
pub mod clock;
pub mod errors;
pub mod principal;
pub mod registry;
pub mod result;
pub mod validator;
