//! Bearer token authentication.
//!
//! Tokens are issued elsewhere; this feature only validates them and exposes
//! the caller as an [`model::AuthenticatedUser`] request extension.

mod validator;

pub mod model;

pub use validator::JwtValidator;
