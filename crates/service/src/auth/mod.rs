//! Auth module: turns a bearer token into the caller's capability set.
//!
//! Tokens are HS256 JWTs carrying OAuth2-style `scp` scopes and/or `roles`.
//! Scope names are mapped onto `Capability` values by `ScopeMapping`.

pub mod domain;
pub mod errors;
pub mod scopes;
pub mod verifier;

pub use domain::{Caller, Claims};
pub use errors::AuthError;
pub use scopes::ScopeMapping;
pub use verifier::TokenVerifier;
