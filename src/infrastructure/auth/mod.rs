//! Authentication infrastructure module
//!
//! Static API keys, HS256 team tokens, Argon2 secret hashing and team login.

mod api_key_registry;
mod credentials;
mod jwt;
mod password;

pub use api_key_registry::{key_prefix, ApiKeyRegistry};
pub use credentials::{CredentialAuthenticator, LoginOutcome};
pub use jwt::{
    IssuedToken, JwtConfig, JwtTokenService, TokenClaims, TokenService, MAX_EXPIRATION_MINUTES,
    MIN_SECRET_BYTES,
};
pub use password::{Argon2Hasher, SecretHasher};
