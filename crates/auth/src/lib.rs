//! `kennywood-auth` — authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how to
//! verify a bearer token and what identity a verified token carries.

pub mod claims;
pub mod jwt;
pub mod principal;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtValidator};
pub use principal::PrincipalId;
