//! Bearer token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Verifies a raw bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HMAC-SHA256 signed tokens with a shared secret.
///
/// The claim time window uses `issued_at`/`expires_at` rather than the
/// registered `iat`/`exp` claims, so `jsonwebtoken` only checks the signature
/// and [`validate_claims`] checks the window.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl core::fmt::Debug for Hs256JwtValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtValidator").finish_non_exhaustive()
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    use crate::PrincipalId;

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn fresh_claims(now: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: PrincipalId::new(3),
            issued_at: now - Duration::seconds(5),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn accepts_token_signed_with_same_secret() {
        let now = Utc::now();
        let claims = fresh_claims(now);
        let token = mint("s3cret", &claims);

        let validator = Hs256JwtValidator::new("s3cret");
        assert_eq!(validator.validate(&token, now).unwrap(), claims);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let now = Utc::now();
        let token = mint("other", &fresh_claims(now));

        let validator = Hs256JwtValidator::new("s3cret");
        assert!(matches!(
            validator.validate(&token, now),
            Err(TokenValidationError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_expired_token_even_when_signature_is_valid() {
        let now = Utc::now();
        let token = mint("s3cret", &fresh_claims(now));

        let validator = Hs256JwtValidator::new("s3cret");
        let later = now + Duration::hours(1);
        assert_eq!(
            validator.validate(&token, later),
            Err(TokenValidationError::Expired)
        );
    }

    #[test]
    fn rejects_garbage() {
        let validator = Hs256JwtValidator::new("s3cret");
        assert!(validator.validate("not.a.jwt", Utc::now()).is_err());
    }
}
