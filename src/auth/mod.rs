//! Bearer-token verification.
//!
//! Token issuance (login, refresh, password handling) lives in the external
//! auth service; this backend only verifies HS256 tokens signed with the
//! shared secret and resolves the caller's identity and role from the claims.
//!
//! # Security
//! - The signing secret is wrapped in `SecretString` and never logged
//! - Algorithm is pinned to HS256, no fallback
//! - Generic error messages to clients

pub mod extractor;

pub use extractor::AuthUser;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{AuthenticatedUser, Role};

/// Claims carried by tokens from the auth service.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    /// User id (experiments reference owners by this id).
    pub uid: i32,
    /// Role at issuance time.
    pub role: String,
    /// Expiry (validated by jsonwebtoken).
    pub exp: usize,
}

/// Require the caller to rank at least `min` in the role hierarchy.
pub fn require_minimum_role(user: &AuthenticatedUser, min: Role) -> AppResult<()> {
    if user.role.has_at_least(min) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "Operation requires at least the {} role",
            min.as_str()
        )))
    }
}

/// Verifies bearer tokens against the configured shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    secret: SecretString,
}

impl TokenVerifier {
    pub fn new(secret: SecretString) -> Self {
        TokenVerifier { secret }
    }

    /// Verify a token and resolve the authenticated caller.
    pub fn verify(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let key = DecodingKey::from_secret(self.secret.expose_secret().as_bytes());
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            tracing::debug!("Token verification failed: {}", e);
            AppError::Unauthorized(
                "Invalid token, please regenerate using the auth service".to_string(),
            )
        })?;

        let role = Role::parse(&data.claims.role)
            .ok_or_else(|| AppError::Unauthorized("Token carries an unknown role".to_string()))?;

        Ok(AuthenticatedUser {
            id: data.claims.uid,
            username: data.claims.sub,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn issue(secret: &str, uid: i32, role: &str, exp: i64) -> String {
        let claims = serde_json::json!({
            "sub": "alice",
            "uid": uid,
            "role": role,
            "exp": exp,
        });
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn far_future() -> i64 {
        chrono::Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_require_minimum_role() {
        let user = AuthenticatedUser {
            id: 1,
            username: "alice".to_string(),
            role: Role::User,
        };
        assert!(require_minimum_role(&user, Role::User).is_ok());
        assert!(matches!(
            require_minimum_role(&user, Role::Admin),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_verify_valid_token() {
        let verifier = TokenVerifier::new(SecretString::from("s3cret"));
        let token = issue("s3cret", 42, "user", far_future());

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.id, 42);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let verifier = TokenVerifier::new(SecretString::from("s3cret"));
        let token = issue("other-secret", 42, "user", far_future());

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_verify_rejects_unknown_role() {
        let verifier = TokenVerifier::new(SecretString::from("s3cret"));
        let token = issue("s3cret", 42, "root", far_future());

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = TokenVerifier::new(SecretString::from("s3cret"));
        let token = issue("s3cret", 42, "user", chrono::Utc::now().timestamp() - 3600);

        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
