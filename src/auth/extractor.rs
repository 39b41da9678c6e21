//! Actix-web extractor for bearer-token authentication.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use std::future::{Ready, ready};

use super::TokenVerifier;
use crate::error::ErrorResponse;
use crate::models::{AuthenticatedUser, Role};

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn extract_bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extractor that requires a valid bearer token.
///
/// Use this in handlers that require authentication:
/// ```ignore
/// async fn protected_handler(auth: AuthUser) -> impl Responder {
///     // auth.user contains the authenticated caller info
/// }
/// ```
///
/// Accounts still in the `pending` role are rejected here; every
/// authenticated endpoint requires at least the `user` role, and handlers
/// layer stricter role or ownership checks on top.
pub struct AuthUser {
    pub user: AuthenticatedUser,
}

impl FromRequest for AuthUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<web::Data<TokenVerifier>>() {
            Some(verifier) => verifier,
            None => {
                return ready(Err(AuthError {
                    message: "Internal configuration error".to_string(),
                }));
            }
        };

        let token = match extract_bearer_token(req) {
            Some(token) => token,
            None => {
                return ready(Err(AuthError {
                    message: "Missing bearer token".to_string(),
                }));
            }
        };

        match verifier.verify(token) {
            Ok(user) => {
                if !user.role.has_at_least(Role::User) {
                    return ready(Err(AuthError {
                        message: "Account is pending approval".to_string(),
                    }));
                }
                ready(Ok(AuthUser { user }))
            }
            Err(e) => ready(Err(AuthError {
                message: e.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_missing_scheme() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "abc.def.ghi"))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_extract_bearer_token_empty() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_http_request();
        assert_eq!(extract_bearer_token(&req), None);
    }

    #[test]
    fn test_auth_error_response_is_401() {
        let err = AuthError {
            message: "Missing bearer token".to_string(),
        };
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
