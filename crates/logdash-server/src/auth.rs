//! Bearer token authentication for the `/logged` routes.
//!
//! Tokens are HS256 JWTs. The user id is read from the `userID` claim, falling
//! back to `sub`. An `exp` claim is honoured when present but not required.

use std::fmt;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Claims read from a bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id as issued by the login service.
    #[serde(rename = "userID", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Standard subject claim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Identity attached to an authenticated request as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The token's user id, if it carried one.
    pub user_id: Option<String>,
}

/// Verifies HS256 bearer tokens against a shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier for tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies the signature and expiry of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Unauthorized`] if verification fails.
    pub fn verify(&self, token: &str) -> ServerResult<AuthenticatedUser> {
        let data = decode::<TokenClaims>(token, &self.key, &self.validation)
            .map_err(|e| ServerError::Unauthorized(e.to_string()))?;
        Ok(AuthenticatedUser {
            user_id: data.claims.user_id.or(data.claims.sub),
        })
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Middleware guarding protected routes.
///
/// Passes every request through when authentication is disabled.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(verifier) = state.verifier() else {
        return next.run(request).await;
    };

    let verified = match bearer_token(request.headers()) {
        Some(token) => verifier.verify(token),
        None => Err(ServerError::MissingToken),
    };

    match verified {
        Ok(user) => {
            debug!(user_id = ?user.user_id, "authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => state.reject(err).into_response(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    pub(crate) fn sign(secret: &str, claims: &TokenClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_verify_reads_user_id_claim() {
        let verifier = TokenVerifier::new("secret");
        let token = sign(
            "secret",
            &TokenClaims {
                user_id: Some("u-42".to_string()),
                ..TokenClaims::default()
            },
        );

        let user = verifier.verify(&token).unwrap();
        assert_eq!(user.user_id.as_deref(), Some("u-42"));
    }

    #[test]
    fn test_verify_falls_back_to_subject() {
        let verifier = TokenVerifier::new("secret");
        let token = sign(
            "secret",
            &TokenClaims {
                sub: Some("alice".to_string()),
                ..TokenClaims::default()
            },
        );

        assert_eq!(verifier.verify(&token).unwrap().user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let verifier = TokenVerifier::new("secret");
        let token = sign("other", &TokenClaims::default());

        assert!(matches!(verifier.verify(&token), Err(ServerError::Unauthorized(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let verifier = TokenVerifier::new("secret");
        let token = sign(
            "secret",
            &TokenClaims {
                user_id: Some("u-1".to_string()),
                exp: Some(Utc::now().timestamp() - 3600),
                ..TokenClaims::default()
            },
        );

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let verifier = TokenVerifier::new("secret");
        assert!(verifier.verify("not-a-jwt").is_err());
    }
}
