//! Bearer-token authentication middleware.
//!
//! Token *issuance* (login, refresh, revocation) belongs to the external
//! identity service. This module only verifies: every protected route runs
//! through [`require_auth`], which checks the `Authorization: Bearer <jwt>`
//! header against the shared secret and stashes the validated claims in
//! request extensions for handlers that care who is asking.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use jsonwebtoken::{decode, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// JWT claims structure. Only the fields this server reads; the issuer is
/// free to include more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,

    /// Expiration (Unix timestamp). Checked by validation.
    pub exp: i64,
}

/// Verifies bearer tokens against the shared signing secret.
#[derive(Clone)]
pub struct JwtVerifier {
    secret: String,
}

impl JwtVerifier {
    /// Create a new verifier over the given secret.
    pub fn new(secret: String) -> Self {
        JwtVerifier { secret }
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {e}")))?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from an authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Axum middleware guarding the protected routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = extract_bearer_token(header)
        .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".to_string()))?;

    let claims = state.jwt.validate_token(token)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn sign(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Basic dXNlcg=="), None);
        assert_eq!(extract_bearer_token(""), None);
    }

    #[test]
    fn test_valid_token_round_trip() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        let claims = Claims {
            sub: "user-001".to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };

        let token = sign("test-secret", &claims);
        let decoded = verifier.validate_token(&token).unwrap();
        assert_eq!(decoded.sub, "user-001");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        let claims = Claims {
            sub: "user-001".to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };

        let token = sign("other-secret", &claims);
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let verifier = JwtVerifier::new("test-secret".to_string());
        let claims = Claims {
            sub: "user-001".to_string(),
            exp: chrono::Utc::now().timestamp() - 3600,
        };

        let token = sign("test-secret", &claims);
        assert!(verifier.validate_token(&token).is_err());
    }
}
