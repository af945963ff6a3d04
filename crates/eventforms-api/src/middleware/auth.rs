//! Bearer authentication
//!
//! Tokens are HS256 JWTs minted by the external auth service with a shared
//! secret. A verified token becomes an [`AdminSession`] that handlers pass
//! explicitly to the services; nothing about the caller is kept in ambient
//! state. Logging out revokes the token id until the token would have expired
//! anyway.

use std::collections::HashMap;
use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use eventforms_core::EntityId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Administrator id
    pub sub: String,
    pub email: String,
    /// Token id, the handle used for revocation
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Request context of an authenticated administrator
#[derive(Debug, Clone)]
pub struct AdminSession {
    admin_id: EntityId,
    email: String,
    token_id: String,
    expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn admin_id(&self) -> &EntityId { &self.admin_id }
    pub fn email(&self) -> &str { &self.email }
    pub fn token_id(&self) -> &str { &self.token_id }
    pub fn expires_at(&self) -> DateTime<Utc> { self.expires_at }
}

/// Verifies bearer tokens and tracks revoked ones
pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    /// Revoked token id -> token expiry (unix seconds)
    revoked: RwLock<HashMap<String, i64>>,
}

impl Authenticator {
    pub fn new(secret: &str) -> Result<Self, ApiError> {
        if secret.is_empty() {
            return Err(ApiError::Config("jwt secret must not be empty".into()));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            revoked: RwLock::new(HashMap::new()),
        })
    }

    /// Mint a token the way the auth service does
    pub fn issue_token(&self, admin_id: &EntityId, email: &str, ttl: Duration) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            email: email.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token encoding failed: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<AdminSession, ApiError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| ApiError::Unauthorized(format!("invalid token: {e}")))?
            .claims;

        if self.revoked.read().contains_key(&claims.jti) {
            return Err(ApiError::Unauthorized("token has been revoked".into()));
        }

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| ApiError::Unauthorized("token expiry out of range".into()))?;

        Ok(AdminSession {
            admin_id: EntityId::from_string(claims.sub),
            email: claims.email,
            token_id: claims.jti,
            expires_at,
        })
    }

    /// End a session. Entries for tokens that have expired are dropped.
    pub fn revoke(&self, session: &AdminSession) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write();
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session.token_id.clone(), session.expires_at.timestamp());
        tracing::info!(admin_id = %session.admin_id, "session revoked");
    }

    pub fn revoked_count(&self) -> usize {
        self.revoked.read().len()
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".into()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed authorization header".into()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(ApiError::Unauthorized("expected a bearer token".into())),
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        state.auth.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn auth() -> Authenticator {
        Authenticator::new("test-secret").unwrap()
    }

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(Authenticator::new(""), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_issue_and_verify() {
        let auth = auth();
        let admin = EntityId::from_string("admin-1");
        let token = auth.issue_token(&admin, "lead@ecell.org", Duration::hours(8)).unwrap();

        let session = auth.verify(&token).unwrap();
        assert_eq!(session.admin_id(), &admin);
        assert_eq!(session.email(), "lead@ecell.org");
        assert!(session.expires_at() > Utc::now());
    }

    #[test]
    fn test_expired_token_rejected() {
        let auth = auth();
        let token = auth.issue_token(&EntityId::new(), "a@b.org", Duration::hours(-2)).unwrap();
        assert!(matches!(auth.verify(&token), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let other = Authenticator::new("another-secret").unwrap();
        let token = other.issue_token(&EntityId::new(), "a@b.org", Duration::hours(1)).unwrap();
        assert!(matches!(auth().verify(&token), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_revoked_token_rejected() {
        let auth = auth();
        let token = auth.issue_token(&EntityId::new(), "a@b.org", Duration::hours(1)).unwrap();
        let session = auth.verify(&token).unwrap();

        auth.revoke(&session);
        assert!(matches!(auth.verify(&token), Err(ApiError::Unauthorized(_))));
        assert_eq!(auth.revoked_count(), 1);
    }

    #[test]
    fn test_bearer_header_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(bearer_token(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc.def"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def");
    }
}
