//! Session token issuance and reading.
//!
//! The token is a signed, opaque, client-held artifact carrying
//! `{account id, role, tenant id, issued-at}` with a 30-day absolute
//! expiry. Verification is stateless: claims are trusted verbatim once
//! the signature validates, and account/tenant status is *not*
//! re-checked per read — that cost is paid once, at issuance. An account
//! deactivated mid-session therefore stays valid until its token
//! expires. Deliberate trade-off; do not "fix" without revising the
//! expiry policy.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ledgersync_core::context::RequestContext;
use ledgersync_core::models::account::Identity;
use ledgersync_core::rbac::Role;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — account ID (UUID string).
    pub sub: String,
    pub role: Role,
    /// Tenant ID (UUID string); absent for tenantless accounts.
    #[serde(default)]
    pub tenant_id: Option<String>,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp): `iat` + lifetime, absolute.
    pub exp: i64,
}

impl SessionClaims {
    /// Convert verified claims into a per-request context.
    pub fn context(&self) -> Result<RequestContext, AuthError> {
        let user_id = Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::InvalidToken(format!("bad subject: {e}")))?;
        let tenant_id = match self.tenant_id.as_deref() {
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|e| AuthError::InvalidToken(format!("bad tenant id: {e}")))?,
            ),
            None => None,
        };
        Ok(RequestContext::new(user_id, tenant_id, self.role))
    }
}

/// Issue a signed session token for a verified identity.
pub fn issue(identity: &Identity, config: &AuthConfig) -> Result<String, AuthError> {
    issue_at(identity, Utc::now().timestamp(), config)
}

/// Issue with an explicit issued-at timestamp. Expiry is always
/// `issued_at + lifetime`, never extended.
pub fn issue_at(
    identity: &Identity,
    issued_at: i64,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let claims = SessionClaims {
        sub: identity.id.to_string(),
        role: identity.role,
        tenant_id: identity.tenant_id.map(|id| id.to_string()),
        iat: issued_at,
        exp: issued_at + config.session_lifetime_secs,
    };

    let key = EncodingKey::from_secret(config.session_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Verify signature and expiry, returning the claims.
///
/// Zero clock leeway: the 30-day boundary is exact.
pub fn read(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.session_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "iat"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })
}
