//! Request-context extraction for handlers.
//!
//! Two resolution paths agree on shape: the request extension set by the
//! enforcement middleware (primary, in-process), and the propagated
//! identity headers (for consumers that only see the post-middleware
//! request). Absence of the user-id or role header means
//! "unauthenticated" — not an error; callers decide.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::HeaderMap;
use axum::http::request::Parts;

use ledgersync_core::context::RequestContext;

use crate::error::ApiError;
use crate::middleware::{ROLE_HEADER, TENANT_ID_HEADER, USER_ID_HEADER};

/// Derive a context from propagated identity headers.
pub fn context_from_headers(headers: &HeaderMap) -> Option<RequestContext> {
    let user_id = headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    let role = headers.get(ROLE_HEADER)?.to_str().ok()?.parse().ok()?;
    let tenant_id = headers
        .get(TENANT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok());

    Some(RequestContext::new(user_id, tenant_id, role))
}

fn resolve(parts: &Parts) -> Option<RequestContext> {
    parts
        .extensions
        .get::<RequestContext>()
        .cloned()
        .or_else(|| context_from_headers(&parts.headers))
}

/// Extractor proving the request carries a middleware-verified identity.
/// Rejects with 401 when none is present.
pub struct Authenticated(pub RequestContext);

impl<S: Send + Sync> FromRequestParts<S> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        resolve(parts).map(Authenticated).ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for routes that serve both anonymous and signed-in callers.
pub struct MaybeAuthenticated(pub Option<RequestContext>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuthenticated {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthenticated(resolve(parts)))
    }
}
