//! Route enforcement middleware.
//!
//! A single-pass, order-sensitive classifier run once per request before
//! any handler:
//!
//! 1. public prefix → allow, no context resolution (an invalid token
//!    never blocks a public route);
//! 2. no valid session → redirect to sign-in with a callback parameter
//!    (web) or 401 (API);
//! 3. admin prefix without `platform_admin` → soft deny back to the
//!    landing page (web) or 403 (API);
//! 4. tenant prefix without a tenant → the distinct access-denied page
//!    (web) or 403 (API) — a structural account problem, not a
//!    privilege gap;
//! 5. otherwise inject identity into request metadata and continue.
//!
//! Client-supplied values for the identity headers are always stripped
//! first; downstream consumers may treat them as authoritative.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::{AUTHORIZATION, COOKIE, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use ledgersync_auth::token;
use ledgersync_core::context::RequestContext;
use ledgersync_core::rbac::Role;
use ledgersync_core::store::{AccountStore, ProvisioningStore, TenantStore};

use crate::ApiState;
use crate::error::ApiError;
use crate::routes::RouteClass;

/// Identity metadata headers, set exclusively by this middleware.
pub const USER_ID_HEADER: &str = "x-auth-user-id";
pub const TENANT_ID_HEADER: &str = "x-auth-tenant-id";
pub const ROLE_HEADER: &str = "x-auth-role";

/// Session cookie carrying the token for web clients.
pub const SESSION_COOKIE: &str = "ledgersync_session";

pub async fn enforce<A, T, P>(
    State(state): State<Arc<ApiState<A, T, P>>>,
    mut request: Request<Body>,
    next: Next,
) -> Response
where
    A: AccountStore + 'static,
    T: TenantStore + 'static,
    P: ProvisioningStore + 'static,
{
    let path = request.uri().path().to_owned();

    // Spoofing defense: whatever the client sent under the identity
    // header names is discarded, on every route class.
    strip_identity_headers(request.headers_mut());

    let class = state.routes.classify(&path);
    if class == RouteClass::Public {
        return next.run(request).await;
    }

    let context = session_token(request.headers())
        .and_then(|raw| match token::read(&raw, &state.config) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(%path, error = %e, "session token rejected");
                None
            }
        })
        .and_then(|claims| claims.context().ok());

    let Some(context) = context else {
        return if state.routes.is_api(&path) {
            ApiError::Unauthorized.into_response()
        } else {
            let target = format!("{}?callback={}", state.routes.sign_in_path, path);
            Redirect::to(&target).into_response()
        };
    };

    if class == RouteClass::Admin && context.role != Role::PlatformAdmin {
        tracing::warn!(user_id = %context.user_id, role = %context.role, %path, "admin route denied");
        return if state.routes.is_api(&path) {
            ApiError::Forbidden.into_response()
        } else {
            Redirect::to(&state.routes.landing_path).into_response()
        };
    }

    if class == RouteClass::Tenant
        && context.role != Role::PlatformAdmin
        && context.tenant_id.is_none()
    {
        tracing::warn!(user_id = %context.user_id, %path, "tenant route denied: no tenant attached");
        return if state.routes.is_api(&path) {
            ApiError::NoTenant.into_response()
        } else {
            Redirect::to(&state.routes.denied_path).into_response()
        };
    }

    tracing::debug!(user_id = %context.user_id, role = %context.role, %path, "request allowed");
    inject_identity(&mut request, &context);
    next.run(request).await
}

fn strip_identity_headers(headers: &mut HeaderMap) {
    headers.remove(USER_ID_HEADER);
    headers.remove(TENANT_ID_HEADER);
    headers.remove(ROLE_HEADER);
}

/// Resolve the raw session token: `Authorization: Bearer` first, then
/// the session cookie.
fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
    {
        return Some(token.to_string());
    }

    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|cookie| {
                cookie
                    .trim()
                    .strip_prefix(SESSION_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(str::to_string)
            })
        })
        .filter(|t| !t.is_empty())
}

/// Propagate the verified identity: request extension for in-process
/// handlers, overwritten headers for downstream consumers.
fn inject_identity(request: &mut Request<Body>, context: &RequestContext) {
    let headers = request.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&context.user_id.to_string()) {
        headers.insert(USER_ID_HEADER, value);
    }
    if let Some(tenant_id) = context.tenant_id
        && let Ok(value) = HeaderValue::from_str(&tenant_id.to_string())
    {
        headers.insert(TENANT_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(context.role.as_str()) {
        headers.insert(ROLE_HEADER, value);
    }

    request.extensions_mut().insert(context.clone());
}
