//! Authentication endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ledgersync_auth::service::SignInInput;
use ledgersync_auth::{provision::SignUpInput, token};
use ledgersync_core::error::CoreError;
use ledgersync_core::models::account::Identity;
use ledgersync_core::rbac::{Permission, PermissionRegistry, Role};
use ledgersync_core::store::{AccountStore, ProvisioningStore, TenantStore};

use crate::ApiState;
use crate::error::ApiError;
use crate::extract::Authenticated;
use crate::middleware::SESSION_COOKIE;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_in: i64,
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
}

fn session_cookie(token: &str, max_age: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// `POST /api/auth/signin` — verify credentials, issue a session token,
/// and set the session cookie. Every failure surfaces as the same
/// generic message.
pub async fn sign_in<A, T, P>(
    State(state): State<Arc<ApiState<A, T, P>>>,
    Json(request): Json<SignInRequest>,
) -> Result<Response, ApiError>
where
    A: AccountStore,
    T: TenantStore,
    P: ProvisioningStore,
{
    let out = state
        .auth
        .sign_in(SignInInput {
            email: request.email,
            password: request.password,
        })
        .await?;

    let body = SessionResponse {
        token: out.token.clone(),
        expires_in: out.expires_in,
        user_id: out.identity.id,
        tenant_id: out.identity.tenant_id,
        role: out.identity.role,
    };

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&out.token, out.expires_in),
        )],
        Json(body),
    )
        .into_response())
}

/// `POST /api/auth/signout` — tokens are stateless, so signing out is
/// clearing the cookie client-side; the token itself stays valid until
/// expiry.
pub async fn sign_out() -> Response {
    (
        [(header::SET_COOKIE, session_cookie("", 0))],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub company_name: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// `POST /api/auth/signup` — atomically provision tenant + owner +
/// onboarding record, then respond signed-in.
pub async fn sign_up<A, T, P>(
    State(state): State<Arc<ApiState<A, T, P>>>,
    Json(request): Json<SignUpRequest>,
) -> Result<Response, ApiError>
where
    A: AccountStore,
    T: TenantStore,
    P: ProvisioningStore,
{
    let provisioned = state
        .onboarding
        .sign_up(SignUpInput {
            tenant_name: request.company_name,
            owner_email: request.email,
            owner_name: request.name,
            password: request.password,
        })
        .await?;

    let identity = Identity::from(&provisioned.owner);
    let token = token::issue(&identity, &state.config)
        .map_err(|e| ApiError::from(CoreError::from(e)))?;
    let expires_in = state.config.session_lifetime_secs;

    let body = SessionResponse {
        token: token.clone(),
        expires_in,
        user_id: provisioned.owner.id,
        tenant_id: provisioned.owner.tenant_id,
        role: provisioned.owner.role,
    };

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&token, expires_in))],
        Json(body),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

/// `GET /api/me` — the caller's resolved context and capability set.
pub async fn me(Authenticated(context): Authenticated) -> Json<MeResponse> {
    let permissions = PermissionRegistry::global()
        .list_permissions(context.role)
        .iter()
        .copied()
        .collect();

    Json(MeResponse {
        user_id: context.user_id,
        tenant_id: context.tenant_id,
        role: context.role,
        permissions,
    })
}

pub async fn health() -> &'static str {
    "ok"
}

/// Unknown paths fall through the enforcement middleware first, so this
/// only answers authenticated (or public) traffic.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
