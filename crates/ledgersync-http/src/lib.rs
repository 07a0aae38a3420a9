//! Ledgersync HTTP — route classification, the enforcement middleware
//! run before every handler, and the authentication endpoints.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use ledgersync_auth::config::AuthConfig;
use ledgersync_auth::provision::OnboardingService;
use ledgersync_auth::service::AuthService;
use ledgersync_core::store::{AccountStore, ProvisioningStore, TenantStore};

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::ApiError;
pub use routes::{RouteClass, RouteTable};

/// Shared application state: services, token config, route tables.
///
/// All of it is read-only after startup; requests share it freely.
pub struct ApiState<A: AccountStore, T: TenantStore, P: ProvisioningStore> {
    pub auth: AuthService<A, T>,
    pub onboarding: OnboardingService<P>,
    pub config: AuthConfig,
    pub routes: RouteTable,
}

/// Build the application router with the enforcement middleware applied
/// to every route, including the fallback (unknown paths are protected
/// by default).
pub fn router<A, T, P>(state: Arc<ApiState<A, T, P>>) -> Router
where
    A: AccountStore + 'static,
    T: TenantStore + 'static,
    P: ProvisioningStore + 'static,
{
    Router::new()
        .route("/api/auth/signin", post(handlers::sign_in::<A, T, P>))
        .route("/api/auth/signout", post(handlers::sign_out))
        .route("/api/auth/signup", post(handlers::sign_up::<A, T, P>))
        .route("/api/me", get(handlers::me))
        .route("/healthz", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::enforce::<A, T, P>,
        ))
        .with_state(state)
}
