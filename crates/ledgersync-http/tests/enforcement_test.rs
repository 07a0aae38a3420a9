//! Enforcement middleware tests over a scratch router, exercising the
//! full route-gating matrix.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::routing::get;
use tower::util::ServiceExt;
use uuid::Uuid;

use ledgersync_auth::config::AuthConfig;
use ledgersync_auth::provision::OnboardingService;
use ledgersync_auth::service::AuthService;
use ledgersync_auth::token;
use ledgersync_core::models::account::Identity;
use ledgersync_core::rbac::Role;
use ledgersync_core::store::memory::MemoryStore;
use ledgersync_http::middleware::{
    ROLE_HEADER, SESSION_COOKIE, TENANT_ID_HEADER, USER_ID_HEADER, enforce,
};
use ledgersync_http::{ApiState, RouteTable};

type TestState = ApiState<Arc<MemoryStore>, Arc<MemoryStore>, Arc<MemoryStore>>;

fn test_config() -> AuthConfig {
    AuthConfig {
        session_secret: "test-secret-do-not-use-in-production".into(),
        ..Default::default()
    }
}

fn test_state() -> Arc<TestState> {
    let store = Arc::new(MemoryStore::new());
    Arc::new(ApiState {
        auth: AuthService::new(store.clone(), store.clone(), test_config()),
        onboarding: OnboardingService::new(store),
        config: test_config(),
        routes: RouteTable::default(),
    })
}

/// Echoes the identity headers the handler observed.
async fn echo(request: Request<Body>) -> String {
    let get = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string()
    };
    format!(
        "{}|{}|{}",
        get(USER_ID_HEADER),
        get(TENANT_ID_HEADER),
        get(ROLE_HEADER)
    )
}

/// Scratch app with one route per class, wrapped in the middleware.
fn app() -> Router {
    let state = test_state();
    Router::new()
        .route("/blog/{slug}", get(echo))
        .route("/app", get(echo))
        .route("/app/orders", get(echo))
        .route("/admin/tenants", get(echo))
        .route("/api/orders", get(echo))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            enforce::<Arc<MemoryStore>, Arc<MemoryStore>, Arc<MemoryStore>>,
        ))
        .with_state(state)
}

fn issue_token(role: Role, tenant_id: Option<Uuid>) -> String {
    let identity = Identity {
        id: Uuid::new_v4(),
        email: "user@example.com".into(),
        name: "User".into(),
        role,
        tenant_id,
    };
    token::issue(&identity, &test_config()).unwrap()
}

fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn public_route_allows_anonymous_and_injects_nothing() {
    let response = app()
        .oneshot(get_request("/blog/launch", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "-|-|-");
}

#[tokio::test]
async fn public_route_strips_spoofed_identity_headers() {
    let request = Request::builder()
        .uri("/blog/launch")
        .header(ROLE_HEADER, "platform_admin")
        .header(USER_ID_HEADER, Uuid::new_v4().to_string())
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "-|-|-");
}

#[tokio::test]
async fn invalid_token_does_not_block_public_route() {
    let response = app()
        .oneshot(get_request("/blog/launch", Some("garbage")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unauthenticated_web_request_redirects_to_sign_in_with_callback() {
    let response = app().oneshot(get_request("/app/orders", None)).await.unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/signin?callback=/app/orders");
}

#[tokio::test]
async fn expired_token_redirects_to_sign_in() {
    let config = test_config();
    let identity = Identity {
        id: Uuid::new_v4(),
        email: "user@example.com".into(),
        name: "User".into(),
        role: Role::TenantOwner,
        tenant_id: Some(Uuid::new_v4()),
    };
    let issued_at = chrono::Utc::now().timestamp() - config.session_lifetime_secs - 60;
    let stale = token::issue_at(&identity, issued_at, &config).unwrap();

    let response = app()
        .oneshot(get_request("/app/orders", Some(&stale)))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/signin?callback=/app/orders");
}

#[tokio::test]
async fn unauthenticated_api_request_gets_401() {
    let response = app().oneshot(get_request("/api/orders", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_on_admin_route_is_soft_denied_to_landing() {
    let token = issue_token(Role::TenantAdmin, Some(Uuid::new_v4()));
    let response = app()
        .oneshot(get_request("/admin/tenants", Some(&token)))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/app");
}

#[tokio::test]
async fn platform_admin_passes_admin_route() {
    let token = issue_token(Role::PlatformAdmin, None);
    let response = app()
        .oneshot(get_request("/admin/tenants", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tenantless_account_on_tenant_route_hits_access_denied_page() {
    // Distinct target from the sign-in redirect: structural account
    // problem, not a privilege gap.
    let token = issue_token(Role::TenantViewer, None);
    let response = app()
        .oneshot(get_request("/app/orders", Some(&token)))
        .await
        .unwrap();
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/error/access-denied");
}

#[tokio::test]
async fn platform_admin_bypasses_tenant_gate() {
    let token = issue_token(Role::PlatformAdmin, None);
    let response = app()
        .oneshot(get_request("/app/orders", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn tenant_member_reaches_tenant_route_with_identity_injected() {
    let tenant = Uuid::new_v4();
    let token = issue_token(Role::TenantOwner, Some(tenant));
    let response = app()
        .oneshot(get_request("/app/orders", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let fields: Vec<&str> = body.split('|').collect();
    assert_ne!(fields[0], "-");
    assert_eq!(fields[1], tenant.to_string());
    assert_eq!(fields[2], "tenant_owner");
}

#[tokio::test]
async fn spoofed_headers_are_overwritten_on_protected_routes() {
    let tenant = Uuid::new_v4();
    let token = issue_token(Role::TenantViewer, Some(tenant));

    let request = Request::builder()
        .uri("/app/orders")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(ROLE_HEADER, "platform_admin")
        .header(TENANT_ID_HEADER, Uuid::new_v4().to_string())
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let fields: Vec<&str> = body.split('|').collect();
    assert_eq!(fields[1], tenant.to_string());
    assert_eq!(fields[2], "tenant_viewer");
}

#[tokio::test]
async fn session_cookie_is_accepted_like_a_bearer_token() {
    let tenant = Uuid::new_v4();
    let token = issue_token(Role::TenantAdmin, Some(tenant));

    let request = Request::builder()
        .uri("/app/orders")
        .header(header::COOKIE, format!("theme=dark; {SESSION_COOKIE}={token}"))
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_default_bucket_requires_auth_only() {
    // `/app` is neither public, admin, nor tenant-scoped: any
    // authenticated identity passes, even a tenantless one.
    let token = issue_token(Role::TenantViewer, None);
    let response = app().oneshot(get_request("/app", Some(&token))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
