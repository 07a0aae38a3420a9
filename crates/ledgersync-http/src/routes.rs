//! Route classification tables.
//!
//! Three ordered prefix sets — public, admin-only, tenant-scoped — plus
//! a default "protected, non-tenant, non-admin" bucket for anything
//! unmatched. Classification order matters: public wins first, then
//! admin, then tenant.

/// What the enforcement middleware should do with a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No context resolution at all.
    Public,
    /// Requires `platform_admin`.
    Admin,
    /// Requires a tenant-scoped identity (or `platform_admin`).
    Tenant,
    /// Requires authentication only.
    Protected,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    public: Vec<String>,
    admin: Vec<String>,
    tenant: Vec<String>,
    /// Sign-in page for unauthenticated web requests.
    pub sign_in_path: String,
    /// Default authenticated landing page (soft deny target).
    pub landing_path: String,
    /// "Access denied" error page for structurally tenantless accounts.
    pub denied_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        let s = |items: &[&str]| items.iter().map(|i| (*i).to_string()).collect();
        Self {
            public: s(&[
                "/",
                "/signin",
                "/signup",
                "/pricing",
                "/blog",
                "/changelog",
                "/assets",
                "/healthz",
                "/api/auth/signin",
                "/api/auth/signup",
            ]),
            admin: s(&["/admin", "/api/admin"]),
            tenant: s(&[
                "/app/orders",
                "/app/sync",
                "/app/billing",
                "/app/team",
                "/api/orders",
                "/api/sync",
                "/api/billing",
            ]),
            sign_in_path: "/signin".into(),
            landing_path: "/app".into(),
            denied_path: "/error/access-denied".into(),
        }
    }
}

impl RouteTable {
    /// Classify a request path. Single pass, first match wins in the
    /// order public → admin → tenant → protected.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public.iter().any(|p| prefix_matches(p, path)) {
            RouteClass::Public
        } else if self.admin.iter().any(|p| prefix_matches(p, path)) {
            RouteClass::Admin
        } else if self.tenant.iter().any(|p| prefix_matches(p, path)) {
            RouteClass::Tenant
        } else {
            RouteClass::Protected
        }
    }

    /// API-style callers get structured denials instead of redirects.
    pub fn is_api(&self, path: &str) -> bool {
        path == "/api" || path.starts_with("/api/")
    }
}

/// Prefix match on path-segment boundaries: `/blog` matches `/blog` and
/// `/blog/post` but not `/blogx`. The root prefix matches only itself.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path == "/";
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
