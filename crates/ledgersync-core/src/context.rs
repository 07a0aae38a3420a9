//! Per-request identity.
//!
//! A [`RequestContext`] is derived once per request — from verified
//! session claims at the edge, or from propagated request metadata
//! further down — and never mutated afterward. Identity is always passed
//! explicitly; there is no ambient/global session lookup.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AccessError;
use crate::rbac::{Permission, PermissionRegistry, Role};

/// The resolved identity tuple used for all in-request authorization
/// decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
}

impl RequestContext {
    pub fn new(user_id: Uuid, tenant_id: Option<Uuid>, role: Role) -> Self {
        RequestContext {
            user_id,
            tenant_id,
            role,
        }
    }

    /// The caller's tenant, or `NoTenant` for tenantless accounts.
    pub fn require_tenant(&self) -> Result<Uuid, AccessError> {
        self.tenant_id.ok_or(AccessError::NoTenant)
    }

    /// Checks membership in an allowed-role set.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AccessError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(AccessError::InsufficientPermission)
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        PermissionRegistry::global().has_permission(self.role, permission)
    }

    /// Checks a single capability, as a guard.
    pub fn require_permission(&self, permission: Permission) -> Result<(), AccessError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(AccessError::InsufficientPermission)
        }
    }
}

/// Callers that may legitimately see anonymous traffic hold an
/// `Option<RequestContext>`; this converts absence into a failure where
/// authentication is mandatory.
pub fn require_authenticated(
    context: Option<&RequestContext>,
) -> Result<&RequestContext, AccessError> {
    context.ok_or(AccessError::Unauthenticated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(tenant_id: Option<Uuid>, role: Role) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), tenant_id, role)
    }

    #[test]
    fn require_authenticated_rejects_absence() {
        assert_eq!(
            require_authenticated(None).unwrap_err(),
            AccessError::Unauthenticated
        );

        let context = ctx(None, Role::TenantViewer);
        assert!(require_authenticated(Some(&context)).is_ok());
    }

    #[test]
    fn require_tenant() {
        let tenant = Uuid::new_v4();
        assert_eq!(
            ctx(Some(tenant), Role::TenantAdmin).require_tenant().unwrap(),
            tenant
        );
        assert_eq!(
            ctx(None, Role::TenantAdmin).require_tenant().unwrap_err(),
            AccessError::NoTenant
        );
    }

    #[test]
    fn require_role() {
        let context = ctx(Some(Uuid::new_v4()), Role::TenantAdmin);
        assert!(
            context
                .require_role(&[Role::TenantOwner, Role::TenantAdmin])
                .is_ok()
        );
        assert_eq!(
            context.require_role(&[Role::PlatformAdmin]).unwrap_err(),
            AccessError::InsufficientPermission
        );
    }

    #[test]
    fn require_permission_follows_registry() {
        let viewer = ctx(Some(Uuid::new_v4()), Role::TenantViewer);
        assert!(viewer.require_permission(Permission::ViewOrders).is_ok());
        assert_eq!(
            viewer
                .require_permission(Permission::ManageBilling)
                .unwrap_err(),
            AccessError::InsufficientPermission
        );
    }
}
