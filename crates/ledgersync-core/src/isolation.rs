//! Tenant isolation guard.
//!
//! A pure policy check every handler must run before touching
//! tenant-owned data. The core cannot enforce this at the data layer —
//! it is a contract the handler upholds.

use uuid::Uuid;

use crate::error::AccessError;
use crate::rbac::Role;

/// Whether `role` acting for `caller_tenant` may touch data owned by
/// `target_tenant`.
///
/// `platform_admin` is tenant-independent and always passes. Every other
/// role passes only when both tenants are present and equal; a tenantless
/// caller never matches.
pub fn can_access(role: Role, caller_tenant: Option<Uuid>, target_tenant: Option<Uuid>) -> bool {
    if role == Role::PlatformAdmin {
        return true;
    }
    matches!((caller_tenant, target_tenant), (Some(caller), Some(target)) if caller == target)
}

/// Guard form of [`can_access`] for handler use.
pub fn ensure_access(
    role: Role,
    caller_tenant: Option<Uuid>,
    target_tenant: Option<Uuid>,
) -> Result<(), AccessError> {
    if can_access(role, caller_tenant, target_tenant) {
        Ok(())
    } else {
        Err(AccessError::TenantMismatch)
    }
}
