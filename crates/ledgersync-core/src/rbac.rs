//! Roles, permissions, and the process-wide permission registry.
//!
//! The registry is a constant, total role → permission-set mapping. It is
//! built once on first access and is immutable afterward, so unbounded
//! concurrent readers need no locking.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four fixed identity classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    PlatformAdmin,
    TenantOwner,
    TenantAdmin,
    TenantViewer,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::PlatformAdmin,
        Role::TenantOwner,
        Role::TenantAdmin,
        Role::TenantViewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::PlatformAdmin => "platform_admin",
            Role::TenantOwner => "tenant_owner",
            Role::TenantAdmin => "tenant_admin",
            Role::TenantViewer => "tenant_viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "platform_admin" => Ok(Role::PlatformAdmin),
            "tenant_owner" => Ok(Role::TenantOwner),
            "tenant_admin" => Ok(Role::TenantAdmin),
            "tenant_viewer" => Ok(Role::TenantViewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// An atomic capability tag, checked independently of role identity.
///
/// Identifiers are fixed at compile time; there is no runtime creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewOrders,
    ViewSyncStatus,
    ManageSyncSettings,
    RunSync,
    ManagePages,
    ManageTenantUsers,
    ManageBilling,
    ManageTenants,
    ManageBlog,
}

/// Immutable role → permission-set mapping.
///
/// Sets are built by extension along the ownership chain, so the nesting
/// `tenant_viewer ⊆ tenant_admin ⊆ tenant_owner ⊆ platform_admin` holds
/// by construction. `tenant_owner` and `platform_admin` both strictly
/// contain `tenant_admin`; the owner-only pair (`MANAGE_TENANT_USERS`,
/// `MANAGE_BILLING`) is what separates owner from admin.
pub struct PermissionRegistry {
    viewer: BTreeSet<Permission>,
    admin: BTreeSet<Permission>,
    owner: BTreeSet<Permission>,
    platform: BTreeSet<Permission>,
}

static REGISTRY: OnceLock<PermissionRegistry> = OnceLock::new();

impl PermissionRegistry {
    /// The process-wide registry, built on first access.
    pub fn global() -> &'static PermissionRegistry {
        REGISTRY.get_or_init(PermissionRegistry::build)
    }

    fn build() -> Self {
        let viewer: BTreeSet<Permission> =
            [Permission::ViewOrders, Permission::ViewSyncStatus].into();

        let mut admin = viewer.clone();
        admin.extend([
            Permission::ManageSyncSettings,
            Permission::RunSync,
            Permission::ManagePages,
        ]);

        let mut owner = admin.clone();
        owner.extend([Permission::ManageTenantUsers, Permission::ManageBilling]);

        let mut platform = owner.clone();
        platform.extend([Permission::ManageTenants, Permission::ManageBlog]);

        PermissionRegistry {
            viewer,
            admin,
            owner,
            platform,
        }
    }

    /// All permissions held by `role`.
    pub fn list_permissions(&self, role: Role) -> &BTreeSet<Permission> {
        match role {
            Role::PlatformAdmin => &self.platform,
            Role::TenantOwner => &self.owner,
            Role::TenantAdmin => &self.admin,
            Role::TenantViewer => &self.viewer,
        }
    }

    pub fn has_permission(&self, role: Role, permission: Permission) -> bool {
        self.list_permissions(role).contains(&permission)
    }

    pub fn has_any(&self, role: Role, permissions: &[Permission]) -> bool {
        let held = self.list_permissions(role);
        permissions.iter().any(|p| held.contains(p))
    }

    pub fn has_all(&self, role: Role, permissions: &[Permission]) -> bool {
        let held = self.list_permissions(role);
        permissions.iter().all(|p| held.contains(p))
    }
}
