//! Store trait definitions for data access abstraction.
//!
//! Persistence lives behind these contracts; the authorization core only
//! ever looks accounts and tenants up, and never mutates them itself.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::CoreResult;
use crate::models::{
    account::Account,
    onboarding::OnboardingRecord,
    tenant::Tenant,
};

pub mod memory;

pub trait AccountStore: Send + Sync {
    fn get_by_email(&self, email: &str) -> impl Future<Output = CoreResult<Account>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CoreResult<Account>> + Send;
}

pub trait TenantStore: Send + Sync {
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CoreResult<Tenant>> + Send;
}

/// Input for atomic tenant provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionTenant {
    pub tenant_name: String,
    pub owner_email: String,
    pub owner_name: String,
    /// Already-hashed owner password (PHC string).
    pub owner_password_digest: String,
}

/// Everything created by one provisioning step.
#[derive(Debug, Clone)]
pub struct ProvisionedTenant {
    pub tenant: Tenant,
    pub owner: Account,
    pub onboarding: OnboardingRecord,
}

pub trait ProvisioningStore: Send + Sync {
    /// Create a tenant, its owning account, and an onboarding record in
    /// one atomic step. Either all three exist afterwards or none do; a
    /// partially created tenant must never be observable.
    fn provision(
        &self,
        input: ProvisionTenant,
    ) -> impl Future<Output = CoreResult<ProvisionedTenant>> + Send;
}

// Shared-handle forwarding, so one backend instance can serve several
// services.

impl<S: AccountStore> AccountStore for Arc<S> {
    fn get_by_email(&self, email: &str) -> impl Future<Output = CoreResult<Account>> + Send {
        (**self).get_by_email(email)
    }

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CoreResult<Account>> + Send {
        (**self).get_by_id(id)
    }
}

impl<S: TenantStore> TenantStore for Arc<S> {
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = CoreResult<Tenant>> + Send {
        (**self).get_by_id(id)
    }
}

impl<S: ProvisioningStore> ProvisioningStore for Arc<S> {
    fn provision(
        &self,
        input: ProvisionTenant,
    ) -> impl Future<Output = CoreResult<ProvisionedTenant>> + Send {
        (**self).provision(input)
    }
}
