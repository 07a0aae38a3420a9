//! In-memory store backend.
//!
//! Backs the test suites and local development. All writes go through a
//! single lock, which is what makes [`ProvisioningStore::provision`]
//! atomic here.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::models::account::{Account, AccountStatus};
use crate::models::onboarding::OnboardingRecord;
use crate::models::tenant::{Tenant, TenantStatus};
use crate::rbac::Role;
use crate::store::{
    AccountStore, ProvisionTenant, ProvisionedTenant, ProvisioningStore, TenantStore,
};

#[derive(Default)]
struct Inner {
    accounts: HashMap<Uuid, Account>,
    tenants: HashMap<Uuid, Tenant>,
    onboarding: HashMap<Uuid, OnboardingRecord>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        // Lock is never held across a panic point.
        match self.inner.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Insert a tenant fixture, returning it.
    pub fn add_tenant(&self, name: &str, status: TenantStatus) -> Tenant {
        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status,
            created_at: now,
            updated_at: now,
        };
        self.write().tenants.insert(tenant.id, tenant.clone());
        tenant
    }

    /// Insert an account fixture, returning it.
    pub fn add_account(
        &self,
        email: &str,
        name: &str,
        password_digest: Option<String>,
        role: Role,
        status: AccountStatus,
        tenant_id: Option<Uuid>,
    ) -> Account {
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_digest,
            role,
            status,
            tenant_id,
            created_at: now,
            updated_at: now,
        };
        self.write().accounts.insert(account.id, account.clone());
        account
    }

    pub fn set_account_status(&self, id: Uuid, status: AccountStatus) {
        if let Some(account) = self.write().accounts.get_mut(&id) {
            account.status = status;
            account.updated_at = Utc::now();
        }
    }

    pub fn set_tenant_status(&self, id: Uuid, status: TenantStatus) {
        if let Some(tenant) = self.write().tenants.get_mut(&id) {
            tenant.status = status;
            tenant.updated_at = Utc::now();
        }
    }

    pub fn tenant_count(&self) -> usize {
        self.read().tenants.len()
    }

    pub fn account_count(&self) -> usize {
        self.read().accounts.len()
    }
}

impl AccountStore for MemoryStore {
    async fn get_by_email(&self, email: &str) -> CoreResult<Account> {
        self.read()
            .accounts
            .values()
            .find(|a| a.email == email)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "account".into(),
                id: email.into(),
            })
    }

    async fn get_by_id(&self, id: Uuid) -> CoreResult<Account> {
        self.read()
            .accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "account".into(),
                id: id.to_string(),
            })
    }
}

impl TenantStore for MemoryStore {
    async fn get_by_id(&self, id: Uuid) -> CoreResult<Tenant> {
        self.read()
            .tenants
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "tenant".into(),
                id: id.to_string(),
            })
    }
}

impl ProvisioningStore for MemoryStore {
    async fn provision(&self, input: ProvisionTenant) -> CoreResult<ProvisionedTenant> {
        let mut inner = self.write();

        // Uniqueness is checked before any insert so a failure leaves
        // nothing behind.
        if inner.accounts.values().any(|a| a.email == input.owner_email) {
            return Err(CoreError::AlreadyExists {
                entity: "account".into(),
            });
        }

        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            name: input.tenant_name,
            status: TenantStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let owner = Account {
            id: Uuid::new_v4(),
            email: input.owner_email,
            name: input.owner_name,
            password_digest: Some(input.owner_password_digest),
            role: Role::TenantOwner,
            status: AccountStatus::Active,
            tenant_id: Some(tenant.id),
            created_at: now,
            updated_at: now,
        };
        let onboarding = OnboardingRecord {
            id: Uuid::new_v4(),
            tenant_id: tenant.id,
            completed: false,
            created_at: now,
        };

        inner.tenants.insert(tenant.id, tenant.clone());
        inner.accounts.insert(owner.id, owner.clone());
        inner.onboarding.insert(onboarding.id, onboarding.clone());

        Ok(ProvisionedTenant {
            tenant,
            owner,
            onboarding,
        })
    }
}
