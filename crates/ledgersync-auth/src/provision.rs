//! Tenant provisioning orchestration.
//!
//! Hashes the owner's password and delegates to the provisioning store,
//! whose contract makes tenant + owner + onboarding creation atomic.

use ledgersync_core::error::{CoreError, CoreResult};
use ledgersync_core::store::{ProvisionTenant, ProvisionedTenant, ProvisioningStore};

use crate::password;

/// Input for new-tenant sign-up.
#[derive(Debug)]
pub struct SignUpInput {
    pub tenant_name: String,
    pub owner_email: String,
    pub owner_name: String,
    pub password: String,
}

pub struct OnboardingService<P: ProvisioningStore> {
    store: P,
}

impl<P: ProvisioningStore> OnboardingService<P> {
    pub fn new(store: P) -> Self {
        Self { store }
    }

    /// Create a tenant with its owning account and onboarding record.
    pub async fn sign_up(&self, input: SignUpInput) -> CoreResult<ProvisionedTenant> {
        let digest = password::hash_password(&input.password)
            .map_err(|e| CoreError::Crypto(e.to_string()))?;

        let provisioned = self
            .store
            .provision(ProvisionTenant {
                tenant_name: input.tenant_name,
                owner_email: input.owner_email,
                owner_name: input.owner_name,
                owner_password_digest: digest,
            })
            .await?;

        tracing::info!(
            tenant_id = %provisioned.tenant.id,
            owner_id = %provisioned.owner.id,
            "tenant provisioned"
        );

        Ok(provisioned)
    }
}
