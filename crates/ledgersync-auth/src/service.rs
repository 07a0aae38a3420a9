//! Credential verification and sign-in orchestration.

use ledgersync_core::error::{CoreError, CoreResult};
use ledgersync_core::models::account::{AccountStatus, Identity};
use ledgersync_core::models::tenant::TenantStatus;
use ledgersync_core::rbac::Role;
use ledgersync_core::store::{AccountStore, TenantStore};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the sign-in flow.
#[derive(Debug)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Successful sign-in result.
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed session token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// The verified identity the token was issued for.
    pub identity: Identity,
}

/// Authentication service.
///
/// Generic over store implementations so that the auth layer has no
/// dependency on any particular persistence backend.
pub struct AuthService<A: AccountStore, T: TenantStore> {
    accounts: A,
    tenants: T,
    config: AuthConfig,
}

impl<A: AccountStore, T: TenantStore> AuthService<A, T> {
    pub fn new(accounts: A, tenants: T, config: AuthConfig) -> Self {
        Self {
            accounts,
            tenants,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate an email/password pair against stored account state.
    ///
    /// Failure ordering is fixed. Unknown email, missing digest, and
    /// wrong password all collapse to `InvalidCredentials` — the first
    /// two paths still run one Argon2 verification so none of them is
    /// distinguishable by timing or message. Status checks come after
    /// the password check and report `AccountInactive`.
    pub async fn authenticate(&self, email: &str, supplied_password: &str) -> CoreResult<Identity> {
        // (a) Account lookup.
        let account = match self.accounts.get_by_email(email).await {
            Ok(account) => account,
            Err(CoreError::NotFound { .. }) => {
                password::verify_dummy(supplied_password);
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        // (b) Local password digest must exist.
        let Some(digest) = account.password_digest.as_deref() else {
            password::verify_dummy(supplied_password);
            tracing::warn!(account_id = %account.id, "sign-in attempt on account without a local password");
            return Err(AuthError::InvalidCredentials.into());
        };

        // (c) Password verification.
        let valid = password::verify_password(supplied_password, digest)
            .map_err(|e| CoreError::Crypto(e.to_string()))?;
        if !valid {
            tracing::warn!(account_id = %account.id, "sign-in failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        // (d) Account status.
        if account.status != AccountStatus::Active {
            tracing::warn!(account_id = %account.id, "sign-in failed: account inactive");
            return Err(AuthError::AccountInactive.into());
        }

        // (e) Tenant status — platform admins are tenant-independent; a
        // tenantless tenant-role account may still authenticate (it just
        // cannot reach tenant-scoped routes).
        if account.role != Role::PlatformAdmin
            && let Some(tenant_id) = account.tenant_id
        {
            let tenant = match self.tenants.get_by_id(tenant_id).await {
                Ok(tenant) => tenant,
                Err(CoreError::NotFound { .. }) => {
                    tracing::warn!(account_id = %account.id, %tenant_id, "sign-in failed: tenant missing");
                    return Err(AuthError::AccountInactive.into());
                }
                Err(e) => return Err(e),
            };
            if tenant.status != TenantStatus::Active {
                tracing::warn!(account_id = %account.id, %tenant_id, "sign-in failed: tenant suspended");
                return Err(AuthError::AccountInactive.into());
            }
        }

        Ok(Identity::from(&account))
    }

    /// Authenticate and issue a session token.
    pub async fn sign_in(&self, input: SignInInput) -> CoreResult<SignInOutput> {
        let identity = self.authenticate(&input.email, &input.password).await?;
        let token = token::issue(&identity, &self.config)?;

        tracing::info!(account_id = %identity.id, role = %identity.role, "sign-in succeeded");

        Ok(SignInOutput {
            token,
            expires_in: self.config.session_lifetime_secs,
            identity,
        })
    }
}
