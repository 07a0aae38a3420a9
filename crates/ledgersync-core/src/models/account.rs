//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::rbac::Role;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// A user account.
///
/// `tenant_id` is `None` for `platform_admin` accounts, which are
/// tenant-independent. For the three tenant roles a missing tenant is a
/// valid but degraded state: the account can authenticate, but no
/// tenant-scoped capability can be exercised until a tenant is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// Argon2id PHC-format digest. `None` for accounts provisioned
    /// without a local password (e.g. future external-IdP accounts);
    /// such accounts cannot authenticate with email + password.
    pub password_digest: Option<String>,
    pub role: Role,
    pub status: AccountStatus,
    pub tenant_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A verified account identity, as returned by credential verification.
///
/// Holding one proves authentication succeeded; it carries everything the
/// session issuer embeds in a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub tenant_id: Option<Uuid>,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Identity {
            id: account.id,
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
            tenant_id: account.tenant_id,
        }
    }
}
