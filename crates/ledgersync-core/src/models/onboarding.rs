//! Onboarding record, created atomically with a tenant and its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tracks a freshly provisioned tenant through first-run setup.
///
/// Created in the same atomic provisioning step as the tenant and its
/// owning account — a tenant without one must never be observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
