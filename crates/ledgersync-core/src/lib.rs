//! Ledgersync Core — domain models, error taxonomy, the permission
//! registry, per-request identity, and the store contracts behind which
//! persistence lives.

pub mod context;
pub mod error;
pub mod isolation;
pub mod models;
pub mod rbac;
pub mod store;

pub use context::RequestContext;
pub use error::{AccessError, CoreError, CoreResult};
pub use rbac::{Permission, PermissionRegistry, Role};
