//! Domain models for Ledgersync.
//!
//! These are the core types shared across all crates. The authorization
//! core reads them; mutation happens only behind the store contracts.

pub mod account;
pub mod onboarding;
pub mod tenant;
