//! Ledgersync Auth — credential verification, signed session tokens,
//! and atomic tenant provisioning.

pub mod config;
pub mod error;
pub mod password;
pub mod provision;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use provision::{OnboardingService, SignUpInput};
pub use service::{AuthService, SignInInput, SignInOutput};
pub use token::SessionClaims;
