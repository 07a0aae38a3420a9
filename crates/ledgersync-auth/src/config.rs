//! Authentication configuration.

/// Session lifetime: 30 days, absolute from issuance. There is no
/// sliding renewal.
pub const SESSION_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Configuration for credential verification and session tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Process-wide secret for signing session tokens (HS256). Loaded
    /// once at startup, read-only afterwards.
    pub session_secret: String,
    /// Absolute token lifetime in seconds (default: 30 days).
    pub session_lifetime_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: String::new(),
            session_lifetime_secs: SESSION_LIFETIME_SECS,
        }
    }
}
