//! Admin credential check.
//!
//! **This is a placeholder, not a security boundary.** The credentials are a
//! hardcoded literal pair with no hashing, salting or session expiry. Anything
//! reusing it for real deployments must swap in genuine authentication.

use log::{info, warn};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "password";

/// Message shown to the user when the check fails.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Returns `true` only for the fixed placeholder pair. See the module docs.
pub fn check_admin_credentials(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

/// The single shared admin flag the presentation layer uses to gate the
/// status controls. The status mutator itself does not consult it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    is_admin: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag when the placeholder credentials match.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), &'static str> {
        if check_admin_credentials(username, password) {
            info!("Admin session started");
            self.is_admin = true;
            Ok(())
        } else {
            warn!("Rejected admin login for user {:?}", username);
            Err(INVALID_CREDENTIALS)
        }
    }

    pub fn logout(&mut self) {
        self.is_admin = false;
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
