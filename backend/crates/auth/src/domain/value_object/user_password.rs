//! User Password Value Objects
//!
//! Domain wrappers over `platform::password` that speak `AppError`.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A password chosen at registration, checked against the policy.
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(policy_error)
    }

    /// A password presented at login. Not checked against the policy.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

fn policy_error(e: PasswordPolicyError) -> AppError {
    let action = match e {
        PasswordPolicyError::TooShort { .. } => "Please choose a longer password",
        PasswordPolicyError::TooLong { .. } => "Please choose a shorter password",
        PasswordPolicyError::EmptyOrWhitespace => "Please enter a password",
        PasswordPolicyError::InvalidCharacter => {
            "Please remove any special control characters"
        }
        PasswordPolicyError::CommonPattern => "Please choose a more unique password",
    };
    AppError::bad_request(e.to_string()).with_action(action)
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash as stored in `users.password_hash`.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.0
            .hash(pepper)
            .map(Self)
            .map_err(|e| AppError::internal("Password hashing failed").with_source(e))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
