//! Email Value Object
//!
//! The login identifier. Stored lowercased so lookups are case-insensitive.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum email length (RFC 5321 path limit minus the angle brackets)
const EMAIL_MAX_LENGTH: usize = 254;

/// Maximum local part length (RFC 5321 §4.5.3.1.1)
const LOCAL_PART_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> AppResult<Self> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty")
                .with_action("Please enter your email address"));
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Email must be at most {EMAIL_MAX_LENGTH} characters"
            )));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(invalid_format());
        };

        if !is_valid_local_part(local) || !is_valid_domain(domain) {
            return Err(invalid_format());
        }

        Ok(Self(email))
    }

    /// Rehydrate a value that was validated before it was stored
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

fn invalid_format() -> AppError {
    AppError::bad_request("Invalid email format")
        .with_action("Please enter a valid email address, e.g. name@example.com")
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.len() <= LOCAL_PART_MAX_LENGTH
        && !local.chars().any(|c| c.is_whitespace() || c == '@')
}

fn is_valid_domain(domain: &str) -> bool {
    // A second '@' lands here and fails the character check
    domain.contains('.')
        && domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-'])
        && !domain.contains("..")
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl TryFrom<String> for Email {
    type Error = AppError;

    fn try_from(s: String) -> AppResult<Self> {
        Email::new(s)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_valid() {
        for ok in [
            "a@b.com",
            "user.name@example.co.jp",
            "user+tag@example.com",
            "  padded@example.com ",
        ] {
            assert!(Email::new(ok).is_ok(), "{ok} should be accepted");
        }
    }

    #[test]
    fn test_email_invalid() {
        for bad in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@@example.com",
            "user@example",
            "user@.example.com",
            "user@example..com",
            "us er@example.com",
        ] {
            assert!(Email::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_email_case_normalization() {
        let email = Email::new("Shopper@Example.COM").unwrap();
        assert_eq!(email.as_str(), "shopper@example.com");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_invalid_email_has_action() {
        let err = Email::new("nope").unwrap_err();
        assert!(err.action().is_some());
    }
}
