use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried in bearer token claims and stored with each user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Customer = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(UserRole::Customer),
            1 => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "customer" => Some(UserRole::Customer),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
