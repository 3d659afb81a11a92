//! User Entity
//!
//! A storefront account: login email, optional display name, role, and the
//! password hash.

use chrono::{DateTime, Utc};
use kernel::claims::Claims;
use kernel::id::UserId;
use kernel::role::UserRole;
use serde_json::Map;

use crate::domain::value_object::{email::Email, user_password::UserPassword};

/// Longest display name accepted at registration, in characters
pub const DISPLAY_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, lowercased
    pub email: Email,
    pub display_name: Option<String>,
    pub user_role: UserRole,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new customer account
    pub fn new(email: Email, display_name: Option<String>, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            email,
            display_name,
            user_role: UserRole::default(),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }

    /// Identity claims for a token issued at `iat` and expiring at `exp`
    pub fn claims(&self, iat: i64, exp: i64) -> Claims {
        Claims {
            sub: self.user_id.to_string(),
            email: Some(self.email.to_string()),
            name: self.display_name.clone(),
            role: self.user_role,
            exp,
            iat: Some(iat),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn user() -> User {
        let hash =
            UserPassword::from_raw(&RawPassword::for_login("pw".to_string()), None).unwrap();
        User::new(Email::new("a@b.com").unwrap(), Some("Ada".to_string()), hash)
    }

    #[test]
    fn test_new_user_is_customer() {
        let user = user();
        assert_eq!(user.user_role, UserRole::Customer);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_claims_carry_identity() {
        let mut user = user();
        user.set_role(UserRole::Admin);

        let claims = user.claims(100, 200);
        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.name.as_deref(), Some("Ada"));
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!((claims.iat, claims.exp), (Some(100), 200));
    }
}
