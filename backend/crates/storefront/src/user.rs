//! User Details
//!
//! Client-side view of a token payload. The gateway's tokens carry typed
//! [`kernel::claims::Claims`], but the client accepts any JSON object with
//! an `exp` and some identity field, so nothing here is required except
//! that the payload is an object.

use chrono::Utc;
use kernel::role::UserRole;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field names tried, in order, when looking for the user's identity.
const SUBJECT_FIELDS: [&str; 3] = ["sub", "_id", "id"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDetails(Map<String, Value>);

impl UserDetails {
    /// Expiry in Unix seconds. Fractional values are kept.
    pub fn exp(&self) -> Option<f64> {
        self.0.get("exp").and_then(Value::as_f64)
    }

    /// True while `exp` lies strictly after `now_secs`. No `exp`, no session.
    pub fn is_active_at(&self, now_secs: f64) -> bool {
        self.exp().is_some_and(|exp| exp > now_secs)
    }

    pub fn is_active(&self) -> bool {
        let now = Utc::now().timestamp_millis() as f64 / 1000.0;
        self.is_active_at(now)
    }

    pub fn subject(&self) -> Option<String> {
        SUBJECT_FIELDS
            .iter()
            .filter_map(|field| self.0.get(*field))
            .find_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// `None` for a missing role or one this client does not know.
    pub fn role(&self) -> Option<UserRole> {
        self.0
            .get("role")
            .and_then(|role| serde_json::from_value(role.clone()).ok())
    }

    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for UserDetails {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}
