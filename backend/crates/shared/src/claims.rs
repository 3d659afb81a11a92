//! Bearer Token Claims
//!
//! The payload segment of every session token. The gateway signs it and the
//! bearer middleware verifies it; handlers receive it as an extension.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::role::UserRole;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Issued at, Unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Claims this crate does not model are kept, not dropped.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
