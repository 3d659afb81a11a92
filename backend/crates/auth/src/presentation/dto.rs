//! API DTOs (Data Transfer Objects)

use kernel::claims::Claims;
use serde::{Deserialize, Serialize};

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful register or login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
    pub message: String,
    /// Unix seconds
    pub expires_at: i64,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub message: &'static str,
    /// The verified token payload
    pub payload: Claims,
}

// ============================================================================
// Admin Auth
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminAuthResponse {
    pub success: bool,
    pub admin: bool,
    pub message: String,
}
