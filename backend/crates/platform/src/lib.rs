//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Encoding utilities (Base64, Base64url token segments, random bytes)
//! - Bearer credential extraction from HTTP headers
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)

pub mod bearer;
pub mod crypto;
pub mod password;
