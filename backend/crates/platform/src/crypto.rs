//! Encoding and randomness utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Decode standard base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Encode bytes as unpadded base64url (the JWT segment alphabet)
pub fn to_base64url(bytes: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a base64url segment.
///
/// Token producers disagree on padding, so trailing `=` is tolerated.
pub fn from_base64url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s.trim_end_matches('='))
}

/// Split a compact JWS (`header.payload.signature`) and decode its payload
/// segment. No signature check happens here.
pub fn decode_token_payload(token: &str) -> Result<Vec<u8>, TokenSegmentError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenSegmentError::SegmentCount);
    };

    Ok(from_base64url(payload)?)
}

/// Error when pulling the payload out of a compact token
#[derive(Debug, thiserror::Error)]
pub enum TokenSegmentError {
    #[error("token must have exactly three dot-separated segments")]
    SegmentCount,

    #[error("token payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
}
