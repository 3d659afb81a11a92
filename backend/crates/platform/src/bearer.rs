//! Bearer credential extraction
//!
//! Reading and writing `Authorization: Bearer` headers.

use axum::http::{HeaderMap, header};

/// Error when extracting a bearer credential
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("Missing Authorization header")]
    Missing,

    #[error("Authorization header is not a Bearer credential")]
    InvalidScheme,
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme name is matched case-insensitively (RFC 9110 §11.1).
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(BearerError::InvalidScheme)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(BearerError::InvalidScheme);
    }

    // `value` was trimmed, so the remainder holds at least one non-space byte
    Ok(token.trim())
}

/// Build an `Authorization` header value for a token.
pub fn bearer_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_extract_bearer_token() {
        let headers = with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));

        let headers = with_auth("bearer   abc.def.ghi ");
        assert_eq!(extract_bearer_token(&headers), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_extract_bearer_token_failures() {
        assert_eq!(
            extract_bearer_token(&HeaderMap::new()),
            Err(BearerError::Missing)
        );
        assert_eq!(
            extract_bearer_token(&with_auth("Basic dXNlcjpwYXNz")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer_token(&with_auth("Bearer")),
            Err(BearerError::InvalidScheme)
        );
        assert_eq!(
            extract_bearer_token(&with_auth("Bearer    ")),
            Err(BearerError::InvalidScheme)
        );
    }

    #[test]
    fn test_bearer_header_value() {
        assert_eq!(bearer_header_value("T"), "Bearer T");
    }
}
