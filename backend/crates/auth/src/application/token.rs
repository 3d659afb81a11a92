//! Bearer Token Issuing and Verification
//!
//! HS256 JWTs. The payload is [`kernel::claims::Claims`], which the
//! storefront client decodes on its side to derive login state.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::claims::Claims;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::error::AuthResult;

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Unix seconds, equal to the `exp` claim
    pub expires_at: i64,
}

pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.token_leeway.as_secs();
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            validation,
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Sign a token for `user`, valid for the configured TTL
    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        let now = Utc::now().timestamp();
        let expires_at = now.saturating_add(self.ttl_secs);

        let token = self.sign(&user.claims(now, expires_at))?;

        tracing::debug!(
            user_id = %user.user_id,
            expires_at,
            "Issued bearer token"
        );

        Ok(IssuedToken { token, expires_at })
    }

    /// Sign arbitrary claims as-is
    pub fn sign(&self, claims: &Claims) -> AuthResult<String> {
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.encoding_key,
        )?)
    }

    /// Check signature and expiry, returning the payload
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{Email, RawPassword, UserPassword};
    use crate::error::AuthError;
    use serde_json::Map;

    fn user() -> User {
        let hash =
            UserPassword::from_raw(&RawPassword::for_login("pw".to_string()), None).unwrap();
        User::new(Email::new("a@b.com").unwrap(), None, hash)
    }

    fn claims_expiring_at(exp: i64) -> Claims {
        Claims {
            sub: "someone".to_string(),
            email: None,
            name: None,
            role: Default::default(),
            exp,
            iat: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let config = AuthConfig::with_random_secret();
        let issuer = TokenIssuer::new(&config);
        let user = user();

        let issued = issuer.issue(&user).unwrap();
        assert_eq!(issued.token.split('.').count(), 3);

        let claims = issuer.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.exp, issued.expires_at);
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_ttl_applied() {
        let config = AuthConfig {
            token_ttl: std::time::Duration::from_secs(90),
            ..AuthConfig::with_random_secret()
        };
        let issued = TokenIssuer::new(&config).issue(&user()).unwrap();
        let remaining = issued.expires_at - Utc::now().timestamp();
        assert!((89..=90).contains(&remaining));
    }

    #[test]
    fn test_oversized_ttl_is_capped() {
        let config = AuthConfig {
            token_ttl: std::time::Duration::from_secs(u64::MAX),
            ..AuthConfig::with_random_secret()
        };
        let issuer = TokenIssuer::new(&config);
        let issued = issuer.issue(&user()).unwrap();

        let remaining = issued.expires_at - Utc::now().timestamp();
        assert!(remaining > 0);
        assert!(remaining <= config.token_ttl_secs());
        assert!(issuer.verify(&issued.token).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = TokenIssuer::new(&AuthConfig::with_random_secret());
        let token = issuer
            .sign(&claims_expiring_at(Utc::now().timestamp() - 10))
            .unwrap();

        assert!(matches!(issuer.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let ours = TokenIssuer::new(&AuthConfig::with_random_secret());
        let theirs = TokenIssuer::new(&AuthConfig::with_random_secret());
        let token = theirs.issue(&user()).unwrap().token;

        assert!(matches!(ours.verify(&token), Err(AuthError::TokenInvalid)));
        assert!(matches!(ours.verify("not.a.jwt"), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn test_unknown_claims_survive_signing() {
        let issuer = TokenIssuer::new(&AuthConfig::with_random_secret());
        let mut claims = claims_expiring_at(Utc::now().timestamp() + 60);
        claims
            .extra
            .insert("cart".to_string(), serde_json::json!("c-17"));

        let token = issuer.sign(&claims).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), claims);
    }
}
