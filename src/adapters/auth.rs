//! HS256 bearer tokens.
//!
//! Tokens are compact JWTs (`header.claims.signature`, base64url without
//! padding) signed with a shared secret. Only `HS256` is accepted.

use crate::utils::error::{DeliveryError, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
const MAX_TOKEN_LEN: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenAuthority {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthority {
    pub fn new(secret: impl AsRef<[u8]>, ttl_days: i64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl: Duration::days(ttl_days),
        }
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| DeliveryError::auth(e.to_string()))
    }

    pub fn issue(&self, sub: &str, email: &str) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String> {
        let header = Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };
        let header_part = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?);
        let claims_part = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let signing_input = format!("{}.{}", header_part, claims_part);

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", signing_input, signature))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(DeliveryError::auth("token exceeds max length"));
        }

        let mut parts = token.split('.');
        let (header_part, claims_part, signature_part) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(c), Some(s), None) => (h, c, s),
                _ => return Err(DeliveryError::auth("token must have three parts")),
            };

        let header: Header = decode_part(header_part)?;
        if header.alg != "HS256" {
            return Err(DeliveryError::auth(format!(
                "unsupported algorithm {}",
                header.alg
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_part)
            .map_err(|e| DeliveryError::auth(e.to_string()))?;
        let mut mac = self.mac()?;
        mac.update(header_part.as_bytes());
        mac.update(b".");
        mac.update(claims_part.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| DeliveryError::auth("signature mismatch"))?;

        let claims: Claims = decode_part(claims_part)?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(DeliveryError::auth("token expired"));
        }
        Ok(claims)
    }
}

fn decode_part<T: for<'de> Deserialize<'de>>(part: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|e| DeliveryError::auth(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| DeliveryError::auth(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let authority = TokenAuthority::new("test-secret", DEFAULT_TOKEN_TTL_DAYS);
        let token = authority.issue("64f0c0ffee", "rahim@example.com").unwrap();

        let claims = authority.verify(&token).unwrap();
        assert_eq!(claims.sub, "64f0c0ffee");
        assert_eq!(claims.email, "rahim@example.com");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenAuthority::new("one", 1);
        let verifier = TokenAuthority::new("two", 1);
        let token = issuer.issue("u1", "u1@example.com").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let authority = TokenAuthority::new("secret", 1);
        let now = Utc::now().timestamp();
        let token = authority
            .sign(&Claims {
                sub: "u1".to_string(),
                email: "u1@example.com".to_string(),
                iat: now - 120,
                exp: now - 60,
            })
            .unwrap();
        assert!(authority.verify(&token).is_err());
    }

    #[test]
    fn test_tampered_claims_are_rejected() {
        let authority = TokenAuthority::new("secret", 1);
        let token = authority.issue("u1", "u1@example.com").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&serde_json::json!({
                "sub": "admin",
                "email": "admin@example.com",
                "iat": 0,
                "exp": i64::MAX
            }))
            .unwrap(),
        );
        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);
        assert!(authority.verify(&forged).is_err());
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let authority = TokenAuthority::new("secret", 1);
        assert!(authority.verify("").is_err());
        assert!(authority.verify("a.b").is_err());
        assert!(authority.verify("a.b.c.d").is_err());
        assert!(authority.verify("!!!.???.***").is_err());
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let authority = TokenAuthority::new("secret", 1);
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(br#"{"sub":"u","email":"e","iat":0,"exp":9999999999}"#);
        let token = format!("{}.{}.", header, claims);
        assert!(authority.verify(&token).is_err());
    }
}
