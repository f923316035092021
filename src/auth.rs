//! Credential hashing and signed session tokens
//!
//! Tokens are `base64url(claims).base64url(signature)` where the signature
//! is a SHA-256 digest over the configured secret and the encoded claims.
//! Verification is constant-time and checks expiry. Password hashes use
//! salted PBKDF2-SHA256.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const HASH_PREFIX: &str = "pbkdf2_sha256";
const HASH_ITERATIONS: u32 = 120_000;
const SALT_BYTES: usize = 16;
const DERIVED_BYTES: usize = 32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Employee code of the session owner
    pub sub: String,
    pub name: Option<String>,
    pub role: Option<String>,
    /// Expiry as unix seconds
    pub exp: i64,
}

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let trimmed = password.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Password cannot be blank");
    }

    let mut salt = [0u8; SALT_BYTES];
    OsRng.fill_bytes(&mut salt);
    let derived = derive(trimmed.as_bytes(), &salt, HASH_ITERATIONS);

    Ok(format!(
        "{}${}${}${}",
        HASH_PREFIX,
        HASH_ITERATIONS,
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(derived)
    ))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let trimmed = password.trim();
    if trimmed.is_empty() {
        return false;
    }

    let mut parts = password_hash.splitn(4, '$');
    let prefix = parts.next().unwrap_or("");
    let iterations_text = parts.next().unwrap_or("");
    let salt_b64 = parts.next().unwrap_or("");
    let hash_b64 = parts.next().unwrap_or("");
    if prefix != HASH_PREFIX {
        return false;
    }
    let iterations: u32 = match iterations_text.parse() {
        Ok(value) => value,
        Err(_) => return false,
    };
    let salt = match STANDARD_NO_PAD.decode(salt_b64) {
        Ok(value) => value,
        Err(_) => return false,
    };
    let expected = match STANDARD_NO_PAD.decode(hash_b64) {
        Ok(value) => value,
        Err(_) => return false,
    };

    let derived = derive(trimmed.as_bytes(), &salt, iterations);
    derived.ct_eq(expected.as_slice()).into()
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> [u8; DERIVED_BYTES] {
    let mut out = [0u8; DERIVED_BYTES];
    pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out);
    out
}

pub fn issue_token(
    secret: &str,
    employee_code: &str,
    name: Option<String>,
    role: Option<String>,
    ttl_hours: i64,
) -> anyhow::Result<String> {
    let claims = TokenClaims {
        sub: employee_code.to_string(),
        name,
        role,
        exp: (Utc::now() + Duration::hours(ttl_hours)).timestamp(),
    };
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
    let signature = sign(secret, &payload);
    Ok(format!("{payload}.{signature}"))
}

/// Verify signature and expiry, returning the claims on success.
pub fn verify_token(secret: &str, token: &str) -> Option<TokenClaims> {
    verify_token_at(secret, token, Utc::now())
}

fn verify_token_at(secret: &str, token: &str, now: DateTime<Utc>) -> Option<TokenClaims> {
    let (payload, signature) = token.split_once('.')?;

    let expected = sign(secret, payload);
    if !bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
        return None;
    }

    let claims: TokenClaims =
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload).ok()?).ok()?;
    if claims.exp <= now.timestamp() {
        return None;
    }
    Some(claims)
}

fn sign(secret: &str, payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b".");
    hasher.update(payload.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("hunter2024").unwrap();
        assert!(verify_password("hunter2024", &hash));
        assert!(!verify_password("hunter2025", &hash));
    }

    #[test]
    fn blank_passwords_are_rejected() {
        assert!(hash_password("   ").is_err());
        let hash = hash_password("secret").unwrap();
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn garbage_hashes_never_verify() {
        assert!(!verify_password("secret", "not-a-hash"));
        assert!(!verify_password("secret", "pbkdf2_sha256$abc$!!$!!"));
    }

    #[test]
    fn token_round_trip() {
        let token = issue_token(
            "secret",
            "EMP-001",
            Some("Avery Lee".to_string()),
            Some("admin".to_string()),
            12,
        )
        .unwrap();
        let claims = verify_token("secret", &token).unwrap();
        assert_eq!(claims.sub, "EMP-001");
        assert_eq!(claims.role.as_deref(), Some("admin"));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let token = issue_token("secret", "EMP-001", None, None, 12).unwrap();
        let mut tampered = token.clone();
        tampered.replace_range(0..1, "X");
        assert!(verify_token("secret", &tampered).is_none());
        assert!(verify_token("other-secret", &token).is_none());
        assert!(verify_token("secret", "no-dot-here").is_none());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = issue_token("secret", "EMP-001", None, None, 1).unwrap();
        let later = Utc::now() + Duration::hours(2);
        assert!(verify_token_at("secret", &token, later).is_none());
        assert!(verify_token_at("secret", &token, Utc::now()).is_some());
    }
}
