//! Signed bearer tokens.
//!
//! Tokens are `base64url(claims-json) + "." + base64url(hmac-sha256)`,
//! signed with the configured auth secret. Seven-day expiry, carried in
//! the claims and checked on every verification. Verification uses the
//! MAC's constant-time comparison.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use fairway_core::{Email, UserId};

use super::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// How long an issued bearer token stays valid.
pub const BEARER_TTL_DAYS: i64 = 7;

/// Claims carried inside a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user ID.
    pub sub: i32,
    /// User email at issue time.
    pub email: String,
    /// Expiry as a Unix timestamp (seconds).
    pub exp: i64,
}

/// Signs and verifies bearer tokens with the configured secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: SecretString,
}

impl TokenSigner {
    /// Create a signer from the configured auth secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Issue a token for the user, expiring in [`BEARER_TTL_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Signing` if the claims fail to serialize or the
    /// key material is unusable.
    pub fn issue(&self, user_id: UserId, email: &Email) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.as_i32(),
            email: email.as_str().to_string(),
            exp: (Utc::now() + Duration::days(BEARER_TTL_DAYS)).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        let payload = serde_json::to_vec(claims).map_err(|e| AuthError::Signing(e.to_string()))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = self.mac()?;
        mac.update(payload_b64.as_bytes());
        let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidBearerToken` for malformed, tampered, or
    /// expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let (payload_b64, signature_b64) = token
            .split_once('.')
            .ok_or(AuthError::InvalidBearerToken)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthError::InvalidBearerToken)?;

        // Constant-time comparison via the MAC itself
        let mut mac = self.mac()?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidBearerToken)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::InvalidBearerToken)?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidBearerToken)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::InvalidBearerToken);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(SecretString::from("k9#mP2$vL8@qR5!wX3^zB7&nC4*jF6(t"))
    }

    fn email() -> Email {
        Email::parse("golfer@example.com").expect("valid email")
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = signer();
        let token = signer.issue(UserId::new(42), &email()).expect("issue");

        let claims = signer.verify(&token).expect("verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "golfer@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue(UserId::new(1), &email()).expect("issue");

        let (payload, signature) = token.split_once('.').expect("two parts");
        let forged_claims = Claims {
            sub: 999,
            email: "attacker@example.com".to_string(),
            exp: i64::MAX,
        };
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).expect("serialize"));
        assert_ne!(payload, forged_payload);

        let forged = format!("{forged_payload}.{signature}");
        assert!(matches!(
            signer.verify(&forged),
            Err(AuthError::InvalidBearerToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = signer().issue(UserId::new(1), &email()).expect("issue");
        let other = TokenSigner::new(SecretString::from("a8!bQ4#cR7$dS2%eT9^fU3&gV6*hW1(j"));
        assert!(matches!(
            other.verify(&token),
            Err(AuthError::InvalidBearerToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let claims = Claims {
            sub: 1,
            email: "golfer@example.com".to_string(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = signer.sign(&claims).expect("sign");
        assert!(matches!(
            signer.verify(&token),
            Err(AuthError::InvalidBearerToken)
        ));
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        let signer = signer();
        assert!(signer.verify("").is_err());
        assert!(signer.verify("no-dot-here").is_err());
        assert!(signer.verify("two.parts-but-not-base64!").is_err());
    }
}
