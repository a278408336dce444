//! Authentication service.
//!
//! Primary flow is the magic link: requesting one finds or creates the
//! account, stores a single-use 15-minute token, and mails a verification
//! URL. Verifying consumes the token atomically, marks the user verified,
//! and issues a 7-day signed bearer token. Password login is a secondary
//! flow for accounts that had a password set through the CLI.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::TokenSigner;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use rand::RngCore;
use sqlx::PgPool;

use fairway_core::Email;

use crate::db::login_tokens::LoginTokenRepository;
use crate::db::users::UserRepository;
use crate::models::User;

/// A pending magic link.
#[derive(Debug, Clone)]
pub struct MagicLink {
    pub email: Email,
    pub url: String,
}

/// A successfully authenticated user plus their bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: LoginTokenRepository<'a>,
    signer: &'a TokenSigner,
    client_base_url: &'a str,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, signer: &'a TokenSigner, client_base_url: &'a str) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens: LoginTokenRepository::new(pool),
            signer,
            client_base_url,
        }
    }

    /// Start the magic-link flow for an email address.
    ///
    /// Unknown addresses get an account implicitly; a repeated request
    /// replaces the previous token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for unparseable addresses and
    /// `AuthError::Repository` for database failures.
    pub async fn request_magic_link(&self, email: &str) -> Result<MagicLink, AuthError> {
        let email = Email::parse(email)?;
        let user = self.users.find_or_create(&email).await?;

        let token = generate_login_token();
        self.tokens.upsert(&user.email, &token).await?;

        let url = format!(
            "{}/auth/verify?token={token}",
            self.client_base_url.trim_end_matches('/')
        );

        Ok(MagicLink {
            email: user.email,
            url,
        })
    }

    /// Complete the magic-link flow: consume the token, mark the user
    /// verified, and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidLoginToken` for tokens that are unknown,
    /// expired, or already consumed.
    pub async fn verify_magic_link(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let email = self
            .tokens
            .consume(token)
            .await?
            .ok_or(AuthError::InvalidLoginToken)?;

        let user = self.users.mark_verified(&email).await?;
        let bearer = self.signer.issue(user.id, &user.email)?;

        Ok(AuthenticatedUser {
            user,
            token: bearer,
        })
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when the email is unknown,
    /// no password is set, or the password does not match. All three cases
    /// are indistinguishable to the caller.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;
        verify_password(password, hash)?;

        let bearer = self.signer.issue(user.id, &user.email)?;

        Ok(AuthenticatedUser {
            user,
            token: bearer,
        })
    }
}

/// Generate a high-entropy single-use login token (32 random bytes, hex).
#[must_use]
pub fn generate_login_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};

    #[test]
    fn test_generate_login_token_format() {
        let token = generate_login_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_login_token_unique() {
        assert_ne!(generate_login_token(), generate_login_token());
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"correct horse battery staple", &salt)
            .expect("hash")
            .to_string();

        assert!(verify_password("correct horse battery staple", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password_rejects_malformed_hash() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
