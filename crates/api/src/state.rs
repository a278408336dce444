//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::booqable::BooqableClient;
use crate::config::AppConfig;
use crate::services::auth::TokenSigner;
use crate::services::email::EmailService;

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("email transport error: {0}")]
    Email(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    booqable: BooqableClient,
    signer: TokenSigner,
    email: Option<EmailService>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be constructed from
    /// the email configuration.
    pub fn new(config: AppConfig, pool: PgPool) -> Result<Self, StateError> {
        let booqable = BooqableClient::new(&config.booqable);
        let signer = TokenSigner::new(config.auth_secret.clone());
        let email = config
            .email
            .as_ref()
            .map(EmailService::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                booqable,
                signer,
                email,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Booqable API client.
    #[must_use]
    pub fn booqable(&self) -> &BooqableClient {
        &self.inner.booqable
    }

    /// Get a reference to the bearer-token signer.
    #[must_use]
    pub fn signer(&self) -> &TokenSigner {
        &self.inner.signer
    }

    /// Get the email service, if outbound email is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }
}
