//! Unauthenticated operations: account creation, login and recovery.

use crate::client::QuantlixClient;
use crate::error::QuantlixError;
use crate::transport::{Call, Transport};
use crate::types::*;
use std::time::Duration;
use tracing::instrument;

/// Client for the pre-authentication part of the API.
///
/// No API key exists yet at this stage, so nothing here sends one. Use
/// [`PublicClient::authenticate`] once a key has been obtained.
#[derive(Clone, Debug)]
pub struct PublicClient {
    transport: Transport,
}

impl PublicClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, QuantlixError> {
        Ok(Self {
            transport: Transport::new(base_url.as_ref(), None)?,
        })
    }

    /// Create a client whose requests fail with a network error after `timeout`.
    pub fn with_timeout(
        base_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self, QuantlixError> {
        Ok(Self {
            transport: Transport::new(base_url.as_ref(), Some(timeout))?,
        })
    }

    /// Normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Authenticated client for the same server, reusing this client's connections.
    pub fn authenticate(
        &self,
        api_key: impl Into<String>,
    ) -> Result<QuantlixClient, QuantlixError> {
        QuantlixClient::from_transport(self.transport.clone(), api_key.into())
    }

    /// Create an account. The server emails a verification link; follow up with
    /// [`verify_email`](Self::verify_email).
    #[instrument(skip_all)]
    pub async fn signup(&self, credentials: &Credentials) -> Result<SignupResult, QuantlixError> {
        let call = Call::post("/auth/signup").json(credentials)?;
        self.transport.send(call, None).await
    }

    /// Exchange the token from the verification link for an API key.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<AuthResult, QuantlixError> {
        let call = Call::get("/auth/verify").query("token", token);
        self.transport.send(call, None).await
    }

    #[instrument(skip_all)]
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResult, QuantlixError> {
        let call = Call::post("/auth/forgot-password").json(&EmailRequest { email })?;
        self.transport.send(call, None).await
    }

    /// Set a new password using the token from the reset email.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResult, QuantlixError> {
        let call = Call::post("/auth/reset-password").json(&ResetPasswordRequest {
            token,
            new_password,
        })?;
        self.transport.send(call, None).await
    }

    #[instrument(skip_all)]
    pub async fn resend_verification(&self, email: &str) -> Result<MessageResult, QuantlixError> {
        let call = Call::post("/auth/resend-verification").json(&EmailRequest { email })?;
        self.transport.send(call, None).await
    }

    /// Log in. The returned key goes in the `X-API-Key` header of later calls.
    #[instrument(skip_all)]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResult, QuantlixError> {
        let call = Call::post("/auth/login").json(credentials)?;
        self.transport.send(call, None).await
    }

    /// Score a candidate password against the server's rules.
    #[instrument(skip_all)]
    pub async fn check_password_strength(
        &self,
        password: &str,
    ) -> Result<PasswordStrength, QuantlixError> {
        let call = Call::post("/auth/check-password-strength").json(&PasswordRequest { password })?;
        self.transport.send(call, None).await
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthStatus, QuantlixError> {
        self.transport.send(Call::get("/health"), None).await
    }

    /// Health check - returns true if the API is reachable and healthy.
    pub async fn health_check(&self) -> bool {
        self.health().await.is_ok()
    }
}
