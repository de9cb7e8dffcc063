//! Login, registration and remote token validation against the auth service.
//!
//! `SessionClient` never stores a freshly issued token itself: the caller
//! (login screen or CLI) decides to `save` it. The one side effect it does
//! own is invalidation: a token the server does not confirm is cleared.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::json;

use retailinv_auth::{Credentials, RegistrationRequest, UserAccount};

use crate::config::ClientConfig;
use crate::error::{SessionError, SessionResult};
use crate::http::{build_client, ensure_ok, error_messages, parse_json, summary};
use crate::token_store::TokenStore;
use crate::types::LoginResponse;

/// Server-side confirmation of the stored token.
///
/// This is the seam the authorization guard depends on; tests substitute a
/// scripted validator.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// `Ok(true)` only on an explicit confirmation, `Ok(false)` when there is
    /// no token or the server rejected it, `Err` when no answer was obtained.
    async fn confirm_token(&self) -> SessionResult<bool>;
}

pub struct SessionClient {
    config: ClientConfig,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
}

impl SessionClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> SessionResult<Self> {
        let http = build_client(&config)?;
        Ok(Self { config, http, store })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.auth_url, path)
    }

    /// Exchange credentials for a token.
    ///
    /// The returned token is *not* saved; hand it to `TokenStore::save`.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<LoginResponse> {
        self.login_with(&Credentials::new(email, password)).await
    }

    pub async fn login_with(&self, credentials: &Credentials) -> SessionResult<LoginResponse> {
        credentials.validate()?;

        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("login request failed: {e}");
                SessionError::transport(e)
            })?;

        let status = resp.status();
        match status {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED => {
                tracing::info!(email = %credentials.email, "login rejected");
                return Err(SessionError::InvalidCredentials);
            }
            StatusCode::FORBIDDEN => return Err(SessionError::Forbidden),
            _ => {
                let messages = error_messages(resp).await;
                tracing::warn!(%status, "login failed");
                return Err(SessionError::server(status, summary(status, &messages)));
            }
        }

        let login: LoginResponse = parse_json(resp, "login").await?;
        if login.token.trim().is_empty() {
            return Err(SessionError::InvalidResponse("login: empty token".to_string()));
        }

        tracing::info!(email = %credentials.email, role = ?login.role(), "login succeeded");
        Ok(login)
    }

    /// Create an account. Returns the account as stored by the server.
    pub async fn register(&self, request: &RegistrationRequest) -> SessionResult<UserAccount> {
        request.validate()?;

        let resp = self
            .http
            .post(self.url("/auth/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("registration request failed: {e}");
                SessionError::transport(e)
            })?;

        let status = resp.status();
        if status == StatusCode::BAD_REQUEST {
            let messages = error_messages(resp).await;
            tracing::info!(email = %request.email, "registration rejected");
            return Err(SessionError::ValidationFailed(messages));
        }
        if !status.is_success() {
            let messages = error_messages(resp).await;
            tracing::warn!(%status, "registration failed");
            return Err(SessionError::server(status, summary(status, &messages)));
        }

        let mut account: UserAccount = parse_json(resp, "register").await?;
        // The service echoes the stored (hashed) password back.
        account.password = None;

        tracing::info!(email = %account.email, role = %account.role, "account registered");
        Ok(account)
    }

    /// Confirm the stored token with the server.
    ///
    /// `false` without a network call when no token is stored. Any rejection
    /// or transport failure also yields `false` and clears the local session,
    /// even when the failure may have been transient.
    pub async fn validate_token(&self) -> bool {
        match self.check_token().await {
            Ok(valid) => valid,
            Err(err) => {
                tracing::warn!("token validation unavailable: {err}");
                false
            }
        }
    }

    async fn check_token(&self) -> SessionResult<bool> {
        let Some(token) = self.store.read() else {
            return Ok(false);
        };

        // The bearer header serves the gateway; the body serves the auth
        // service, which reads the token from the payload.
        let result = self
            .http
            .post(self.url("/auth/token/validate"))
            .bearer_auth(&token)
            .json(&json!({ "token": token }))
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => Ok(true),
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "token rejected; clearing session");
                self.store.clear_if_current(&token);
                Ok(false)
            }
            Err(err) => {
                tracing::warn!("token validation failed; clearing session");
                self.store.clear_if_current(&token);
                Err(SessionError::transport(err))
            }
        }
    }

    /// Drop the local session. Idempotent.
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("logged out");
    }

    /// Profile of the account the stored token belongs to.
    pub async fn profile(&self) -> SessionResult<UserAccount> {
        let token = self.store.read().ok_or(SessionError::Unauthenticated)?;

        let resp = self
            .http
            .get(self.url("/user/profile"))
            .bearer_auth(&token)
            .send()
            .await
            .map_err(SessionError::transport)?;

        let mut account: UserAccount = parse_json(ensure_ok(resp, "profile").await?, "profile").await?;
        account.password = None;
        tracing::debug!(user = %account.display_name(), role = %account.role, "profile loaded");
        Ok(account)
    }
}

#[async_trait]
impl TokenValidator for SessionClient {
    async fn confirm_token(&self) -> SessionResult<bool> {
        self.check_token().await
    }
}
