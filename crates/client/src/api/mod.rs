//! Per-resource endpoint bindings for the CRUD screens.
//!
//! Every call reads the token from the [`TokenStore`] at call time (never
//! cached) and sends it as a bearer credential. A call without a stored token
//! fails with `Unauthenticated` before any request is made. A 401 here does
//! not clear the session; only token validation does that.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{SessionError, SessionResult};
use crate::http::{build_client, ensure_ok, parse_json};
use crate::token_store::TokenStore;

mod inventory;
mod products;
mod stores;
mod users;

pub struct ApiClient {
    config: ClientConfig,
    http: reqwest::Client,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> SessionResult<Self> {
        let http = build_client(&config)?;
        Ok(Self { config, http, store })
    }

    fn authorized(&self, method: Method, url: String) -> SessionResult<RequestBuilder> {
        let token = self.store.read().ok_or(SessionError::Unauthenticated)?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(&self, req: RequestBuilder, label: &str) -> SessionResult<reqwest::Response> {
        let resp = req.send().await.map_err(|e| {
            tracing::warn!(request = label, "request failed: {e}");
            SessionError::transport(e)
        })?;
        ensure_ok(resp, label).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, label: &str) -> SessionResult<T> {
        let req = self.authorized(Method::GET, url)?;
        parse_json(self.send(req, label).await?, label).await
    }

    async fn send_json<B, T>(&self, method: Method, url: String, body: &B, label: &str) -> SessionResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let req = self.authorized(method, url)?.json(body);
        parse_json(self.send(req, label).await?, label).await
    }

    async fn delete(&self, url: String, label: &str) -> SessionResult<()> {
        let req = self.authorized(Method::DELETE, url)?;
        self.send(req, label).await?;
        Ok(())
    }
}
