//! Client configuration (service endpoints, timeouts, token location).

use std::path::PathBuf;
use std::time::Duration;

/// Base URLs of the backend services the admin client talks to.
///
/// The services are deployed separately, so each resource family has its own
/// base URL. Setting `RETAILINV_API_URL` points all of them at one gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `/auth/*` and `/user/profile`.
    pub auth_url: String,
    /// `/stores`.
    pub stores_url: String,
    /// `/admin/users`.
    pub users_url: String,
    /// `/products`.
    pub products_url: String,
    /// `/inventory`.
    pub inventory_url: String,
    pub request_timeout: Duration,
}

const DEFAULT_ACCOUNTS_URL: &str = "http://localhost:8080";
const DEFAULT_INVENTORY_URL: &str = "http://localhost:8081";
const DEFAULT_PRODUCTS_URL: &str = "http://localhost:8082";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_ACCOUNTS_URL.to_string(),
            stores_url: DEFAULT_ACCOUNTS_URL.to_string(),
            users_url: DEFAULT_ACCOUNTS_URL.to_string(),
            products_url: DEFAULT_PRODUCTS_URL.to_string(),
            inventory_url: DEFAULT_INVENTORY_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// All services behind a single base URL (gateway deployments and tests).
    pub fn single(base_url: impl Into<String>) -> Self {
        let base = trim_base(&base_url.into());
        Self {
            auth_url: base.clone(),
            stores_url: base.clone(),
            users_url: base.clone(),
            products_url: base.clone(),
            inventory_url: base,
            ..Self::default()
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// `RETAILINV_API_URL` applies first, then the per-service overrides.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup("RETAILINV_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(base) => Self::single(base),
            None => Self::default(),
        };

        let overrides: [(&str, &mut String); 5] = [
            ("RETAILINV_AUTH_URL", &mut config.auth_url),
            ("RETAILINV_STORES_URL", &mut config.stores_url),
            ("RETAILINV_USERS_URL", &mut config.users_url),
            ("RETAILINV_PRODUCTS_URL", &mut config.products_url),
            ("RETAILINV_INVENTORY_URL", &mut config.inventory_url),
        ];
        for (key, slot) in overrides {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = trim_base(&value);
            }
        }

        if let Some(raw) = lookup("RETAILINV_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %raw, "ignoring invalid RETAILINV_TIMEOUT_SECS"),
            }
        }

        config
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Where the file-backed token store keeps the session.
///
/// `RETAILINV_TOKEN_FILE` wins; otherwise the platform data directory is used
/// (falling back to the working directory when none is known).
pub fn token_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("RETAILINV_TOKEN_FILE") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("retailinv")
        .join("session.json")
}
