use crate::core::auth::{AuthProvider, ServiceConnection};
use crate::core::odata;
use crate::core::request::HttpResponse;
use crate::domain::config::CliConfig;
use crate::domain::error::{CliError, CliResult};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Tokens this close to expiry are refreshed
const EXPIRY_SKEW_SECS: u64 = 60;
/// Lifetime assumed when the token endpoint reports none
const DEFAULT_LIFETIME_SECS: u64 = 3600;

/// Cached access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
    /// Expiry as seconds since the Unix epoch
    pub expires_on: u64,
}

impl AccessToken {
    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_on <= now + EXPIRY_SKEW_SECS
    }
}

/// Persisted connection state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStore {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub access_tokens: BTreeMap<String, AccessToken>,
}

impl TokenStore {
    /// Load the store, an absent file is an empty store
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| CliError::Config {
            message: format!("Failed to read token store {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| CliError::Config {
            message: format!("Failed to parse token store {}: {}", path.display(), e),
        })
    }

    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CliError::Config {
                message: format!("Failed to create token store directory: {}", e),
            })?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| CliError::Config {
            message: format!("Failed to write token store {}: {}", path.display(), e),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    // Azure AD v1 reports these as strings
    #[serde(default)]
    expires_on: Option<Value>,
    #[serde(default)]
    expires_in: Option<Value>,
}

/// Auth provider backed by a token store file and the Azure AD token endpoint
pub struct StoredTokenAuth {
    store_path: PathBuf,
    token_endpoint: String,
    client_id: String,
    graph_resource: String,
    access_token_override: Option<String>,
    store: Mutex<TokenStore>,
    client: reqwest::Client,
}

impl StoredTokenAuth {
    pub fn new(config: &CliConfig, store_path: PathBuf) -> CliResult<Self> {
        let store = TokenStore::load(&store_path)?;
        debug!(path = %store_path.display(), "Loaded token store");

        Ok(Self {
            store_path,
            token_endpoint: config.auth.token_endpoint(),
            client_id: config.auth.client_id.clone(),
            graph_resource: config.graph.resource.clone(),
            access_token_override: None,
            store: Mutex::new(store),
            client: reqwest::Client::new(),
        })
    }

    /// Use `token` for every resource instead of the token store
    pub fn with_access_token_override(mut self, token: Option<String>) -> Self {
        self.access_token_override = token.filter(|t| !t.is_empty());
        self
    }

    async fn request_token(&self, resource: &str, refresh_token: &str) -> CliResult<TokenResponse> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("resource", resource),
            ("refresh_token", refresh_token),
        ];

        debug!(endpoint = %self.token_endpoint, resource = %resource, "Requesting access token");
        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let response = HttpResponse { status, body };

        if !response.is_success() {
            return Err(CliError::auth(odata::error_message(&response)));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| CliError::auth(format!("Invalid token response: {}", e)))
    }
}

#[async_trait]
impl AuthProvider for StoredTokenAuth {
    async fn connection(&self) -> ServiceConnection {
        let store = self.store.lock().await;
        ServiceConnection {
            graph_resource: self.graph_resource.clone(),
            site_url: store.site_url.clone(),
            refresh_token: store.refresh_token.clone(),
            access_token_override: self.access_token_override.is_some(),
        }
    }

    async fn ensure_access_token(&self, resource: &str) -> CliResult<String> {
        if let Some(token) = &self.access_token_override {
            return Ok(token.clone());
        }

        let refresh_token = {
            let store = self.store.lock().await;
            if let Some(token) = cached_token(&store, resource) {
                debug!(resource = %resource, "Using cached access token");
                return Ok(token);
            }
            store.refresh_token.clone()
        };

        match refresh_token {
            Some(refresh_token) => self.get_access_token(resource, &refresh_token).await,
            None => Err(CliError::auth(format!(
                "No connection to {} found. Log in to Microsoft 365 first",
                resource
            ))),
        }
    }

    async fn get_access_token(&self, resource: &str, refresh_token: &str) -> CliResult<String> {
        if let Some(token) = &self.access_token_override {
            return Ok(token.clone());
        }

        if let Some(token) = cached_token(&*self.store.lock().await, resource) {
            return Ok(token);
        }

        if refresh_token.is_empty() {
            return Err(CliError::auth("Refresh token missing. Log in to Microsoft 365 first"));
        }

        let response = self.request_token(resource, refresh_token).await?;
        let now = unix_now();
        let expires_on = response
            .expires_on
            .as_ref()
            .and_then(as_seconds)
            .or_else(|| jwt_expiry(&response.access_token))
            .or_else(|| response.expires_in.as_ref().and_then(as_seconds).map(|s| now + s))
            .unwrap_or(now + DEFAULT_LIFETIME_SECS);

        let mut store = self.store.lock().await;
        store.access_tokens.insert(
            resource_key(resource),
            AccessToken {
                access_token: response.access_token.clone(),
                expires_on,
            },
        );
        if let Some(rotated) = response.refresh_token {
            store.refresh_token = Some(rotated);
        }
        store.save(&self.store_path)?;
        info!(resource = %resource, "Retrieved new access token");

        Ok(response.access_token)
    }
}

fn resource_key(resource: &str) -> String {
    resource.trim_end_matches('/').to_lowercase()
}

fn cached_token(store: &TokenStore, resource: &str) -> Option<String> {
    store
        .access_tokens
        .get(&resource_key(resource))
        .filter(|token| !token.is_expired(unix_now()))
        .map(|token| token.access_token.clone())
}

fn as_seconds(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// `exp` claim of a JWT access token
pub fn jwt_expiry(access_token: &str) -> Option<u64> {
    let payload = access_token.split('.').nth(1)?;
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&decoded).ok()?;
    claims.get("exp").and_then(as_seconds)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
