use crate::domain::error::CliResult;
use async_trait::async_trait;
use serde::Serialize;

/// Snapshot of the stored connection to Microsoft 365
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConnection {
    /// Microsoft Graph resource URL
    pub graph_resource: String,
    /// SharePoint Online site the user logged in to
    pub site_url: Option<String>,
    /// Refresh token used to acquire tokens for other resources
    #[serde(skip)]
    pub refresh_token: Option<String>,
    /// An access token was supplied externally
    pub access_token_override: bool,
}

impl ServiceConnection {
    /// Whether tokens can be acquired at all
    pub fn is_connected(&self) -> bool {
        self.refresh_token.is_some() || self.access_token_override
    }
}

/// Access token provider
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Current connection details
    async fn connection(&self) -> ServiceConnection;

    /// Return a valid access token for `resource`, refreshing when needed
    async fn ensure_access_token(&self, resource: &str) -> CliResult<String>;

    /// Exchange `refresh_token` for an access token to `resource`
    async fn get_access_token(&self, resource: &str, refresh_token: &str) -> CliResult<String>;
}
