use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// o365cli configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Azure AD settings used when exchanging refresh tokens
    #[serde(default)]
    pub auth: AuthConfig,
    /// Microsoft Graph settings
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Default output format (json, text, table)
    #[serde(default = "default_output")]
    pub output: String,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Azure AD authority, token endpoint is `{authority}/oauth2/token`
    #[serde(default = "default_authority")]
    pub authority: String,
    /// Application (client) id registered in Azure AD
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Token store file; defaults to `~/.config/o365cli/connection.json`
    #[serde(default)]
    pub token_store: Option<PathBuf>,
}

/// Microsoft Graph settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph resource URL
    #[serde(default = "default_graph_resource")]
    pub resource: String,
}

// Default value functions
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_output() -> String {
    "json".to_string()
}

fn default_authority() -> String {
    "https://login.microsoftonline.com/common".to_string()
}

fn default_client_id() -> String {
    "31359c7f-bd7e-475c-86db-fdb8c937548e".to_string()
}

fn default_graph_resource() -> String {
    "https://graph.microsoft.com".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output: default_output(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authority: default_authority(),
            client_id: default_client_id(),
            token_store: None,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            resource: default_graph_resource(),
        }
    }
}

impl AuthConfig {
    /// Token endpoint of the configured authority
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.authority.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = CliConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.graph.resource, "https://graph.microsoft.com");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            [global]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.global.log_level, "debug");
        assert_eq!(config.global.output, "json");
        assert_eq!(config.auth.client_id, "31359c7f-bd7e-475c-86db-fdb8c937548e");
        assert!(config.auth.token_store.is_none());
    }

    #[test]
    fn test_token_endpoint() {
        let mut auth = AuthConfig::default();
        assert_eq!(
            auth.token_endpoint(),
            "https://login.microsoftonline.com/common/oauth2/token"
        );

        auth.authority = "http://127.0.0.1:1234/tenant/".to_string();
        assert_eq!(auth.token_endpoint(), "http://127.0.0.1:1234/tenant/oauth2/token");
    }
}
