use crate::core::command::{CommandContext, O365Command};
use crate::domain::error::CliResult;
use async_trait::async_trait;
use serde::Serialize;

/// Shows the stored connection to Microsoft 365 services
#[derive(Debug, Clone, Default)]
pub struct Status;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ServiceStatus {
    connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatusReport {
    graph: ServiceStatus,
    spo: ServiceStatus,
}

#[async_trait]
impl O365Command for Status {
    fn name(&self) -> &'static str {
        "status"
    }

    fn description(&self) -> &'static str {
        "Shows Microsoft 365 login status"
    }

    fn validate(&self) -> CliResult<()> {
        Ok(())
    }

    async fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        let connection = ctx.auth.connection().await;
        let connected = connection.is_connected();

        let report = StatusReport {
            graph: ServiceStatus {
                connected,
                resource: connected.then(|| connection.graph_resource.clone()),
                site_url: None,
            },
            spo: ServiceStatus {
                connected: connected && connection.site_url.is_some(),
                resource: None,
                site_url: connection.site_url.clone(),
            },
        };

        Ok(serde_json::to_string(&report)?)
    }
}
