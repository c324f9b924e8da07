use crate::core::command::{CommandContext, O365Command};
use crate::core::request::{RequestDescriptor, GRAPH_ACCEPT};
use crate::core::validation::is_valid_guid;
use crate::domain::error::{CliError, CliResult};
use async_trait::async_trait;
use tracing::info;

/// Retrieves a message from a channel in a Microsoft Teams team
#[derive(Debug, Clone, Default)]
pub struct TeamsChannelMessageGet {
    pub team_id: Option<String>,
    pub channel_id: Option<String>,
    pub message_id: Option<String>,
}

/// Validated message coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLocator<'a> {
    pub team_id: &'a str,
    pub channel_id: &'a str,
    pub message_id: &'a str,
}

impl TeamsChannelMessageGet {
    pub fn new(
        team_id: impl Into<String>,
        channel_id: impl Into<String>,
        message_id: impl Into<String>,
    ) -> Self {
        Self {
            team_id: Some(team_id.into()),
            channel_id: Some(channel_id.into()),
            message_id: Some(message_id.into()),
        }
    }

    /// Validate the options, in the order they are reported
    pub fn locator(&self) -> CliResult<MessageLocator<'_>> {
        let team_id = required(&self.team_id, "teamId")?;
        if !is_valid_guid(team_id) {
            return Err(CliError::validation(format!("{} is not a valid GUID", team_id)));
        }

        let channel_id = required(&self.channel_id, "channelId")?;
        let message_id = required(&self.message_id, "messageId")?;

        Ok(MessageLocator {
            team_id,
            channel_id,
            message_id,
        })
    }

    /// Build the message request against the given Graph resource
    pub fn request(&self, resource: &str, access_token: &str) -> CliResult<RequestDescriptor> {
        let locator = self.locator()?;
        let url = format!(
            "{}/beta/teams/{}/channels/{}/messages/{}",
            resource.trim_end_matches('/'),
            locator.team_id,
            locator.channel_id,
            locator.message_id
        );

        Ok(RequestDescriptor::get(url)
            .bearer(access_token)
            .accept(GRAPH_ACCEPT))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> CliResult<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CliError::validation(format!("Required parameter {} missing", name))),
    }
}

#[async_trait]
impl O365Command for TeamsChannelMessageGet {
    fn name(&self) -> &'static str {
        "graph teams-channel-message-get"
    }

    fn description(&self) -> &'static str {
        "Retrieves a message from a channel in a Microsoft Teams team"
    }

    fn validate(&self) -> CliResult<()> {
        self.locator().map(|_| ())
    }

    async fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        let resource = ctx.auth.connection().await.graph_resource;
        let access_token = ctx.auth.ensure_access_token(&resource).await?;

        let request = self.request(&resource, &access_token)?;
        info!(url = %request.url, "Retrieving channel message");

        ctx.execute_request(&request).await
    }
}
