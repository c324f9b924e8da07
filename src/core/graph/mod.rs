// Microsoft Graph commands
pub mod teams_channel_message_get;

pub use teams_channel_message_get::TeamsChannelMessageGet;
