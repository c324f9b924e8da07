use crate::core::graph::TeamsChannelMessageGet;
use crate::core::spo::AppGet;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Command line arguments for o365cli
#[derive(Parser, Debug)]
#[command(
    name = "o365cli",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage Microsoft 365 from the command line",
    long_about = "A command line interface for Microsoft Graph and SharePoint Online REST APIs. Log in first so that a connection is stored, or provide an access token in O365CLI_ACCESS_TOKEN."
)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging, including requests and responses
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output format, defaults to the configured one
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Microsoft Graph commands
    Graph(GraphArgs),
    /// SharePoint Online commands
    Spo(SpoArgs),
    /// Show Microsoft 365 login status
    Status,
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// JSON output, response bodies as received
    Json,
    /// Human-readable text output
    Text,
    /// Table output
    Table,
}

/// Microsoft Graph arguments
#[derive(ClapArgs, Debug)]
pub struct GraphArgs {
    /// Graph subcommand
    #[command(subcommand)]
    pub command: GraphCommand,
}

/// SharePoint Online arguments
#[derive(ClapArgs, Debug)]
pub struct SpoArgs {
    /// SharePoint subcommand
    #[command(subcommand)]
    pub command: SpoCommand,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Microsoft Graph subcommands
#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Retrieves a message from a channel in a Microsoft Teams team
    TeamsChannelMessageGet(TeamsChannelMessageGetArgs),
}

/// SharePoint Online subcommands
#[derive(Subcommand, Debug)]
pub enum SpoCommand {
    /// Gets information about the specific app from the specified app catalog
    AppGet(AppGetArgs),
}

/// Options of `graph teams-channel-message-get`
#[derive(ClapArgs, Debug, Clone)]
pub struct TeamsChannelMessageGetArgs {
    /// The ID of the team where the channel is located
    #[arg(short = 'i', long = "teamId", visible_alias = "team-id")]
    pub team_id: Option<String>,

    /// The ID of the channel that contains the message
    #[arg(short = 'c', long = "channelId", visible_alias = "channel-id")]
    pub channel_id: Option<String>,

    /// The ID of the message to retrieve
    #[arg(short = 'm', long = "messageId", visible_alias = "message-id")]
    pub message_id: Option<String>,
}

/// Options of `spo app-get`
#[derive(ClapArgs, Debug, Clone)]
pub struct AppGetArgs {
    /// ID of the app to retrieve information for. Specify the id or the name but not both
    #[arg(short = 'i', long)]
    pub id: Option<String>,

    /// Name of the app to retrieve information for. Specify the id or the name but not both
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// URL of the tenant or site collection app catalog. It must be specified when the scope is 'sitecollection'
    #[arg(short = 'u', long = "appCatalogUrl", visible_alias = "app-catalog-url")]
    pub app_catalog_url: Option<String>,

    /// Scope of the app catalog: tenant|sitecollection. Default tenant
    #[arg(short = 's', long)]
    pub scope: Option<String>,
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration
    Validate {
        /// Configuration file path
        file: Option<String>,
    },
    /// Create default configuration
    Init {
        /// Output directory for the project configuration
        #[arg(long)]
        path: Option<String>,
        /// Global configuration
        #[arg(short, long)]
        global: bool,
    },
}

impl From<TeamsChannelMessageGetArgs> for TeamsChannelMessageGet {
    fn from(args: TeamsChannelMessageGetArgs) -> Self {
        Self {
            team_id: args.team_id,
            channel_id: args.channel_id,
            message_id: args.message_id,
        }
    }
}

impl From<AppGetArgs> for AppGet {
    fn from(args: AppGetArgs) -> Self {
        Self {
            id: args.id,
            name: args.name,
            app_catalog_url: args.app_catalog_url,
            scope: args.scope,
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Json
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

impl OutputFormat {
    /// Parse a configured format name, falling back to JSON
    pub fn from_config(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value, true).unwrap_or_default()
    }
}
