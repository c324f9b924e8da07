//! o365cli Library
//!
//! Command handlers for Microsoft Graph and SharePoint Online REST APIs,
//! with pluggable auth and HTTP collaborators.

pub mod cli;
pub mod core;
pub mod domain;
pub mod infrastructure;

pub use crate::core::{
    run_command, AuthProvider, CommandContext, HttpClient, HttpResponse, O365Command,
    RequestDescriptor, ServiceConnection,
};
pub use crate::core::graph::TeamsChannelMessageGet;
pub use crate::core::spo::{AppCatalogScope, AppGet};
pub use domain::config::CliConfig;
pub use domain::error::{CliError, CliResult};
