// Core module - Commands and the collaborator seams they depend on
pub mod auth;
pub mod command;
pub mod graph;
pub mod http;
pub mod odata;
pub mod request;
pub mod spo;
pub mod status;
pub mod validation;

pub use auth::{AuthProvider, ServiceConnection};
pub use command::{run_command, CommandContext, O365Command};
pub use http::HttpClient;
pub use request::{HttpResponse, RequestDescriptor};
