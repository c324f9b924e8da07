use thiserror::Error;

/// o365cli unified error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Option validation failed; no request was issued
    #[error("{0}")]
    Validation(String),

    /// No usable token or connection; the message tells the user what to do
    #[error("{message}")]
    Auth { message: String },

    /// A command could not complete with what the service returned
    #[error("{0}")]
    Command(String),

    /// The remote service answered with a non-success status
    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn command(message: impl Into<String>) -> Self {
        Self::Command(message.into())
    }

    /// Whether the failure happened before any network activity
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type CliResult<T> = Result<T, CliError>;
