use crate::cli::args::OutputFormat;
use crate::domain::config::CliConfig;
use serde_json::Value;
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_response(&self, body: &str) -> Result<(), OutputError>;
    fn write_config(&self, config: &CliConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_done(&self) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<OutputError> for crate::domain::error::CliError {
    fn from(err: OutputError) -> Self {
        Self::Output(err.to_string())
    }
}

/// Console output writer
pub struct ConsoleWriter {
    format: OutputFormat,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

/// Render a response body in the requested format
///
/// JSON output is the body exactly as received.
pub fn render_response(format: &OutputFormat, body: &str) -> Result<String, OutputError> {
    if matches!(format, OutputFormat::Json) {
        return Ok(body.to_string());
    }

    let object = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => object,
        _ => return Ok(body.to_string()),
    };

    match format {
        OutputFormat::Text => Ok(object
            .iter()
            .map(|(key, value)| format!("{}: {}", key, display_value(value)))
            .collect::<Vec<_>>()
            .join("\n")),
        _ => {
            let rows: Vec<PropertyRow> = object
                .iter()
                .map(|(key, value)| PropertyRow {
                    property: key.clone(),
                    value: display_value(value),
                })
                .collect();
            Ok(Table::new(rows).to_string())
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl OutputWriter for ConsoleWriter {
    fn write_response(&self, body: &str) -> Result<(), OutputError> {
        println!("{}", render_response(&self.format, body)?);
        Ok(())
    }

    fn write_config(&self, config: &CliConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                println!("o365cli Configuration:");
                println!("  Log level: {}", config.global.log_level);
                println!("  Output: {}", config.global.output);
                println!("  Authority: {}", config.auth.authority);
                println!("  Client id: {}", config.auth.client_id);
                if let Some(path) = &config.auth.token_store {
                    println!("  Token store: {}", path.display());
                }
                println!("  Graph resource: {}", config.graph.resource);
            }
            OutputFormat::Json => {
                let output = serde_json::to_string_pretty(config)?;
                println!("{}", output);
            }
            OutputFormat::Table => {
                let table_data = ConfigTableRow::rows(config);
                let table = Table::new(table_data);
                println!("{}", table);
            }
        }
        Ok(())
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                });
                println!("{}", serde_json::to_string(&output)?);
            }
            _ => {
                println!("{}", message);
            }
        }
        Ok(())
    }

    fn write_done(&self) -> Result<(), OutputError> {
        eprintln!("DONE");
        Ok(())
    }
}

/// Table row for a response property
#[derive(Tabled)]
struct PropertyRow {
    property: String,
    value: String,
}

/// Table row for a configuration setting
#[derive(Tabled)]
struct ConfigTableRow {
    section: &'static str,
    setting: &'static str,
    value: String,
}

impl ConfigTableRow {
    fn rows(config: &CliConfig) -> Vec<Self> {
        let mut rows = vec![
            Self { section: "global", setting: "log_level", value: config.global.log_level.clone() },
            Self { section: "global", setting: "output", value: config.global.output.clone() },
            Self { section: "auth", setting: "authority", value: config.auth.authority.clone() },
            Self { section: "auth", setting: "client_id", value: config.auth.client_id.clone() },
        ];
        if let Some(path) = &config.auth.token_store {
            rows.push(Self {
                section: "auth",
                setting: "token_store",
                value: path.display().to_string(),
            });
        }
        rows.push(Self { section: "graph", setting: "resource", value: config.graph.resource.clone() });
        rows
    }
}
