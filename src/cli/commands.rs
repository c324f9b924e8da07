use crate::cli::args::{Args, Command, ConfigCommand, GraphCommand, OutputFormat, SpoCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter};
use crate::core::command::{CommandContext, O365Command};
use crate::core::graph::TeamsChannelMessageGet;
use crate::core::spo::AppGet;
use crate::core::status::Status;
use crate::domain::config::CliConfig;
use crate::domain::error::{CliError, CliResult};
use crate::infrastructure::auth::StoredTokenAuth;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::http::ReqwestHttpClient;
use crate::infrastructure::logging;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Environment variable holding an access token used for every resource
pub const ACCESS_TOKEN_ENV: &str = "O365CLI_ACCESS_TOKEN";

/// Execute CLI command
pub async fn execute_command(args: Args) -> CliResult<()> {
    let command: Box<dyn O365Command> = match args.command {
        Command::Graph(graph_args) => match graph_args.command {
            GraphCommand::TeamsChannelMessageGet(options) => {
                Box::new(TeamsChannelMessageGet::from(options))
            }
        },
        Command::Spo(spo_args) => match spo_args.command {
            SpoCommand::AppGet(options) => Box::new(AppGet::from(options)),
        },
        Command::Status => Box::new(Status),
        Command::Config(config_args) => {
            let config_manager = ConfigManager::new()?;
            let config = load_config(&config_manager, args.config.as_deref())?;
            let writer = ConsoleWriter::new(output_format(args.output, &config));
            return execute_config_command(config_args.command, &writer, &config, &config_manager);
        }
        Command::Version => {
            println!("o365cli {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    // Invalid options never reach configuration, auth or the network
    command.validate()?;

    let config_manager = ConfigManager::new()?;
    let config = load_config(&config_manager, args.config.as_deref())?;
    let writer = ConsoleWriter::new(output_format(args.output, &config));

    if !args.quiet {
        let level = logging::log_level(&config.global.log_level, args.verbose, args.debug);
        logging::init_logging(level)?;
    }
    debug!(command = command.name(), "Executing command");

    let auth = StoredTokenAuth::new(&config, config_manager.token_store_path(&config))?
        .with_access_token_override(std::env::var(ACCESS_TOKEN_ENV).ok());
    let ctx = CommandContext::new(Arc::new(auth), Arc::new(ReqwestHttpClient::new()));

    let body = command.execute(&ctx).await?;
    writer.write_response(&body)?;

    if args.verbose && !args.quiet {
        writer.write_done()?;
    }
    Ok(())
}

fn load_config(config_manager: &ConfigManager, path: Option<&str>) -> CliResult<CliConfig> {
    match path {
        Some(path) => config_manager.load_config_from_path(path.as_ref()),
        None => config_manager.load_config(),
    }
}

fn output_format(requested: Option<OutputFormat>, config: &CliConfig) -> OutputFormat {
    requested.unwrap_or_else(|| OutputFormat::from_config(&config.global.output))
}

fn execute_config_command(
    command: ConfigCommand,
    writer: &ConsoleWriter,
    config: &CliConfig,
    config_manager: &ConfigManager,
) -> CliResult<()> {
    match command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
            Ok(())
        }
        ConfigCommand::Validate { file } => {
            let result = match &file {
                Some(config_path) => config_manager.load_config_from_path(config_path.as_ref()),
                None => config_manager.load_config(),
            };
            result?;
            let name = file.as_deref().unwrap_or("Current configuration");
            writer.write_message(&format!("{} is valid", name))?;
            Ok(())
        }
        ConfigCommand::Init { path, global } => {
            if global {
                let global_path = config_manager.get_global_config_path_ref();
                if global_path.exists() {
                    return Err(CliError::Config {
                        message: format!("Global configuration already exists at '{}'", global_path.display()),
                    });
                }
                config_manager.save_config_to_path(global_path, &CliConfig::default())?;
                writer.write_message(&format!("Global configuration initialized at '{}'", global_path.display()))?;
            } else {
                let dir = match path {
                    Some(path) => PathBuf::from(path),
                    None => std::env::current_dir()?,
                };
                let config_file = config_manager.init_project_config(&dir)?;
                writer.write_message(&format!("Project configuration initialized at '{}'", config_file.display()))?;
            }
            Ok(())
        }
    }
}
