use crate::domain::{config::CliConfig, error::{CliError, CliResult}};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "o365cli";
const PROJECT_CONFIG_DIR: &str = ".o365cli";
const CONFIG_FILE: &str = "config.toml";
const TOKEN_STORE_FILE: &str = "connection.json";

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> CliResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Create a configuration manager over explicit paths
    pub fn with_paths(global_config_path: PathBuf, project_config_path: Option<PathBuf>) -> Self {
        Self {
            global_config_path,
            project_config_path,
        }
    }

    /// Load configuration from files
    ///
    /// Keys in the project file override the same keys in the global file.
    pub fn load_config(&self) -> CliResult<CliConfig> {
        let mut merged = toml::Table::new();

        if self.global_config_path.exists() {
            merge_tables(&mut merged, read_table(&self.global_config_path)?);
        }

        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                merge_tables(&mut merged, read_table(project_path)?);
            }
        }

        toml::Value::Table(merged)
            .try_into::<CliConfig>()
            .map_err(|e| CliError::Config {
                message: format!("Invalid configuration: {}", e),
            })
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> CliResult<CliConfig> {
        let content = fs::read_to_string(path).map_err(|e| CliError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| CliError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &CliConfig) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CliError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        let content = toml::to_string_pretty(config).map_err(|e| CliError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| CliError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration
    pub fn init_project_config(&self, path: &Path) -> CliResult<PathBuf> {
        let config_file = path.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE);

        if config_file.exists() {
            return Err(CliError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        self.save_config_to_path(&config_file, &CliConfig::default())?;
        Ok(config_file)
    }

    /// Token store location for the given configuration
    pub fn token_store_path(&self, config: &CliConfig) -> PathBuf {
        match &config.auth.token_store {
            Some(path) => path.clone(),
            None => self
                .global_config_path
                .with_file_name(TOKEN_STORE_FILE),
        }
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }

    /// Get global configuration path
    fn get_global_config_path() -> CliResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(PROJECT_CONFIG_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }
}

fn read_table(path: &Path) -> CliResult<toml::Table> {
    let content = fs::read_to_string(path).map_err(|e| CliError::Config {
        message: format!("Failed to read config file {}: {}", path.display(), e),
    })?;

    content.parse::<toml::Table>().map_err(|e| CliError::Config {
        message: format!("Failed to parse config file {}: {}", path.display(), e),
    })
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}
