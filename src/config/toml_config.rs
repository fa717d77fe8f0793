use crate::config::cli::CliConfig;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TicketError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_port, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATE_FILE: &str = "counter.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub state_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
    pub verbose: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TicketError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TicketError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TICKET_PORT})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TicketError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Loads the file named by `--config` (if any) and applies the remaining
    /// flags on top of it.
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli_overrides(cli);
        Ok(config)
    }

    /// Resolves the configuration and validates it before anything else
    /// (logger, state file, listener) is touched.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let config = Self::resolve(cli)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliConfig) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(state_file) = &cli.state_file {
            self.storage.state_file = state_file.clone();
        }
        // 旗標只能開啟，不能關閉檔案中的設定
        self.logging.json |= cli.json_logs;
        self.logging.verbose |= cli.verbose;
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_port("server.port", self.server.port)?;
        validate_path(
            "storage.state_file",
            &self.storage.state_file.to_string_lossy(),
        )?;
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }
}

impl ConfigProvider for TomlConfig {
    fn host(&self) -> &str {
        &self.server.host
    }

    fn port(&self) -> u16 {
        self.server.port
    }

    fn state_file(&self) -> &Path {
        &self.storage.state_file
    }

    fn json_logs(&self) -> bool {
        self.logging.json
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
