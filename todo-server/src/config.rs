//! Configuration system for the Todo API server.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/todo-api/config.toml`)
//! 4. Compiled defaults

use std::path::PathBuf;

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct TodoConfigFile {
    server: ServerFileConfig,
    auth: AuthFileConfig,
}

/// `[server]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
}

/// `[auth]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct AuthFileConfig {
    username: Option<String>,
    password: Option<String>,
    max_tokens: Option<usize>,
}

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

/// CLI arguments for the Todo API server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Todo API server")]
pub struct TodoCliArgs {
    /// Address to bind the HTTP server to.
    #[arg(short, long, env = "TODO_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/todo-api/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Username accepted by the login endpoint.
    #[arg(long, env = "TODO_USERNAME")]
    pub username: Option<String>,

    /// Password accepted by the login endpoint.
    #[arg(long, env = "TODO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Maximum number of live tokens before the oldest is evicted.
    #[arg(long)]
    pub max_tokens: Option<usize>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TODO_LOG")]
    pub log_level: String,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct TodoConfig {
    /// Address to bind the server to (e.g., `0.0.0.0:8080`).
    pub bind_addr: String,
    /// Username accepted by `POST /api/v1/auth/login`.
    pub username: String,
    /// Password accepted by `POST /api/v1/auth/login`.
    pub password: String,
    /// Maximum number of live tokens before FIFO eviction.
    pub max_tokens: usize,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            max_tokens: crate::auth::DEFAULT_MAX_TOKENS,
            log_level: "info".to_string(),
        }
    }
}

impl TodoConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// If no `--config` is given, the default path is tried and a missing
    /// file is treated as empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &TodoCliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &TodoCliArgs, file: &TodoConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            username: cli
                .username
                .clone()
                .or_else(|| file.auth.username.clone())
                .unwrap_or(defaults.username),
            password: cli
                .password
                .clone()
                .or_else(|| file.auth.password.clone())
                .unwrap_or(defaults.password),
            max_tokens: cli
                .max_tokens
                .or(file.auth.max_tokens)
                .unwrap_or(defaults.max_tokens),
            log_level: cli.log_level.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse the TOML config file.
fn load_config_file(
    explicit_path: Option<&std::path::Path>,
) -> Result<TodoConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(TodoConfigFile::default());
    };
    let path = config_dir.join("todo-api").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TodoConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
