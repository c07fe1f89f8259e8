//! Configuration loading and typed config structures for the Courtside tracker.
//!
//! The configuration lives in `courtside-config.yaml` at the working
//! directory root. The file is optional: every field has a default, so a
//! missing file yields [`CourtsideConfig::default`]. Environment variables
//! override the server and logging settings after the file is read.

use std::path::{Path, PathBuf};

use courtside_types::{LINEUP_SIZE, MAX_ROSTER_SIZE};
use serde::Deserialize;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "courtside-config.yaml";

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "COURTSIDE_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for environment variable {var}: {source}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        source: std::num::ParseIntError,
    },

    /// `roster.max_players` is outside the playable range.
    #[error("roster.max_players must be between {min} and {max}, got {found}")]
    InvalidRosterSize {
        /// The configured value.
        found: usize,
        /// Smallest allowed value (one full lineup).
        min: usize,
        /// Largest allowed value.
        max: usize,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level tracker configuration.
///
/// Mirrors the structure of `courtside-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CourtsideConfig {
    /// Default team names for new games.
    #[serde(default)]
    pub game: GameConfig,

    /// Roster intake rules.
    #[serde(default)]
    pub roster: RosterConfig,

    /// HTTP server binding.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CourtsideConfig {
    /// Load configuration from the path in `COURTSIDE_CONFIG`, or from
    /// `courtside-config.yaml` in the working directory.
    ///
    /// A missing file is not an error; defaults are used. Environment
    /// overrides are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed, or if an environment override is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);

        if path.exists() {
            Self::from_file(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file found; using defaults");
            let mut config = Self::default();
            config.apply_env_overrides()?;
            Ok(config)
        }
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `COURTSIDE_HOST` overrides `server.host`
    /// - `COURTSIDE_PORT` overrides `server.port`
    /// - `COURTSIDE_LOG` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML,
    /// [`ConfigError::InvalidRosterSize`] if the roster cap is out of range, or
    /// [`ConfigError::InvalidEnv`] if `COURTSIDE_PORT` is not a port number.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides are
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidRosterSize`] if `roster.max_players` is not in
    /// `5..=15`.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.roster.validate()?;
        Ok(config)
    }

    /// Override settings with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `COURTSIDE_PORT` is set but is
    /// not a valid port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("COURTSIDE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("COURTSIDE_PORT") {
            self.server.port = port.parse().map_err(|source| ConfigError::InvalidEnv {
                var: "COURTSIDE_PORT",
                value: port,
                source,
            })?;
        }
        if let Some(level) = lookup("COURTSIDE_LOG") {
            self.logging.level = level;
        }
        Ok(())
    }
}

/// Default team names shown on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Name of the tracked team.
    #[serde(default = "default_own_team")]
    pub own_team: String,

    /// Name of the opponent.
    #[serde(default = "default_opponent_team")]
    pub opponent_team: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            own_team: default_own_team(),
            opponent_team: default_opponent_team(),
        }
    }
}

/// Roster intake rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// Names beyond this count are dropped at intake.
    #[serde(default = "default_max_players")]
    pub max_players: usize,

    /// Reject a roster that lists the same name twice.
    #[serde(default = "default_true")]
    pub reject_duplicate_names: bool,
}

impl RosterConfig {
    /// Check that `max_players` leaves room for a full lineup and stays
    /// within the per-game limit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRosterSize`] when out of range.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_players < LINEUP_SIZE || self.max_players > MAX_ROSTER_SIZE {
            return Err(ConfigError::InvalidRosterSize {
                found: self.max_players,
                min: LINEUP_SIZE,
                max: MAX_ROSTER_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_players: default_max_players(),
            reject_duplicate_names: true,
        }
    }
}

/// HTTP server binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive (e.g. `info`, `courtside_core=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_own_team() -> String {
    "Team".to_owned()
}

fn default_opponent_team() -> String {
    "Opponent".to_owned()
}

const fn default_max_players() -> usize {
    MAX_ROSTER_SIZE
}

const fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}
