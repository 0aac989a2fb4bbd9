use serde::Deserialize;
use std::{env, fs, path::PathBuf};
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "CHESS_CONFIG_PATH";
pub const DB_PATH_VAR: &str = "CHESS_DB_PATH";
pub const BIND_ADDR_VAR: &str = "CHESS_BIND_ADDR";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_path: PathBuf,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "chess_rules.db".into(),
            bind_addr: "127.0.0.1:3000".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_yaml::Error),
}

impl Config {
    /// Reads a YAML file if one is given and exists, defaults otherwise.
    pub fn load(path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => {
                let content = fs::read_to_string(p).map_err(ConfigError::Read)?;
                Self::parse(&content)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(ConfigError::Parse)
    }

    /// File named by `CHESS_CONFIG_PATH`, then per-field environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
        let mut cfg = Self::load(path.as_ref())?;

        if let Some(db) = env::var_os(DB_PATH_VAR) {
            cfg.database_path = db.into();
        }
        if let Ok(addr) = env::var(BIND_ADDR_VAR) {
            cfg.bind_addr = addr;
        }
        Ok(cfg)
    }
}
