//! Layered configuration for partscout.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults ([`Config::default`]).
//! 2. A config file: either the path given explicitly, or `partscout.toml`
//!    in the platform config directory if it exists. The format follows the
//!    file extension (`.toml`, `.yaml`/`.yml`, `.json`).
//! 3. Environment variables prefixed with `PARTSCOUT_`, nested with `__`,
//!    e.g. `PARTSCOUT_SERVER__BIND=0.0.0.0:8080`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use partscout_extract::{DatasheetLayout, SubstitutionLayout};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "PARTSCOUT_";
const CONFIG_FILE: &str = "partscout.toml";
const DATABASE_FILE: &str = "inventory.sqlite";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "partscout")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub datasheet: DatasheetLayout,
    pub substitution: SubstitutionLayout,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 3000)),
        }
    }
}

/// Outbound requests to the catalog sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    /// Whole-request timeout in seconds; `0` disables it.
    pub timeout_secs: u64,
}
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: partscout_fetch::DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}
impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Defaults to `inventory.sqlite` in the platform data directory.
    pub path: Option<PathBuf>,
}

impl Config {
    /// The platform default config file, whether or not it exists.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Builds the layered figment without extracting it.
    ///
    /// An explicit `path` must exist; the default path is skipped silently
    /// when missing.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
                }
                figment = merge_file(figment, path)?;
            },
            None => {
                if let Some(path) = Self::default_path()
                    && path.is_file()
                {
                    figment = merge_file(figment, &path)?;
                }
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)?.extract().or_raise(|| ErrorKind::Invalid)?;
        tracing::debug!(bind = %config.server.bind, "configuration loaded");
        Ok(config)
    }

    /// Where the inventory database lives.
    pub fn database_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .ok_or_raise(|| ErrorKind::NoDataDirectory)
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
    let figment = match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        Some("json") => figment.merge(Json::file_exact(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
    };
    tracing::debug!(path = %path.display(), "merged config file");
    Ok(figment)
}
