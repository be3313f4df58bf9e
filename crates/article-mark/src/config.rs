use anyhow::Context;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use toml::{value::Table, Value};

use crate::error::{Error, Result};

/// Name of the configuration file looked up when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "article.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Configuration for the generation service.
    pub service: ServiceConfig,

    /// Configuration for the copy and download actions.
    pub export: ExportConfig,

    /// Any remaining tables, for tools built on top of this crate.
    rest: Value,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let mut buffer = String::new();
        File::open(path)
            .with_context(|| "Failed to open config file")?
            .read_to_string(&mut buffer)
            .with_context(|| "Failed to read config file")?;

        Config::from_str(&buffer)
    }

    /// Like [`Config::load`], but a missing file yields the default configuration.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();

        match File::open(path) {
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Ok(Config::default())
            }
            _ => Config::load(path),
        }
    }

    /// Deserialize a table not otherwise understood by this crate.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .rest
            .get(key)
            .with_context(|| format!("Missing configuration table: {key}"))?;

        value
            .clone()
            .try_into()
            .with_context(|| format!("Invalid configuration table: {key}"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            export: ExportConfig::default(),
            rest: Value::Table(Table::default()),
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = Value::deserialize(deserializer)?;
        let Value::Table(mut table) = raw else {
            return Err(D::Error::custom("article.toml must always be a toml table"));
        };

        let service: ServiceConfig = table
            .remove("service")
            .map(|service| service.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let export: ExportConfig = table
            .remove("export")
            .map(|export| export.try_into().map_err(D::Error::custom))
            .transpose()?
            .unwrap_or_default();

        let config = Config {
            service,
            export,
            rest: Value::Table(table),
        };

        Ok(config)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        toml::from_str(source).with_context(|| "Attempted to parse invalid configuration file")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServiceConfig {
    /// URL the topic is posted to.
    pub endpoint: String,
    /// Request timeout in seconds. Generation is slow, so this is generous.
    pub timeout_secs: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from("http://localhost:8000/generate-article"),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExportConfig {
    /// Directory downloaded articles are written to.
    pub destination: PathBuf,
    /// Command that receives the Markdown on stdin when copying.
    pub clipboard_command: String,
    /// Escape Markdown control characters in article text.
    pub escape_markdown: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("."),
            clipboard_command: String::from(default_clipboard_command()),
            escape_markdown: false,
        }
    }
}

fn default_clipboard_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "pbcopy"
    } else if cfg!(target_os = "windows") {
        "clip"
    } else {
        "xclip -selection clipboard"
    }
}
