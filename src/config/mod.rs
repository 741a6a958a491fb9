use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{bail, Context};
use log::info;
use serde::Deserialize;

const CONFIG_DIR_NAME: &str = "starbucks-export";
const CONFIG_FILE_NAME: &str = "config.toml";

/// What to do with a transaction whose date cannot be normalised.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MalformedDatePolicy {
    /// Stop the whole export on the first bad record
    Abort,
    /// Log the record and leave it out of the export
    Skip,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) base_url: String,
    pub(crate) login_page: String,
    pub(crate) timeout_secs: u64,
    pub(crate) output: PathBuf,

    /// Transactions are fetched as a single page of this size.
    pub(crate) page_size: u32,
    pub(crate) on_malformed_date: MalformedDatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "https://card.starbucks.ch".to_string(),
            login_page: "/login.aspx".to_string(),
            timeout_secs: 5,
            output: PathBuf::from("starbucks-export.csv"),
            page_size: 150_000,
            on_malformed_date: MalformedDatePolicy::Abort,
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the user config dir when present.
    /// Falls back to defaults when no file is found.
    pub(crate) fn load(explicit: Option<&Path>) -> anyhow::Result<Config> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file {} does not exist", path.display());
            }
            return Config::load_from_file(path);
        }

        match default_config_path() {
            Some(path) if path.is_file() => Config::load_from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    pub(crate) fn load_from_file(path: &Path) -> anyhow::Result<Config> {
        info!("Loading config from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        Config::from_toml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn from_toml_str(content: &str) -> anyhow::Result<Config> {
        let config :Config = toml::from_str(content)?;
        if config.page_size == 0 {
            bail!("page_size must be greater than zero");
        }
        Ok(config)
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
