use crate::error::{ConfigError, Result};
use directories::BaseDirs;
use ini::{Ini, ParseOption};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Section of the COPR config holding the CLI credentials.
pub const SECTION: &str = "copr-cli";

/// Options of the `copr-cli` section, loaded once per run.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    options: HashMap<String, String>,
}

impl Settings {
    /// `~/.config/copr`, the file written by `copr-cli`.
    pub fn default_path() -> PathBuf {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config").join("copr"))
            .unwrap_or_else(|| PathBuf::from(".config/copr"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }

        debug!("reading COPR config from {}", path.display());

        // Values are kept exactly as written: no quote stripping, no escapes.
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };

        let ini = Ini::load_from_file_opt(path, options).map_err(ConfigError::Read)?;

        let options = ini
            .section(Some(SECTION))
            .ok_or(ConfigError::MissingSection(SECTION))?
            .iter()
            .map(|(key, value)| (key.to_lowercase(), value.to_string()))
            .collect();

        Ok(Self { options })
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        self.options.get(option).map(String::as_str)
    }

    pub fn require(&self, option: &'static str) -> Result<&str> {
        self.get(option)
            .ok_or_else(|| ConfigError::MissingOption(option).into())
    }
}

impl From<HashMap<String, String>> for Settings {
    fn from(options: HashMap<String, String>) -> Self {
        Self { options }
    }
}
