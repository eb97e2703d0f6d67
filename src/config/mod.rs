use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        errors::CostError,
        utils::{ensure_dir, PathResolver},
    },
    cost::ScenarioParameters,
    storage::json_backend::replace_atomic,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub currency: String,
    pub currency_symbol: String,
    /// Defaults applied to every comparison unless overridden on the command line.
    pub parameters: ScenarioParameters,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "EUR".into(),
            currency_symbol: "€".into(),
            parameters: ScenarioParameters::default(),
        }
    }
}

impl Config {
    /// Formats an amount with the configured symbol and two decimals.
    pub fn format_amount(&self, amount: f64) -> String {
        let sign = if amount < 0.0 { "-" } else { "" };
        format!(
            "{sign}{}{}",
            self.currency_symbol,
            group_thousands(amount.abs())
        )
    }
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{fraction}")
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager for the resolved data directory.
    pub fn new() -> Result<Self, CostError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, CostError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, CostError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Reads the configuration, falling back to defaults when no file exists yet.
    pub fn load(&self) -> Result<Config, CostError> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data).map_err(|err| {
            CostError::ConfigError(format!("{}: {}", self.path.display(), err))
        })?;
        config
            .parameters
            .validate()
            .map_err(|err| CostError::ConfigError(err.to_string()))?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), CostError> {
        config.parameters.validate()?;
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| CostError::ConfigError(err.to_string()))?;
        replace_atomic(&self.path, &json)?;
        tracing::debug!(path = %self.path.display(), "saved configuration");
        Ok(())
    }

    /// Writes the default configuration and returns it.
    pub fn reset(&self) -> Result<Config, CostError> {
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
