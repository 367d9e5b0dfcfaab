//! Layered engine configuration: defaults, then a TOML file named by
//! `BLACKJACK_CONFIG`, then individual environment variables.

use std::fs;

use blackjack_engine::config::EngineConfig;
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";
pub const DECKS_ENV: &str = "BLACKJACK_DECKS";
pub const TABLES_ENV: &str = "BLACKJACK_TABLES";
pub const CREDITS_ENV: &str = "BLACKJACK_CREDITS";
pub const SEED_ENV: &str = "BLACKJACK_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub num_decks_in_shoe: ValueSource,
    pub num_tables: ValueSource,
    pub starting_credits: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            num_decks_in_shoe: ValueSource::Default,
            num_tables: ValueSource::Default,
            starting_credits: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: EngineConfig,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<EngineConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = EngineConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.num_decks_in_shoe {
            cfg.num_decks_in_shoe = v;
            sources.num_decks_in_shoe = ValueSource::File;
        }
        if let Some(v) = f.num_tables {
            cfg.num_tables = v;
            sources.num_tables = ValueSource::File;
        }
        if let Some(v) = f.starting_credits {
            cfg.starting_credits = v;
            sources.starting_credits = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_value(DECKS_ENV, "Invalid deck count")? {
        cfg.num_decks_in_shoe = v;
        sources.num_decks_in_shoe = ValueSource::Env;
    }
    if let Some(v) = env_value(TABLES_ENV, "Invalid table count")? {
        cfg.num_tables = v;
        sources.num_tables = ValueSource::Env;
    }
    if let Some(v) = env_value(CREDITS_ENV, "Invalid starting credits")? {
        cfg.starting_credits = v;
        sources.starting_credits = ValueSource::Env;
    }
    if let Some(v) = env_value(SEED_ENV, "Invalid seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    cfg.validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn env_value<T: std::str::FromStr>(key: &str, invalid: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{}: {}", invalid, raw))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    num_decks_in_shoe: Option<usize>,
    #[serde(default)]
    num_tables: Option<usize>,
    #[serde(default)]
    starting_credits: Option<i64>,
    #[serde(default)]
    seed: Option<u64>,
}
