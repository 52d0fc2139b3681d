use crate::domain::error::WolframError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub app_id: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
    pub http_proxy: Option<String>,
    /// Request timeout; none unless configured
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            theme: default_theme(),
            http_proxy: None,
            timeout_secs: None,
            user_agent: default_user_agent(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "default".to_string()
}
fn default_user_agent() -> String {
    format!("wolfram/{}", env!("CARGO_PKG_VERSION"))
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}

impl Logging {
    /// Map the configured level to an `EnvFilter` directive
    pub fn filter_directive(&self) -> &'static str {
        match self.level.to_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "INFO" => "info",
            "WARN" => "warn",
            "ERROR" => "error",
            _ => "warn",
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wolfram").join("config.toml"))
}

pub fn load_config() -> Result<Config, WolframError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load a config file, falling back to defaults when it is missing or
/// cannot be parsed.
pub fn load_config_from(path: &Path) -> Result<Config, WolframError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match parse_config(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config, WolframError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn generate_config_sample() -> Result<(), WolframError> {
    let path = get_config_path().ok_or_else(|| {
        WolframError::Config("Cannot determine config directory".to_string())
    })?;

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    // Create directory if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let sample = Config {
        app_id: Some("YOUR-APP-ID".to_string()),
        ..Config::default()
    };
    let toml_content = toml::to_string_pretty(&sample)
        .map_err(|e| WolframError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(&path, toml_content)
        .map_err(|e| WolframError::Config(format!("Failed to write config file: {}", e)))?;
    println!("Generated config file at: {}", path.display());

    Ok(())
}
