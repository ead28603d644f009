//! Config command implementation.
//!
//! Settings live in a TOML file, by default `~/.config/ghq/config.toml`.
//! `GHQ_CONFIG` points at another file; `XDG_CONFIG_HOME` moves the default
//! directory.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Schema version written to new files.
const CONFIG_VERSION: u32 = 1;

const CONFIG_PATH_ENV: &str = "GHQ_CONFIG";

/// Tokens up to this many characters are hidden entirely.
const REDACT_FULLY_UP_TO: usize = 8;

/// Characters kept visible at each end of a longer token.
const REDACT_KEEP: usize = 4;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "current_version")]
    pub version: u32,

    /// Used when neither `--token` nor `GH_TOKEN` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Host for repositories given as OWNER/REPO.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,
}

fn current_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: current_version(),
            token: None,
            hostname: None,
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl Config {
    /// Set keys and their display values, with the token redacted.
    fn entries(&self) -> Vec<(ConfigKey, String)> {
        let mut entries = Vec::new();
        if let Some(token) = &self.token {
            entries.push((ConfigKey::Token, redact_token(token)));
        }
        if let Some(hostname) = &self.hostname {
            entries.push((ConfigKey::Hostname, hostname.clone()));
        }
        if let Some(color) = self.output.color {
            entries.push((ConfigKey::OutputColor, color.to_string()));
        }
        entries
    }

    /// A copy safe to print.
    fn redacted(&self) -> Self {
        Self {
            version: self.version,
            token: self.token.as_deref().map(redact_token),
            hostname: self.hostname.clone(),
            output: OutputConfig {
                color: self.output.color,
            },
        }
    }
}

/// Keys accepted by `ghq config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Token,
    Hostname,
    OutputColor,
}

impl ConfigKey {
    const ALL: [ConfigKey; 3] = [ConfigKey::Token, ConfigKey::Hostname, ConfigKey::OutputColor];

    fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Token => "token",
            ConfigKey::Hostname => "hostname",
            ConfigKey::OutputColor => "output.color",
        }
    }

    /// Validates `value` and stores it in `config`.
    fn apply(self, config: &mut Config, value: &str) -> Result<()> {
        match self {
            ConfigKey::Token => config.token = Some(value.to_string()),
            ConfigKey::Hostname => config.hostname = Some(parse_hostname(value)?),
            ConfigKey::OutputColor => config.output.color = Some(parse_switch(value)?),
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = ConfigKey::ALL.iter().map(|k| k.as_str()).collect();
                CommandError::Config(format!(
                    "unknown key '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Returns the config file location.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    let dir = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config"))
            .ok_or_else(|| CommandError::Config("cannot locate a home directory".to_string()))?,
    };
    Ok(dir.join("ghq").join("config.toml"))
}

/// Reads the config file; a missing file yields the defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    read_config(&path)
}

fn read_config(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .map_err(|e| CommandError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let config: Config = toml::from_str(&text)
        .map_err(|e| CommandError::Config(format!("cannot parse {}: {}", path.display(), e)))?;

    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "{} has schema version {}, this ghq understands up to {}",
            path.display(),
            config.version,
            CONFIG_VERSION
        )));
    }
    Ok(config)
}

fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| CommandError::Config(format!("cannot create {}: {}", dir.display(), e)))?;
    }
    let text = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("cannot encode config: {}", e)))?;
    fs::write(path, text)
        .map_err(|e| CommandError::Config(format!("cannot write {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), "config written");
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let exists = path.exists();
    let config = load_config()?;

    if ctx.json_output {
        return print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": exists,
            "config": config.redacted(),
        }));
    }
    if ctx.quiet {
        return Ok(());
    }

    use owo_colors::OwoColorize;
    let title = format!("{}", path.display());
    if ctx.use_colors {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }

    if !exists {
        println!("  (not created yet; use 'ghq config set <key> <value>')");
        return Ok(());
    }

    let entries = config.entries();
    if entries.is_empty() {
        println!("  (no settings)");
    }
    for (key, value) in entries {
        if ctx.use_colors {
            println!("  {} = {}", key.cyan(), value);
        } else {
            println!("  {} = {}", key, value);
        }
    }
    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    pub key: String,
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let key: ConfigKey = opts.key.parse()?;
    let path = get_config_path()?;

    let mut config = load_config()?;
    key.apply(&mut config, &opts.value)?;
    write_config(&path, &config)?;

    let shown = match key {
        ConfigKey::Token => redact_token(&opts.value),
        _ => opts.value.clone(),
    };

    if ctx.json_output {
        print_json(&serde_json::json!({
            "key": key.as_str(),
            "value": shown,
            "path": path.display().to_string(),
        }))
    } else {
        if !ctx.quiet {
            println!("Set {} = {}", key, shown);
        }
        Ok(())
    }
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        print_json(&serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        }))
    } else {
        println!("{}", path.display());
        Ok(())
    }
}

/// Hides all but both ends of a token, counting characters rather than bytes.
fn redact_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= REDACT_FULLY_UP_TO {
        return "****".to_string();
    }
    let head: String = chars[..REDACT_KEEP].iter().collect();
    let tail: String = chars[chars.len() - REDACT_KEEP..].iter().collect();
    format!("{head}...{tail}")
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(CommandError::Config(format!(
            "'{}' is not a boolean (try true or false)",
            other
        ))),
    }
}

fn parse_hostname(value: &str) -> Result<String> {
    let host = value.trim();
    if host.is_empty() || host.contains(['/', ':']) || host.contains(char::is_whitespace) {
        return Err(CommandError::Config(format!(
            "'{}' is not a bare hostname such as github.example.com",
            value
        )));
    }
    Ok(host.to_ascii_lowercase())
}
