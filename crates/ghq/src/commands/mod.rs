//! Command implementations for the ghq CLI.

pub mod completions;
pub mod config;
pub mod list;
pub mod new;
pub mod state;

use gh_api_rs::client::GitHubClient;
use gh_api_rs::repo::{RepoRef, DEFAULT_HOST};

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Query building or name resolution error.
    #[error("{0}")]
    Query(#[from] gh_query_rs::QueryError),

    /// API error.
    #[error("API error: {0}")]
    Api(#[from] gh_api_rs::error::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Token from `--token`, `GH_TOKEN` or the config file.
    pub token: Option<String>,
    /// Host from `--hostname` or `GH_HOST`.
    pub hostname: Option<String>,
    /// Host from the config file.
    pub config_hostname: Option<String>,
}

impl CommandContext {
    /// Creates a command context from CLI arguments and the loaded config.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            token: cli.token.clone().or_else(|| config.token.clone()),
            hostname: cli.hostname.clone(),
            config_hostname: config.hostname.clone(),
        }
    }

    /// Parses a repository argument and settles its host.
    ///
    /// `--hostname` wins, then a host written in the argument, then the
    /// config file, then `github.com`.
    pub fn resolve_repo(&self, raw: &str) -> Result<RepoRef> {
        let parsed: RepoRef = raw.parse()?;
        let host_in_argument = raw.trim().split('/').count() == 3;

        let host = match (&self.hostname, &self.config_hostname) {
            (Some(host), _) => host.as_str(),
            (None, _) if host_in_argument => return Ok(parsed),
            (None, Some(host)) => host.as_str(),
            (None, None) => DEFAULT_HOST,
        };
        Ok(RepoRef::with_host(host, parsed.owner(), parsed.name()))
    }

    /// Returns a client when a token is configured.
    pub fn client(&self) -> Result<Option<GitHubClient>> {
        match &self.token {
            Some(token) => Ok(Some(GitHubClient::new(token.as_str())?)),
            None => Ok(None),
        }
    }

    /// Returns a client, failing when no token is configured.
    pub fn require_client(&self, reason: &str) -> Result<GitHubClient> {
        self.client()?.ok_or_else(|| {
            CommandError::Config(format!(
                "a GitHub token is required to {}. Set GH_TOKEN or run 'ghq config set token <TOKEN>'",
                reason
            ))
        })
    }
}
