//! Command dispatch module for routing CLI commands to their handlers.
//!
//! Local commands never touch the network. Remote commands may, depending
//! on their arguments and on whether a token is configured.

use gh_query_rs::Entity;

use crate::cli::{Cli, Commands, ConfigCommands, IssueCommands, PrCommands, Shell};
use crate::commands::list::ListUrlOptions;
use crate::commands::new::{FormTarget, NewUrlOptions};
use crate::commands::{self, CommandContext, CommandError, Result};

/// Commands that run without any remote call.
pub enum LocalDispatch<'a> {
    Config(&'a Option<ConfigCommands>),
    Completions(Shell),
    HasState(&'a str),
    Help,
}

impl<'a> LocalDispatch<'a> {
    /// Returns None if the command may need the API.
    pub fn try_from_cli(cli: &'a Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Config { command }) => Some(Self::Config(command)),
            Some(Commands::Completions { shell }) => Some(Self::Completions(*shell)),
            Some(Commands::HasState { query }) => Some(Self::HasState(query)),
            None => Some(Self::Help),
            _ => None,
        }
    }

    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Config(command) => dispatch_config(ctx, command),
            Self::Completions(shell) => {
                commands::completions::execute(*shell).map_err(CommandError::Io)
            }
            Self::HasState(query) => commands::state::execute(ctx, query),
            Self::Help => {
                if !ctx.quiet {
                    println!("ghq - GitHub issue and pull request URLs");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
    }
}

/// Commands that may call the API.
pub enum RemoteDispatch {
    ListUrl(ListUrlOptions),
    NewUrl(NewUrlOptions),
}

impl RemoteDispatch {
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        match &cli.command {
            Some(Commands::Issue { command }) => Some(match command {
                IssueCommands::ListUrl { filter, state } => Self::ListUrl(
                    ListUrlOptions::from_args(Entity::Issue, filter, state.as_str()),
                ),
                IssueCommands::NewUrl { form, project } => {
                    let mut opts = NewUrlOptions::from_args(FormTarget::Issue, form);
                    opts.state.projects = project.clone();
                    Self::NewUrl(opts)
                }
            }),
            Some(Commands::Pr { command }) => Some(match command {
                PrCommands::ListUrl {
                    filter,
                    state,
                    base,
                    draft,
                } => {
                    let mut opts =
                        ListUrlOptions::from_args(Entity::PullRequest, filter, state.as_str());
                    opts.filter.base_branch = base.clone();
                    opts.filter.draft = *draft;
                    Self::ListUrl(opts)
                }
                PrCommands::NewUrl {
                    form,
                    head,
                    base,
                    reviewer,
                } => {
                    let target = FormTarget::PullRequest {
                        head: head.clone(),
                        base: base.clone(),
                    };
                    let mut opts = NewUrlOptions::from_args(target, form);
                    opts.state.reviewers = reviewer.clone();
                    Self::NewUrl(opts)
                }
            }),
            _ => None,
        }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::ListUrl(opts) => commands::list::execute(ctx, opts).await,
            Self::NewUrl(opts) => commands::new::execute(ctx, opts).await,
        }
    }
}
