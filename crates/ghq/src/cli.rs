//! CLI argument parsing using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// ghq - build GitHub issue and pull request URLs
#[derive(Parser, Debug)]
#[command(name = "ghq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override GitHub token (default: from env/config)
    #[arg(long, global = true, env = "GH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub host to use for repositories given as OWNER/REPO
    #[arg(long, global = true, env = "GH_HOST")]
    pub hostname: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build issue URLs
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },

    /// Build pull request URLs
    Pr {
        #[command(subcommand)]
        command: PrCommands,
    },

    /// Report whether a search query already filters by state
    HasState {
        /// Free-text search query
        query: String,
    },

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Issue subcommands
#[derive(Subcommand, Debug)]
pub enum IssueCommands {
    /// Print the web URL of a filtered issue listing
    ListUrl {
        #[command(flatten)]
        filter: ListFilterArgs,

        /// Filter by state
        #[arg(short, long, value_enum, default_value_t = IssueState::Open)]
        state: IssueState,
    },

    /// Print the web URL of a prefilled new issue form
    NewUrl {
        #[command(flatten)]
        form: FormArgs,

        /// Add a project by name (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append)]
        project: Vec<String>,
    },
}

/// Pull request subcommands
#[derive(Subcommand, Debug)]
pub enum PrCommands {
    /// Print the web URL of a filtered pull request listing
    ListUrl {
        #[command(flatten)]
        filter: ListFilterArgs,

        /// Filter by state
        #[arg(short, long, value_enum, default_value_t = PrState::Open)]
        state: PrState,

        /// Filter by base branch
        #[arg(short = 'B', long)]
        base: Option<String>,

        /// Filter by draft state
        #[arg(short, long)]
        draft: Option<bool>,
    },

    /// Print the web URL of a prefilled pull request comparison form
    NewUrl {
        #[command(flatten)]
        form: FormArgs,

        /// Branch containing the changes
        #[arg(short = 'H', long)]
        head: String,

        /// Branch to merge into (default: the repository default branch)
        #[arg(short = 'B', long)]
        base: Option<String>,

        /// Request a review (repeatable)
        #[arg(short, long, action = clap::ArgAction::Append)]
        reviewer: Vec<String>,
    },
}

/// Filters shared by issue and pull request listings
#[derive(Args, Debug, Clone)]
pub struct ListFilterArgs {
    /// Repository as OWNER/REPO or HOST/OWNER/REPO
    #[arg(short = 'R', long)]
    pub repo: String,

    /// Filter by assignee (`@me` for yourself)
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Filter by author (`@me` for yourself)
    #[arg(short = 'A', long)]
    pub author: Option<String>,

    /// Filter by mentioned user (`@me` for yourself)
    #[arg(long)]
    pub mention: Option<String>,

    /// Filter by label (repeatable)
    #[arg(short, long, action = clap::ArgAction::Append)]
    pub label: Vec<String>,

    /// Filter by milestone
    #[arg(short, long)]
    pub milestone: Option<String>,

    /// Additional search query
    #[arg(short = 'S', long)]
    pub search: Option<String>,
}

/// Fields shared by issue and pull request creation forms
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// Repository as OWNER/REPO or HOST/OWNER/REPO
    #[arg(short = 'R', long)]
    pub repo: String,

    /// Title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Body
    #[arg(short, long, default_value = "")]
    pub body: String,

    /// Assign a user (repeatable, `@me` for yourself)
    #[arg(short, long, action = clap::ArgAction::Append)]
    pub assignee: Vec<String>,

    /// Add a label (repeatable)
    #[arg(short, long, action = clap::ArgAction::Append)]
    pub label: Vec<String>,

    /// Milestone title
    #[arg(short, long)]
    pub milestone: Option<String>,
}

/// Issue states accepted by listings
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// Pull request states accepted by listings
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrState {
    Open,
    Closed,
    Merged,
    All,
}

impl PrState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Merged => "merged",
            Self::All => "all",
        }
    }
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (token, hostname, output.color)
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["ghq", "--json", "--no-color", "has-state", "is:open"]);
        assert!(cli.json);
        assert!(cli.no_color);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["ghq", "-v", "-q", "has-state", "x"]).is_err());
    }

    #[test]
    fn test_issue_list_url_args() {
        let cli = Cli::parse_from([
            "ghq", "issue", "list-url", "-R", "cli/cli", "-a", "@me", "-l", "bug", "-l",
            "help wanted", "--state", "closed",
        ]);
        if let Some(Commands::Issue {
            command: IssueCommands::ListUrl { filter, state },
        }) = cli.command
        {
            assert_eq!(filter.repo, "cli/cli");
            assert_eq!(filter.assignee.as_deref(), Some("@me"));
            assert_eq!(filter.label, vec!["bug", "help wanted"]);
            assert_eq!(state, IssueState::Closed);
        } else {
            panic!("Expected Issue ListUrl command");
        }
    }

    #[test]
    fn test_issue_state_defaults_to_open() {
        let cli = Cli::parse_from(["ghq", "issue", "list-url", "-R", "cli/cli"]);
        if let Some(Commands::Issue {
            command: IssueCommands::ListUrl { state, .. },
        }) = cli.command
        {
            assert_eq!(state, IssueState::Open);
        } else {
            panic!("Expected Issue ListUrl command");
        }
    }

    #[test]
    fn test_issue_rejects_merged_state() {
        assert!(
            Cli::try_parse_from(["ghq", "issue", "list-url", "-R", "a/b", "-s", "merged"]).is_err()
        );
    }

    #[test]
    fn test_pr_list_url_args() {
        let cli = Cli::parse_from([
            "ghq", "pr", "list-url", "-R", "cli/cli", "-s", "merged", "-B", "trunk", "-d", "true",
        ]);
        if let Some(Commands::Pr {
            command: PrCommands::ListUrl { state, base, draft, .. },
        }) = cli.command
        {
            assert_eq!(state, PrState::Merged);
            assert_eq!(base.as_deref(), Some("trunk"));
            assert_eq!(draft, Some(true));
        } else {
            panic!("Expected Pr ListUrl command");
        }
    }

    #[test]
    fn test_pr_new_url_requires_head() {
        assert!(Cli::try_parse_from(["ghq", "pr", "new-url", "-R", "a/b"]).is_err());

        let cli = Cli::parse_from([
            "ghq", "pr", "new-url", "-R", "a/b", "-H", "feature", "-r", "hubot", "-r", "@me",
        ]);
        if let Some(Commands::Pr {
            command: PrCommands::NewUrl { head, base, reviewer, form },
        }) = cli.command
        {
            assert_eq!(head, "feature");
            assert!(base.is_none());
            assert_eq!(reviewer, vec!["hubot", "@me"]);
            assert_eq!(form.title, "");
        } else {
            panic!("Expected Pr NewUrl command");
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["ghq", "config", "set", "hostname", "ghe.io"]);
        if let Some(Commands::Config {
            command: Some(ConfigCommands::Set { key, value }),
        }) = cli.command
        {
            assert_eq!(key, "hostname");
            assert_eq!(value, "ghe.io");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn test_completions() {
        let cli = Cli::parse_from(["ghq", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
