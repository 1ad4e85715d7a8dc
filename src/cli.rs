// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Each subcommand maps onto one operation of the library:
// - user   -> UserRepository::get_user
// - repos  -> RepositoryPagingSource::load (or the Pager with --all)
// - repo   -> UserRepository::get_repository (+ fork total with --forks)
// - forks  -> get_user, then UserRepository::get_user_fork_count
//
// Rust concepts:
// - Derive macros: clap generates the parser from these types
// - #[command(flatten)]: reuses one Args struct inside several subcommands
// - value_parser: validates an argument before our code ever sees it
// =============================================================================

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

// Default base URL and page size come from the library so both stay in sync
use gitpeek::config::{DEFAULT_BASE_URL, REPOSITORIES_PAGE_SIZE};

// This struct represents the whole CLI
//
// The two global flags can be given before or after the subcommand
#[derive(Parser, Debug)]
#[command(
    name = "gitpeek",
    version,
    about = "Look up GitHub users, their repositories and their total fork count",
    long_about = "gitpeek queries the GitHub REST API for a user's profile and repositories. \
                  It can page through repositories or fetch all of them at once to total \
                  the forks across every repository the user owns."
)]
pub struct Cli {
    // Holds whichever subcommand was used
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the GitHub API
    ///
    /// Hidden: only useful for GitHub Enterprise or a local stub server
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL, hide = true)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,
}

// Flags shared by every subcommand's output
#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Output results in JSON format instead of a table
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,
}

// One variant per subcommand; its fields become that subcommand's arguments
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a user's profile
    ///
    /// Example: gitpeek user octocat
    User {
        /// GitHub login of the user
        #[arg(value_parser = parse_username)]
        username: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List a user's repositories one page at a time
    ///
    /// Example: gitpeek repos octocat --page 2
    Repos {
        /// GitHub login of the user
        #[arg(value_parser = parse_username)]
        username: String,

        /// Page to load (GitHub pages start at 1)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Repositories per page
        ///
        /// GitHub caps per_page at 100
        #[arg(
            long,
            default_value_t = REPOSITORIES_PAGE_SIZE,
            value_parser = clap::value_parser!(u32).range(1..=100)
        )]
        per_page: u32,

        /// Keep loading pages until the list ends
        #[arg(long, conflicts_with = "page")]
        all: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one repository
    ///
    /// Example: gitpeek repo octocat Hello-World --forks
    Repo {
        /// GitHub login of the repository owner
        #[arg(value_parser = parse_username)]
        username: String,

        /// Repository name
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        repo_name: String,

        /// Also total the forks across all of the owner's repositories
        #[arg(long)]
        forks: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Total the forks across every repository a user owns
    ///
    /// Example: gitpeek forks octocat
    Forks {
        /// GitHub login of the user
        #[arg(value_parser = parse_username)]
        username: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

// Trims surrounding whitespace and rejects blank names. A blank name would
// otherwise address /users/ (every GitHub user) instead of one user.
fn parse_username(raw: &str) -> Result<String, String> {
    let username = raw.trim();
    if username.is_empty() {
        return Err("username must not be blank".to_string());
    }
    Ok(username.to_string())
}
