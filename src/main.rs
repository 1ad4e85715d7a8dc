// src/main.rs
// =============================================================================
// This is the entry point of the gitpeek CLI.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build the GitHub client and hand it to UserRepository
// 4. Dispatch to the subcommand handler and print the result
// 5. Exit with proper code (0 = success, 1 = GitHub lookup failed, 2 = error)
//
// Rust concepts used:
// - async/await: every lookup is a network request
// - anyhow::Result: one error type for the whole binary, with downcasting
//   back to DomainError to tell GitHub failures from our own
// - futures::join!: runs two lookups side by side without spawning tasks
// =============================================================================

// Module declarations
mod cli; // src/cli.rs - command-line parsing

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use serde::Serialize; // Output structs below are printed with --json
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputArgs};
// Everything else comes from the library half of this crate (src/lib.rs)
use gitpeek::{
    ClientConfig, DomainError, GithubClient, LoadParams, LoadResult, LoadStep, Pager, Repository,
    User, UserRepository,
};

// #[tokio::main] starts a tokio runtime and runs our async main inside it
#[tokio::main]
async fn main() {
    init_tracing();

    // Run the application logic and turn the outcome into an exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Anything that is not a GitHub lookup failure ends up here
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so --json output on stdout stays parseable
fn init_tracing() {
    // RUST_LOG wins when set; otherwise only errors are shown
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gitpeek=error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = success
//   Ok(1) = GitHub lookup failed (message already printed)
//   Err   = unexpected error (bad configuration, output failure)
async fn run() -> Result<i32> {
    // Parse command-line arguments; clap handles --help and --version
    let cli = Cli::parse();

    // One client for the whole run. The repository layer wraps it and turns
    // every failure into a DomainError
    let config = ClientConfig::default()
        .with_base_url(cli.api_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    let client = GithubClient::new(&config)?;
    let repository = UserRepository::new(Arc::new(client));

    // Each branch handles one subcommand
    let outcome = match cli.command {
        Commands::User { username, output } => handle_user(&repository, &username, output).await,
        Commands::Repos {
            username,
            page,
            per_page,
            all,
            output,
        } => {
            if all {
                handle_all_repos(&repository, &username, per_page, output).await
            } else {
                handle_repos_page(&repository, &username, page, per_page, output).await
            }
        }
        Commands::Repo {
            username,
            repo_name,
            forks,
            output,
        } => handle_repo(&repository, &username, &repo_name, forks, output).await,
        Commands::Forks { username, output } => handle_forks(&repository, &username, output).await,
    };

    // GitHub failures are expected outcomes: report them and exit with 1.
    // Anything else bubbles up to main and exits with 2
    match outcome {
        Ok(()) => Ok(0),
        Err(e) => match e.downcast_ref::<DomainError>() {
            Some(domain) => {
                report(domain);
                Ok(1)
            }
            None => Err(e),
        },
    }
}

// Handles the 'user' subcommand
async fn handle_user(
    repository: &UserRepository,
    username: &str,
    output: OutputArgs,
) -> Result<()> {
    let user = repository.get_user(username).await?;

    if output.json {
        print_json(&user)
    } else {
        print_user(&user);
        Ok(())
    }
}

// Handles 'repos' without --all: exactly one page through the paging source
async fn handle_repos_page(
    repository: &UserRepository,
    username: &str,
    page: u32,
    per_page: u32,
    output: OutputArgs,
) -> Result<()> {
    // The source turns failures into LoadResult::Error instead of Err
    let source = repository.repositories_source(username);
    let loaded = match source.load(LoadParams::new(Some(page), per_page)).await {
        LoadResult::Page(loaded) => loaded,
        LoadResult::Error(error) => return Err(error.into()),
    };

    if output.json {
        return print_json(&loaded);
    }

    if loaded.data.is_empty() {
        println!("📭 No repositories on page {}", page);
    } else {
        print_repositories(loaded.data.iter());
    }
    println!();
    println!(
        "   ◀ prev: {}   ▶ next: {}",
        format_key(loaded.prev_key),
        format_key(loaded.next_key)
    );
    Ok(())
}

// Handles 'repos --all': appends pages until the list ends
async fn handle_all_repos(
    repository: &UserRepository,
    username: &str,
    per_page: u32,
    output: OutputArgs,
) -> Result<()> {
    let mut pager = Pager::new(repository.repositories_source(username), per_page);

    // A failed page stops the walk; the pager never retries on its own
    loop {
        match pager.append().await? {
            LoadStep::Loaded { page, count } => debug!(page, count, "loaded page"),
            LoadStep::Failed(error) => return Err(error.into()),
            LoadStep::EndOfList => break,
        }
    }

    let repositories: Vec<&Repository> = pager.items().collect();
    if output.json {
        return print_json(&repositories);
    }

    if repositories.is_empty() {
        println!("📭 {} has no public repositories", username);
    } else {
        print_repositories(repositories.iter().copied());
        println!();
        println!("📋 Total: {} repositories", repositories.len());
    }
    Ok(())
}

// JSON shape of 'repo --forks'
#[derive(Serialize)]
struct RepositoryDetails {
    repository: Repository,
    #[serde(skip_serializing_if = "Option::is_none")]
    owner_fork_count: Option<u64>,
}

// Handles the 'repo' subcommand
async fn handle_repo(
    repository: &UserRepository,
    username: &str,
    repo_name: &str,
    forks: bool,
    output: OutputArgs,
) -> Result<()> {
    if !forks {
        let repo = repository.get_repository(username, repo_name).await?;
        return if output.json {
            print_json(&repo)
        } else {
            print_repository(&repo);
            Ok(())
        };
    }

    // The owner's repository count decides how many pages the fork total needs;
    // after that the repository and the total load side by side
    let owner = repository.get_user(username).await?;
    let (repo, fork_total) = futures::join!(
        repository.get_repository(username, repo_name),
        repository.get_user_fork_count(username, owner.public_repos),
    );
    // The repository is printed even when the fork total failed
    let repo = repo?;

    if output.json {
        print_json(&RepositoryDetails {
            repository: repo,
            owner_fork_count: fork_total.as_ref().ok().copied(),
        })?;
    } else {
        print_repository(&repo);
        if let Ok(total) = &fork_total {
            println!("🍴 Forks across all of {}'s repositories: {}", username, total);
        }
    }

    // A failed total still makes the command fail (exit code 1)
    fork_total.map(|_| ()).map_err(Into::into)
}

// JSON shape of 'forks'
#[derive(Serialize)]
struct ForkTotal<'a> {
    username: &'a str,
    public_repos: u32,
    fork_count: u64,
}

// Handles the 'forks' subcommand. The profile's public_repos count decides
// how many pages the fork total needs
async fn handle_forks(
    repository: &UserRepository,
    username: &str,
    output: OutputArgs,
) -> Result<()> {
    let user = repository.get_user(username).await?;
    let fork_count = repository
        .get_user_fork_count(username, user.public_repos)
        .await?;

    if output.json {
        print_json(&ForkTotal {
            username: &user.username,
            public_repos: user.public_repos,
            fork_count,
        })
    } else {
        println!(
            "🍴 {} has {} forks across {} public repositories",
            user.username, fork_count, user.public_repos
        );
        Ok(())
    }
}

// Pretty-printed JSON on stdout
fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;
    println!("{}", json_output);
    Ok(())
}

fn print_user(user: &User) {
    let name = if user.name.is_empty() { "-" } else { user.name.as_str() };
    println!("👤 {} ({})", user.username, name);
    println!("   id:           {}", user.id);
    println!("   avatar:       {}", user.avatar_url);
    println!("   public repos: {}", user.public_repos);
}

fn print_repository(repo: &Repository) {
    println!("📦 {}", repo.full_name);
    if !repo.description.is_empty() {
        println!("   {}", repo.description);
    }
    println!("   url:      {}", repo.html_url);
    println!("   stars:    {}", repo.stargazers_count);
    println!("   forks:    {}", repo.forks_count);
    println!("   watchers: {}", repo.watchers_count);
}

// Prints repositories as a human-readable table
fn print_repositories<'a>(repositories: impl Iterator<Item = &'a Repository>) {
    println!("{:<35} {:>8} {:>8}  {:<50}", "NAME", "STARS", "FORKS", "DESCRIPTION");
    println!("{}", "=".repeat(104));

    for repo in repositories {
        println!(
            "{:<35} {:>8} {:>8}  {:<50}",
            truncate(&repo.name, 35),
            repo.stargazers_count,
            repo.forks_count,
            truncate(&repo.description, 50)
        );
    }
}

// Shortens `text` to at most `max` characters, marking the cut with "..."
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// Page keys are optional; "-" means there is no page in that direction
fn format_key(key: Option<u32>) -> String {
    key.map_or_else(|| "-".to_string(), |k| k.to_string())
}

// Prints a GitHub lookup failure for humans. The full error goes to the
// debug log
fn report(error: &DomainError) {
    eprintln!("❌ {}", error.user_message());

    if error.is_transient() {
        eprintln!("   This is usually temporary, try again in a moment.");
    } else if !matches!(error, DomainError::UserNotFound { .. }) {
        if let Some(cause) = error.cause() {
            eprintln!("   Details: {}", cause);
        }
    }
    debug!(error = ?error, "command failed");
}
