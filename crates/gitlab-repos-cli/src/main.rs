use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitlab_discovery::{
    DiscoveryError, DiscoveryOptions, ResolvedRepo, Scope, discover_group_repos,
    discover_user_repos,
};
use gitlab_repos_cli::output::{self, OutputFormat};

#[derive(Debug, Parser)]
#[command(author, version, about = "GitLab repository discovery CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List projects of a group, including nested subgroups.
    Group {
        /// Group path, e.g. `gitlab-org` or `acme/platform`.
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
    /// List projects owned by a user.
    User {
        /// GitLab username.
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug, PartialEq, Eq)]
struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    fn user(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            message: message.into(),
        }
    }

    fn runtime(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            message: message.into(),
        }
    }

    fn from_discovery(scope: &Scope, error: DiscoveryError) -> Self {
        match error {
            DiscoveryError::ClientInit(error) => AppError::user(error.to_string()),
            DiscoveryError::Listing(error) if error.is_not_found() => {
                AppError::runtime(format!("{scope} not found: {error}"))
            }
            DiscoveryError::Listing(error) => {
                AppError::runtime(format!("failed to list {scope}: {error}"))
            }
            DiscoveryError::Credential(error) => AppError::runtime(error.to_string()),
        }
    }

    fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("error: {}", error.message);
            std::process::exit(error.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    run_with(cli, DiscoveryOptions::from_env, discover)
}

fn discover(
    scope: &Scope,
    options: &DiscoveryOptions,
) -> Result<Vec<ResolvedRepo>, DiscoveryError> {
    match scope {
        Scope::Group(group) => discover_group_repos(group, options),
        Scope::User(user) => discover_user_repos(user, options),
    }
}

fn run_with<LoadOptions, Discover>(
    cli: Cli,
    load_options: LoadOptions,
    discover: Discover,
) -> Result<String, AppError>
where
    LoadOptions: Fn() -> DiscoveryOptions,
    Discover: Fn(&Scope, &DiscoveryOptions) -> Result<Vec<ResolvedRepo>, DiscoveryError>,
{
    let (scope, format) = match cli.command {
        Commands::Group { name, output } => (Scope::Group(non_empty_name(&name)?), output),
        Commands::User { name, output } => (Scope::User(non_empty_name(&name)?), output),
    };

    let options = load_options();
    let repos =
        discover(&scope, &options).map_err(|error| AppError::from_discovery(&scope, error))?;
    tracing::info!(%scope, count = repos.len(), "discovered repositories");

    output::render(&repos, format)
        .map_err(|err| AppError::runtime(format!("failed to serialize repositories: {err}")))
}

fn non_empty_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::user("name must not be empty"));
    }
    Ok(name.to_string())
}
