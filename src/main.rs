//! git-ticket - ticket-aware commits with chat blasts.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use git_ticket::chat::IrcConnector;
use git_ticket::cli::router::CommandRouter;
use git_ticket::cli::{init, Cli, Commands};
use git_ticket::config::{Config, Paths};
use git_ticket::tracker::RtCli;
use git_ticket::vcs::Git;
use git_ticket::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("git-ticket: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let paths = Paths::discover()?;
    let config = Config::load(&paths.config)?;
    init_logging(&config.log_level);

    match cli.command {
        Some(Commands::Init) => init::run(&paths),
        None => {
            let request = cli.request();
            if request.is_empty() {
                // Show help when nothing was asked for
                Cli::command().print_help()?;
                println!();
                return Ok(());
            }

            let tracker = RtCli::new(config.tracker.command.clone());
            let git = Git::new(paths.project_root.clone());
            let connector = IrcConnector::new(paths.chat_config.clone());

            CommandRouter::new(&paths, &config, &tracker, &git, &connector)
                .run(&request)
                .await
        }
    }
}

/// Logs go to stderr so they stay out of git's output.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("git_ticket={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
