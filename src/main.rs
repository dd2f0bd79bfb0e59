use anyhow::{Context, Result};
use skip_unchanged::app;
use skip_unchanged::cli::output::print_report;
use skip_unchanged::cli::Cli;
use skip_unchanged::git::GitClient;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout carries the pipeline so logs go to stderr
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let git = GitClient::new(cli.git_config());
    let rewrite = app::run(&cli, &git).await?;

    print_report(&rewrite.report);
    app::emit(&cli, &rewrite.yaml).await?;

    Ok(())
}
