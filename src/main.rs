use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hn_digest::app::AppContext;
use hn_digest::cli::{commands, Cli, Commands};
use hn_digest::config::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Commands::Init = cli.command {
        return commands::init(cli.config.as_deref());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let bundle_path = settings.bundle_path(cli.config.as_deref())?;
    let ctx = AppContext::new(settings, bundle_path)?;

    match cli.command {
        Commands::Run(ref args) => {
            commands::run(&ctx, args).await?;
        }
        Commands::Extract { ref url } => {
            commands::extract(&ctx, url).await?;
        }
        Commands::Summarize { ref url } => {
            commands::summarize(&ctx, url).await?;
        }
        Commands::Init => {}
    }

    ctx.backend.shutdown().await;
    Ok(())
}
