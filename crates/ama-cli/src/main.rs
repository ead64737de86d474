use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("ama error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(flags.log_level())?;
    ui::init(&flags);

    let config = ama_config::AmaConfig::load_with_dotenv().context("failed to load ama config")?;
    context::warn_unconfigured(&config);

    // Routing and moderation only talk to the remote service.
    match &cli.command {
        cli::Commands::Route(args) => return commands::route::handle(args, &config, &flags).await,
        cli::Commands::Moderate(args) => {
            return commands::route::handle_moderate(args, &config, &flags).await;
        }
        _ => {}
    }

    let ctx = context::AppContext::init(config, &flags)
        .await
        .context("failed to initialize ama application context")?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("AMA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
