use std::io::Read;

use acl_viewer::config::{Cli, Command, RenderArgs, ServeArgs};
use acl_viewer::server::{AppState, create_router};
use acl_viewer::{refresh, snapshot};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.effective_log_level()));

    // Logs go to stderr so `render` output stays clean on stdout.
    if cli.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let output = acl_viewer::render(&input, args.format)?;
    println!("{output}");
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<()> {
    let source = args.source()?;
    info!(source = %source.name(), "starting ACL viewer");

    let (publisher, reader) = snapshot::channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let refresher = tokio::spawn(refresh::run(
        source,
        args.refresh_config(),
        publisher,
        shutdown_rx,
    ));

    let app = create_router(AppState { snapshots: reader }, args.static_dir.clone());
    let listener = tokio::net::TcpListener::bind(args.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", args.listen_addr))?;
    info!(addr = %args.listen_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown requested");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    refresher.await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Render(ref args) => render(args),
    }
}
