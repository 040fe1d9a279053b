use anyhow::Result;
use axum::Router;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use textscout_core::AnalyzerConfig;
use textscout_server::build_app;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Movie snapshot (JSON object with a `results` array)
    #[arg(long, default_value = "./sample.json")]
    snapshot: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Index stopwords instead of dropping them
    #[arg(long, default_value_t = false)]
    keep_stopwords: bool,
    /// Disable English stemming
    #[arg(long, default_value_t = false)]
    no_stem: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let analyzer = AnalyzerConfig { remove_stopwords: !args.keep_stopwords, stem: !args.no_stem, ..Default::default() };
    let app: Router = build_app(&args.snapshot, analyzer)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
