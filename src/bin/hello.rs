use anyhow::Context;
use clap::Parser;

use webdemos::config::AppConfig;
use webdemos::hello_app;

/// Static hello page server.
#[derive(Parser, Debug)]
#[command(name = "hello")]
struct Args {
    /// Address to bind, overrides BIND_ADDR
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on, overrides PORT
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("hello app listening on http://{}", addr);

    axum::serve(listener, hello_app())
        .await
        .context("server error")?;
    Ok(())
}
