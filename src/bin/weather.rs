use anyhow::Context;
use clap::Parser;

use webdemos::config::AppConfig;
use webdemos::weather::WeatherClient;
use webdemos::weather_app;

/// Weather lookup demo server proxying an OpenWeatherMap-compatible API.
#[derive(Parser, Debug)]
#[command(name = "weather")]
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

    let api_key = config
        .weather
        .api_key
        .clone()
        .context("WEATHER_API_KEY is required")?;
    let client = WeatherClient::new(config.weather.base_url.clone(), api_key);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("weather app listening on http://{}", addr);

    axum::serve(listener, weather_app(client))
        .await
        .context("server error")?;
    Ok(())
}
