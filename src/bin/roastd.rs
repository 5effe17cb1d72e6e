//! roastd — The Git Roast Show daemon.
//!
//! Serves the roast API over HTTP. All credentials and tuning come from
//! the environment; missing LLM/TTS keys degrade to fallback roasts and
//! a 503 TTS surface rather than preventing startup.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitroast::server::{AppState, Config, router};

/// Roast show daemon.
#[derive(Parser)]
#[command(name = "roastd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "The Git Roast Show backend daemon")]
struct Args {
    /// Port to listen on (overrides PORT).
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Bind address.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let state = AppState::from_config(&config);
    let app = router(state, &config);

    let addr = format!("{}:{}", args.bind, config.port);
    info!(
        %addr,
        environment = %config.environment,
        github = config.github_token.is_some(),
        llm = config.llm_api_key.is_some(),
        tts = config.elevenlabs_api_key.is_some(),
        "roastd starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}
