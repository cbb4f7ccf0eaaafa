use bucketwatch::api;
use bucketwatch::config::Config;
use bucketwatch::service;
use bucketwatch::service::InvocationOutcome;
use bucketwatch::utils::cli::{Args, Command};
use bucketwatch::utils::state::AppState;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = Config::from_args(&args);
    let state = Arc::new(AppState::new(config).await);

    match args.command {
        Command::Provision => report(service::provision::run(&state).await?),
        Command::Sample => report(service::sample::run(&state).await?),
        Command::Drive => report(service::drive::run(&state).await?),
        Command::Plot => report(service::plot::run(&state).await?),
        Command::Serve => serve(state).await?,
    }
    Ok(())
}

fn report(outcome: InvocationOutcome) {
    println!("{}", outcome.body);
}

async fn serve(state: Arc<AppState>) -> anyhow::Result<()> {
    let app = api::create_router(state.clone());

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", state.config.host, state.config.port))
            .await?;
    println!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("Shutting down...");
}
