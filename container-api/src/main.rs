// src/main.rs
use container_api::config::AppConfig;
use container_api::infrastructure::runtime::build_runtime;
use container_api::{create_app, AppState};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "container_api=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Container Deletion API...");

    // 設定を読み込む
    let app_config = AppConfig::from_env()?;
    tracing::info!(
        environment = %app_config.environment,
        mode = app_config.mode.label(),
        runtime = %app_config.runtime_binary,
        self_destruct = app_config.self_destruct.enabled,
        "Configuration loaded"
    );
    if app_config.is_development() {
        tracing::debug!("Configuration: {:?}", app_config);
    }

    let runtime = build_runtime(&app_config);
    tracing::info!("Container runtime: {}", runtime.describe());

    // 自己削除完了時にキャンセルされる
    let shutdown = CancellationToken::new();
    let server_addr = app_config.server_addr();
    let app_state = AppState::new(&app_config, runtime, shutdown.clone());
    let app_router = create_app(app_state);

    let listener = TcpListener::bind(&server_addr).await?;
    tracing::info!("Server listening on {}", server_addr);

    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        _ = shutdown.cancelled() => {
            tracing::info!("Self-destruct finished, shutting down");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
    }
}
