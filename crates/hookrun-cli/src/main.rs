use anyhow::Context;
use hookrun_core::app::{AppBuilder, WorkerHandle, build_router};
use hookrun_core::config::Config;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookrun=debug,hookrun_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    let addr = config.bind_addr();
    let app = AppBuilder::new(config).build()?;

    // (A) ワーカーを 1 本だけ起動
    let worker = WorkerHandle::spawn(app.worker);

    // (B) HTTP 受付
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, build_router(app.state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // (C) 実行中のタスクは完了させてから終了
    worker.shutdown_and_join().await;
    println!("Bye!");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM");
        },
    }
}
