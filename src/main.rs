use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use ocr_chat_server::{
    config::Config,
    create_router,
    llm::{Assistant, OpenAIAdapter},
    ocr::AzureOcrClient,
    queue::discard_pending,
    storage::ImgurClient,
    utils::init_logger,
    AppState, JobStore, Pipeline, Worker,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        upload_dir = %config.upload.dir.display(),
        model = %config.llm.model,
        http_timeout_secs = config.http.timeout_secs,
        "Configuration loaded"
    );

    // External capabilities
    let pipeline = Pipeline::new(
        Arc::new(ImgurClient::from_config(&config.imgur, &config.http)?),
        Arc::new(AzureOcrClient::from_config(&config.ocr, &config.http)?),
        Arc::new(Assistant::new(
            Box::new(OpenAIAdapter::from_config(&config.llm, &config.http)?),
            config.llm.model.clone(),
        )),
    );

    // Queue and its single worker
    let store = Arc::new(JobStore::new());
    let shutdown = CancellationToken::new();
    let worker = Worker::new(Arc::clone(&store), pipeline)
        .with_idle_interval(config.worker.idle_interval())
        .spawn(shutdown.clone());

    let state = AppState {
        store: Arc::clone(&store),
        config: config.clone(),
    };
    let app = create_router(state);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid HOST {}: {}", config.server.host, e))?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received");
            server_shutdown.cancel();
        })
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    // Covers the server exiting for reasons other than the signal
    shutdown.cancel();
    if let Err(e) = worker.await {
        error!(error = %e, "Worker task ended abnormally");
    }
    discard_pending(&store).await;
    info!("Shutdown complete");

    Ok(())
}
