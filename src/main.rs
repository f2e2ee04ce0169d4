//! clipweave - 三段式视频素材组合服务

use std::sync::Arc;

use clipweave::application::EngineRegistryPort;
use clipweave::config::{load_config, print_config, LogConfig};
use clipweave::domain::combination::ProjectName;
use clipweave::infrastructure::http::{AppState, HttpServer, ServerConfig};
use clipweave::infrastructure::memory::{EngineRegistryConfig, InMemoryEngineRegistry};

fn init_tracing(log: &LogConfig) {
    let log_filter = format!("{},clipweave={},tower_http=debug", log.level, log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("clipweave - 视频组合服务");
    print_config(&config);

    tokio::fs::create_dir_all(&config.storage.data_dir).await?;

    let default_project = ProjectName::new(config.storage.default_project.clone())?;
    let registry = Arc::new(InMemoryEngineRegistry::new(EngineRegistryConfig {
        data_dir: config.storage.data_dir.clone(),
        file_name: config.storage.file_name.clone(),
        default_project: default_project.clone(),
    }));

    // 启动时加载默认项目
    registry.engine(&default_project).await;

    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let server = HttpServer::new(server_config, AppState::new(registry));

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
