//! zone.eu DNS-01 Webhook
//!
//! 基于 Actix-web 的 cert-manager webhook solver 服务

mod config;
mod error;
mod handlers;
mod state;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, middleware, web};
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zone_eu_provider::{Solver, ZoneEuSolver, watch};

use config::{AppConfig, LoggingConfig};
use state::AppState;

/// 停止时等待 solver 处理停止信号的时间
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// 初始化日志
fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "info,zone_eu_webhook=debug,zone_eu_provider=debug".into()),
    );

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// 加载 TLS 证书和私钥（PEM）
fn load_tls_config(cert_file: &Path, key_file: &Path) -> anyhow::Result<rustls::ServerConfig> {
    let certs = CertificateDer::pem_file_iter(cert_file)?.collect::<Result<Vec<_>, _>>()?;
    let key = PrivateKeyDer::from_pem_file(key_file)?;

    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()?
    .with_no_client_auth()
    .with_single_cert(certs, key)?;

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    tracing::info!("zone.eu webhook 启动中...");

    // group 名称为空时直接失败
    let solver = Arc::new(ZoneEuSolver::new(config.solver_options())?);
    tracing::info!(
        "Solver: {} (group: {}, record mutation: {:?})",
        solver.name(),
        solver.group_name(),
        solver.record_mutation_policy()
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    solver
        .initialize(config.cluster_access(), shutdown_rx)
        .await?;

    let state = AppState::new(solver.group_name(), solver.clone());

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .workers(workers);

    let server = match (&config.tls.cert_file, &config.tls.key_file) {
        (Some(cert_file), Some(key_file)) => {
            let tls_config = load_tls_config(cert_file, key_file)?;
            tracing::info!("服务器启动于 https://{} (workers: {})", bind_addr, workers);
            server.bind_rustls_0_23(&bind_addr, tls_config)?
        }
        _ => {
            tracing::warn!("未配置 TLS 证书，使用明文 HTTP");
            tracing::info!("服务器启动于 http://{} (workers: {})", bind_addr, workers);
            server.bind(&bind_addr)?
        }
    };

    server.run().await?;

    // 通知 solver 停止，等待其释放接收端
    if shutdown_tx.send(true).is_err() {
        tracing::warn!("停止信号发送失败: 没有接收端");
    } else if tokio::time::timeout(SHUTDOWN_GRACE, shutdown_tx.closed())
        .await
        .is_err()
    {
        tracing::warn!("等待 solver 停止超时");
    }
    tracing::info!("zone.eu webhook 已停止");

    Ok(())
}
