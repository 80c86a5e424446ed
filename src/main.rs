// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2012-2025 Andrei Maltsev

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use homestead_cx_gateway::{
    cache::memory::MemoryCacheStore,
    cfg::{cli::resolve_config_path, config::Config, logger::init_logger},
    handlers::context::AppContext,
    http::routes,
    sprout::ReqwestSproutConnection,
    stats::InMemoryStats,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _init_logger = init_logger("config/logger.yaml")?;

    let cfg = resolve_config_path("config/homestead.yaml")
        .and_then(Config::load_from_file)
        .context("failed to resolve or load config")?;

    // No Diameter transport is wired up by default: a process that only
    // ever serves cached reg-data (e.g. a dev/test deployment) runs with
    // `Hss.Enabled: false` and never needs one.
    let hss = None;

    let sprout = Arc::new(ReqwestSproutConnection::new(
        cfg.sprout.base_url.clone(),
        cfg.sprout.request_timeout,
    ));

    let ctx = Arc::new(AppContext::new(
        Arc::new(MemoryCacheStore::new()),
        hss,
        sprout,
        Arc::new(InMemoryStats::new()),
        cfg.clone(),
    ));

    let app = routes::router(ctx).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(10))),
    );

    let listener = tokio::net::TcpListener::bind(&cfg.http.listen_address)
        .await
        .with_context(|| format!("failed to bind {}", cfg.http.listen_address))?;
    info!(address = %cfg.http.listen_address, "homestead-cx-gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
