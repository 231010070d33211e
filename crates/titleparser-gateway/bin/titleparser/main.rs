mod cli;

use crate::cli::{CacheBackendArg, RunModeArg, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::SignedDuration;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use titleparser_cache::{LayeredCache, MokaTitleCache, NoopCache, RedisTitleCache};
use titleparser_core::TitleCache;
use titleparser_gateway::{stdin, telemetry, App, AppState};
use titleparser_resolver::{register_builtin, Dispatcher, GenericExtractor, HttpConfig, Registry};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format.into(), telemetry::DEFAULT_FILTER)?;

    info!(
        mode = %config.mode,
        cache_backend = %config.cache,
        timeout_secs = config.timeout_secs,
        "starting titleparser"
    );

    let dispatcher = build_dispatcher(&config).await?;
    match config.mode {
        RunModeArg::Server => run_server(config.listen_addr, dispatcher).await,
        RunModeArg::Stdin => {
            stdin::run(&dispatcher, tokio::io::stdin(), tokio::io::stdout())
                .await
                .context("failed to handle query from stdin")?;
            Ok(())
        }
    }
}

async fn build_dispatcher(config: &CLI) -> anyhow::Result<Dispatcher> {
    let http = HttpConfig::builder()
        .user_agent(config.user_agent.clone())
        .accept(config.accept.clone())
        .accept_language(config.accept_language.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .max_body_bytes(config.max_body_bytes)
        .build();
    let extractor = GenericExtractor::new(&http).context("failed to build page extractor")?;

    let mut registry = Registry::new();
    register_builtin(&mut registry, &extractor).context("failed to register resolvers")?;
    info!(bindings = registry.len(), "registered resolvers");

    let cache = build_cache(config).await;
    Ok(Dispatcher::new(registry, extractor, cache)
        .with_ttl(SignedDuration::from_secs(config.cache_ttl_secs))
        .with_cache_lookup(config.cache != CacheBackendArg::None))
}

async fn build_cache(config: &CLI) -> Arc<dyn TitleCache> {
    let memory = || MokaTitleCache::with_capacity(config.memory_capacity);

    match config.cache {
        CacheBackendArg::None => Arc::new(NoopCache),
        CacheBackendArg::Memory => Arc::new(memory()),
        CacheBackendArg::Redis => match connect_redis(config).await {
            Some(redis) => Arc::new(redis),
            None => Arc::new(NoopCache),
        },
        CacheBackendArg::Layered => match connect_redis(config).await {
            Some(redis) => Arc::new(LayeredCache::new(memory(), redis)),
            None => Arc::new(memory()),
        },
    }
}

/// A store that is down at startup degrades to running without it.
async fn connect_redis(config: &CLI) -> Option<RedisTitleCache> {
    let url = config.redis_url.as_deref()?;
    match RedisTitleCache::connect(url).await {
        Ok(cache) => Some(cache.with_key_prefix(config.redis_key_prefix.as_str())),
        Err(e) => {
            warn!(error = %e, "Redis unavailable, continuing without the durable cache");
            None
        }
    }
}

async fn run_server(listen_addr: SocketAddr, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let shutdown = CancellationToken::new();
    let state = AppState::new(dispatcher).with_shutdown(shutdown.clone());

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!(listen_addr = %listener.local_addr()?, "starting title server");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("shutting down"),
                Err(e) => {
                    warn!(error = %e, "failed to listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
