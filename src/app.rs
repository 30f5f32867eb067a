/*
 * Responsibility
 * - Config 読み込み → PgPool/依存生成 → Router 組み立て
 * - tracing / panic hook の初期化
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::repos::content_repo::{ContentRepo, PgContentRepo};
use crate::repos::user_repo::{PgUserRepo, UserRepo};
use crate::services::auth::auth_service::AuthService;
use crate::services::content_service::ContentService;
use crate::services::id_codec::IdCodec;
use crate::services::risk::evaluator::RiskEvaluator;
use crate::services::risk::http::HttpRiskEvaluator;
use crate::services::user_service::UserService;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,vamino_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched).
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice
        // immediately. In production, prefer the default behavior.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    // One pool for the whole process; every repo clones the handle.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let content: Arc<dyn ContentRepo> = Arc::new(PgContentRepo::new(pool));

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    let risk: Arc<dyn RiskEvaluator> = Arc::new(HttpRiskEvaluator::new(
        config.risk_api_url.clone(),
        config.risk_api_timeout,
    )?);

    Ok(AppState::new(
        Arc::new(AuthService::new(users.clone())),
        Arc::new(UserService::new(users)),
        Arc::new(ContentService::new(content)),
        risk,
        id_codec,
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api", api::routes())
        .with_state(state);

    let router = middleware::http::apply(router);
    let router = middleware::security_headers::apply(router);
    middleware::cors::apply(router, config)
}
