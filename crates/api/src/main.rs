use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pele_core::analysis::Analyzer;
use pele_core::config::{ConfigError, ScheduleApiConfig, Settings};
use pele_core::domain::recommendation::DailyAnalysis;
use pele_core::scoring::SimulatedStats;
use pele_core::time::resolve_schedule_date;

mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let cache_ttl = Duration::from_secs(settings.schedule_cache_ttl_secs);
    let analyzer = match ScheduleApiConfig::from_settings(&settings) {
        Ok(config) => Ok(Arc::new(Analyzer::from_config(&config, cache_ttl)?)),
        Err(e) => {
            tracing::error!(error = %e, "schedule API not configured; starting in degraded mode");
            Err(e)
        }
    };

    let state = AppState {
        analyzer,
        utc_offset_hours: settings.schedule_utc_offset_hours,
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/analysis", post(run_analysis))
        .route("/api/analysis", get(get_analysis))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    analyzer: Result<Arc<Analyzer>, ConfigError>,
    utc_offset_hours: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct AnalysisQuery {
    date: Option<String>,
}

async fn index(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    match &state.analyzer {
        Ok(_) => (StatusCode::OK, Html(render::landing_page())),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(render::config_error_page(e)),
        ),
    }
}

async fn run_analysis(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    let analyzer = match &state.analyzer {
        Ok(analyzer) => analyzer.clone(),
        Err(e) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(render::config_error_page(e)),
            )
        }
    };

    let now = Utc::now();
    let date = match resolve_schedule_date(None, now, state.utc_offset_hours) {
        Ok(date) => date,
        Err(e) => {
            tracing::error!(error = %e, "could not resolve schedule date");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render::fetch_error_page(&e)),
            );
        }
    };

    match analyze(&analyzer, date, now).await {
        Ok(analysis) => (StatusCode::OK, Html(render::report_page(&analysis))),
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "analysis run failed");
            (StatusCode::BAD_GATEWAY, Html(render::fetch_error_page(&e)))
        }
    }
}

async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<DailyAnalysis>, (StatusCode, Json<Value>)> {
    let analyzer = match &state.analyzer {
        Ok(analyzer) => analyzer.clone(),
        Err(e) => {
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": e.to_string()})),
            ))
        }
    };

    let now = Utc::now();
    let date = resolve_schedule_date(query.date.as_deref(), now, state.utc_offset_hours)
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("{e:#}")})),
            )
        })?;

    analyze(&analyzer, date, now)
        .await
        .map(Json)
        .map_err(|e| {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "analysis run failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": format!("{e:#}")})),
            )
        })
}

async fn analyze(
    analyzer: &Analyzer,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> anyhow::Result<DailyAnalysis> {
    let mut stats = SimulatedStats::new(StdRng::from_entropy());
    analyzer.run(date, now, &mut stats).await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
