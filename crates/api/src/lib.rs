//! # ClassGrid API
//!
//! HTTP surface of the section timetable. Each drag gesture on the admin
//! board becomes one request: the handler turns it into a move command, runs
//! it through the placement controller in `classgrid-core` and answers with
//! the committed or rolled-back outcome.
//!
//! Requests are routed in `routes`, executed in `handlers`, and engine errors
//! are mapped onto status codes in `middleware`. Section records are owned by
//! the course-management collaborator behind [`SectionStore`].

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header},
};
use classgrid_core::{grid::TimeGrid, store::SectionStore, timetable::Timetable};
use eyre::{Result, WrapErr};
use tokio::{net::TcpListener, sync::Mutex};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::config::ApiConfig;

/// State shared by every handler.
///
/// The timetable sits behind a single lock: a gesture runs to commit or
/// rollback, including the collaborator call, before the next one starts.
pub struct ApiState {
    pub timetable: Mutex<Timetable>,
    pub store: Arc<dyn SectionStore>,
}

impl ApiState {
    /// Loads every section from `store` onto a fresh timetable.
    pub async fn load(grid: TimeGrid, store: Arc<dyn SectionStore>) -> Result<Self> {
        let records = store
            .load_sections()
            .await
            .wrap_err("Failed to load sections")?;

        Ok(Self {
            timetable: Mutex::new(Timetable::load(grid, records)),
            store,
        })
    }
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::sections::routes())
        .merge(routes::timetable::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<_> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring malformed CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}

/// Installs logging, loads the timetable from `store` and serves it until
/// the listener fails.
///
/// # Errors
///
/// Fails when the grid configuration is inconsistent, the initial load
/// fails, or the address cannot be bound.
pub async fn start_server(config: ApiConfig, store: Arc<dyn SectionStore>) -> Result<()> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_max_level(config.log_level)
            .finish(),
    )?;

    let grid = TimeGrid::new(config.grid)?;
    info!(
        tick_minutes = grid.tick_minutes(),
        ticks_per_day = grid.tick_count(),
        week_start = %config.grid.week_start,
        "Timetable grid ready"
    );

    let state = Arc::new(ApiState::load(grid, store).await?);
    let mut app = build_router(state);

    if let Some(origins) = &config.cors_origins {
        app = app.layer(cors_layer(origins));
    }

    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind {}", addr))?;
    info!("Timetable service listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
