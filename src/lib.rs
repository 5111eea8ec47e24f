pub mod config;
pub mod error;
pub mod models;
pub mod booking;
pub mod students;
pub mod store;
pub mod services;
pub mod controllers;
pub mod redis_client;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::models::SeatGrid;
use crate::services::BookingService;
use crate::store::KeyValueStore;
use crate::students::StudentDirectory;

// Shared state для всего приложения
pub struct AppState {
    pub config: config::Config,
    pub booking: BookingService,
    pub students: Mutex<StudentDirectory>,
}

impl AppState {
    pub async fn new(
        config: config::Config,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Arc<Self>, AppError> {
        let grid = SeatGrid::from_config(&config.seating);
        tracing::info!("Seat grid: {} seats", grid.len());
        let booking = BookingService::load(grid, store).await?;

        Ok(Arc::new(Self {
            config,
            booking,
            students: Mutex::new(StudentDirectory::default()),
        }))
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(|| async { "Seat Booking API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .nest("/api", controllers::routes())
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http());

    if state.config.features.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    app
}
