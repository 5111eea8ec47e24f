use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::booking::BookingAction;
use crate::error::AppError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(get_seats))
        .route("/seats/select", patch(select_seat))
        .route("/seats/release", patch(release_seat))
        .route("/booking/start", post(start_selecting))
        .route(
            "/bookings",
            get(get_bookings).post(create_booking).delete(clear_history),
        )
}

/* ---------- SEATS ---------- */

// GET /api/seats
async fn get_seats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let desk = state.booking.desk().await;
    Json(desk.seat_map())
}

// POST /api/booking/start
// Пустые или отсутствующие поля должны дать понятное уведомление, а не ошибку парсинга
#[derive(Debug, Deserialize)]
struct StartSelectingRequest {
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    quantity: u32,
}

// Поле формы type=number приходит и числом, и строкой; всё, что не положительное целое, становится 0
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let parsed = match &raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(parsed.and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
}

async fn start_selecting(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSelectingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let desk = state
        .booking
        .dispatch(BookingAction::StartSelecting {
            name: req.name,
            quantity: req.quantity,
        })
        .await?;
    Ok(Json(desk.seat_map()))
}

// PATCH /api/seats/select
#[derive(Debug, Deserialize)]
struct SeatRequest {
    seat_id: String,
}

async fn select_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let desk = state
        .booking
        .dispatch(BookingAction::Select(req.seat_id))
        .await?;
    Ok(Json(desk.seat_map()))
}

// PATCH /api/seats/release
async fn release_seat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let desk = state
        .booking
        .dispatch(BookingAction::Deselect(req.seat_id))
        .await?;
    Ok(Json(desk.seat_map()))
}

/* ---------- BOOKINGS ---------- */

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.booking.confirm().await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "booking": record })),
    ))
}

// GET /api/bookings
async fn get_bookings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let desk = state.booking.desk().await;
    Json(json!({
        "bookings": desk.ledger(),
        "reserved": desk.reserved(),
        "count": desk.ledger().len(),
    }))
}

// DELETE /api/bookings
async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state.booking.dispatch(BookingAction::ClearHistory).await?;
    tracing::warn!("Booking history cleared by request");
    Ok(Json(json!({ "success": true, "message": "Booking history cleared" })))
}
