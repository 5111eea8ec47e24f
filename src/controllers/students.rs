use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::Student;
use crate::students::StudentDirectory;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/students",
            get(list_students).post(add_student).put(update_student),
        )
        .route("/students/search", patch(search_students))
        .route("/students/submit", post(submit_student))
        .route("/students/selection", delete(clear_selection))
        .route("/students/{ma_sv}", delete(delete_student))
        .route("/students/{ma_sv}/select", post(select_student))
}

#[derive(Debug, Serialize)]
struct DirectoryView {
    keyword: String,
    selected: Option<Student>,
    students: Vec<Student>,
    count: usize,
}

impl DirectoryView {
    fn of(directory: &StudentDirectory) -> Self {
        let students: Vec<Student> = directory.visible().into_iter().cloned().collect();
        Self {
            keyword: directory.search_keyword().to_string(),
            selected: directory.selected().cloned(),
            count: students.len(),
            students,
        }
    }
}

// GET /api/students
async fn list_students(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let directory = state.students.lock().await;
    Json(DirectoryView::of(&directory))
}

// PATCH /api/students/search
#[derive(Debug, Deserialize)]
struct SearchRequest {
    #[serde(default)]
    keyword: String,
}

async fn search_students(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> impl IntoResponse {
    let mut directory = state.students.lock().await;
    directory.search(req.keyword);
    Json(DirectoryView::of(&directory))
}

// POST /api/students
async fn add_student(
    State(state): State<Arc<AppState>>,
    Json(student): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    let mut directory = state.students.lock().await;
    directory.add(student.clone())?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "student": student })),
    ))
}

// PUT /api/students
async fn update_student(
    State(state): State<Arc<AppState>>,
    Json(student): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    let mut directory = state.students.lock().await;
    directory.update(student.clone())?;
    Ok(Json(json!({ "success": true, "student": student })))
}

// DELETE /api/students/{ma_sv}
async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(ma_sv): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut directory = state.students.lock().await;
    directory.delete(&ma_sv)?;
    Ok(Json(json!({ "success": true })))
}

// POST /api/students/{ma_sv}/select
async fn select_student(
    State(state): State<Arc<AppState>>,
    Path(ma_sv): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut directory = state.students.lock().await;
    let form = directory.select(&ma_sv)?;
    Ok(Json(json!({ "success": true, "form": form })))
}

// DELETE /api/students/selection
async fn clear_selection(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut directory = state.students.lock().await;
    directory.clear_selection();
    Json(json!({ "success": true }))
}

// POST /api/students/submit
async fn submit_student(
    State(state): State<Arc<AppState>>,
    Json(form): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    let mut directory = state.students.lock().await;
    let outcome = directory.submit(form)?;
    Ok(Json(json!({ "success": true, "outcome": outcome })))
}
