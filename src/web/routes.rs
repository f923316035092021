//! HTTP route handlers
//!
//! Every success response is a `{ "success": true, ... }` envelope; errors
//! surface through `ApiError`. Handlers stay thin: payload checks, the
//! store call, the envelope.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use super::AppState;
use crate::auth;
use crate::dashboard;
use crate::db::employees::EmployeePayload;
use crate::db::leave::LeaveRequestPayload;
use crate::db::resumes::CandidateResumePayload;
use crate::db::tickets::TicketBookingPayload;
use crate::db::travel::TravelRequestPayload;
use crate::db::visitors::PlantVisitorPayload;
use crate::error::{ApiError, ApiResult};

fn ok<T: Serialize>(data: T) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn deleted(entity: &str) -> Json<Value> {
    Json(json!({ "success": true, "message": format!("{entity} deleted") }))
}

/// Liveness probe, unauthenticated
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// === Auth ===

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub employee_code: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> ApiResult<Json<Value>> {
    let creds = state
        .db
        .employee_credentials(&payload.employee_code)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;
    let stored_hash = creds.password.as_deref().ok_or(ApiError::InvalidCredentials)?;
    if !auth::verify_password(&payload.password, stored_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::issue_token(
        &state.config.auth.token_secret,
        &creds.employee_code,
        creds.employee_name.clone(),
        creds.role.clone(),
        state.config.auth.token_ttl_hours,
    )
    .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "employee": {
            "id": creds.id,
            "employee_code": creds.employee_code,
            "employee_name": creds.employee_name,
            "role": creds.role,
            "page_access": creds.page_access,
        },
    })))
}

// === Dashboard ===

pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let report = dashboard::dashboard_report(&state.db, &state.devices).await?;
    Ok(ok(report))
}

// === Employees ===

pub async fn list_employees(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.list_employees().await?))
}

pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let employee = state
        .db
        .get_employee(id)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    Ok(ok(employee))
}

fn hashed_password(payload: &EmployeePayload) -> ApiResult<Option<String>> {
    match payload.password.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(password) => auth::hash_password(password)
            .map(Some)
            .map_err(|err| ApiError::BadRequest(err.to_string())),
        None => Ok(None),
    }
}

pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EmployeePayload>,
) -> ApiResult<Json<Value>> {
    let password_hash = hashed_password(&payload)?;
    Ok(ok(state.db.create_employee(&payload, password_hash).await?))
}

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeePayload>,
) -> ApiResult<Json<Value>> {
    let password_hash = hashed_password(&payload)?;
    let employee = state
        .db
        .update_employee(id, &payload, password_hash)
        .await?
        .ok_or(ApiError::NotFound("Employee"))?;
    Ok(ok(employee))
}

pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    if !state.db.delete_employee(id).await? {
        return Err(ApiError::NotFound("Employee"));
    }
    Ok(deleted("Employee"))
}

pub async fn departments(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let departments = state.db.distinct_departments().await?;
    Ok(Json(json!({
        "success": true,
        "data": departments,
        "count": departments.len(),
    })))
}

pub async fn designations(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    let designations = state.db.distinct_designations().await?;
    Ok(Json(json!({
        "success": true,
        "data": designations,
        "count": designations.len(),
    })))
}

// === Leave requests ===

#[derive(Debug, Deserialize)]
pub struct LeaveListQuery {
    pub approved_by_status: Option<String>,
}

pub async fn list_leave_requests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaveListQuery>,
) -> ApiResult<Json<Value>> {
    let rows = match query.approved_by_status.as_deref() {
        Some(status) if !status.is_empty() => {
            state.db.list_leave_requests_by_approval(status).await?
        }
        _ => state.db.list_leave_requests().await?,
    };
    Ok(ok(rows))
}

pub async fn get_leave_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .get_leave_request(id)
        .await?
        .ok_or(ApiError::NotFound("Leave request"))?;
    Ok(ok(row))
}

pub async fn create_leave_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LeaveRequestPayload>,
) -> ApiResult<Json<Value>> {
    payload.validate().map_err(ApiError::BadRequest)?;
    Ok(ok(state.db.create_leave_request(&payload).await?))
}

pub async fn update_leave_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<LeaveRequestPayload>,
) -> ApiResult<Json<Value>> {
    payload.validate().map_err(ApiError::BadRequest)?;
    let row = state
        .db
        .update_leave_request(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Leave request"))?;
    Ok(ok(row))
}

pub async fn delete_leave_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    if !state.db.delete_leave_request(id).await? {
        return Err(ApiError::NotFound("Leave request"));
    }
    Ok(deleted("Leave request"))
}

// === Travel requests ===

pub async fn list_travel_requests(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.list_travel_requests().await?))
}

pub async fn get_travel_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .get_travel_request(id)
        .await?
        .ok_or(ApiError::NotFound("Travel request"))?;
    Ok(ok(row))
}

pub async fn create_travel_request(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TravelRequestPayload>,
) -> ApiResult<Json<Value>> {
    let payload = payload.normalize();
    payload.validate().map_err(ApiError::BadRequest)?;
    Ok(ok(state.db.create_travel_request(&payload).await?))
}

pub async fn update_travel_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<TravelRequestPayload>,
) -> ApiResult<Json<Value>> {
    let payload = payload.normalize();
    payload.validate().map_err(ApiError::BadRequest)?;
    let row = state
        .db
        .update_travel_request(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Travel request"))?;
    Ok(ok(row))
}

pub async fn delete_travel_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    if !state.db.delete_travel_request(id).await? {
        return Err(ApiError::NotFound("Travel request"));
    }
    Ok(deleted("Travel request"))
}

// === Ticket bookings ===

pub async fn list_ticket_bookings(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.list_ticket_bookings().await?))
}

pub async fn get_ticket_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .get_ticket_booking(id)
        .await?
        .ok_or(ApiError::NotFound("Ticket booking"))?;
    Ok(ok(row))
}

pub async fn create_ticket_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TicketBookingPayload>,
) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.create_ticket_booking(&payload).await?))
}

pub async fn update_ticket_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<TicketBookingPayload>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .update_ticket_booking(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Ticket booking"))?;
    Ok(ok(row))
}

pub async fn delete_ticket_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    if !state.db.delete_ticket_booking(id).await? {
        return Err(ApiError::NotFound("Ticket booking"));
    }
    Ok(deleted("Ticket booking"))
}

// === Candidate resumes ===

pub async fn list_resumes(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.list_resumes().await?))
}

pub async fn list_selected_candidates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.list_selected_candidates().await?))
}

pub async fn get_resume(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .get_resume(id)
        .await?
        .ok_or(ApiError::NotFound("Resume"))?;
    Ok(ok(row))
}

pub async fn create_resume(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CandidateResumePayload>,
) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.create_resume(&payload).await?))
}

pub async fn update_resume(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CandidateResumePayload>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .update_resume(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Resume"))?;
    Ok(ok(row))
}

pub async fn delete_resume(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    if !state.db.delete_resume(id).await? {
        return Err(ApiError::NotFound("Resume"));
    }
    Ok(deleted("Resume"))
}

// === Plant visitors ===

pub async fn list_plant_visitors(State(state): State<Arc<AppState>>) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.list_plant_visitors().await?))
}

pub async fn get_plant_visitor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .get_plant_visitor(id)
        .await?
        .ok_or(ApiError::NotFound("Plant visitor"))?;
    Ok(ok(row))
}

pub async fn create_plant_visitor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlantVisitorPayload>,
) -> ApiResult<Json<Value>> {
    Ok(ok(state.db.create_plant_visitor(&payload).await?))
}

pub async fn update_plant_visitor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PlantVisitorPayload>,
) -> ApiResult<Json<Value>> {
    let row = state
        .db
        .update_plant_visitor(id, &payload)
        .await?
        .ok_or(ApiError::NotFound("Plant visitor"))?;
    Ok(ok(row))
}

pub async fn delete_plant_visitor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    if !state.db.delete_plant_visitor(id).await? {
        return Err(ApiError::NotFound("Plant visitor"));
    }
    Ok(deleted("Plant visitor"))
}
