//! Attendance API endpoints.

use api_types::attendance::{
    AttendanceListResponse, AttendanceMark, AttendanceQuery, AttendanceStatus, AttendanceView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::{Data, ServerError, server::ServerState};
use engine::users;

fn map_status(status: engine::AttendanceStatus) -> AttendanceStatus {
    match status {
        engine::AttendanceStatus::Present => AttendanceStatus::Present,
        engine::AttendanceStatus::Absent => AttendanceStatus::Absent,
        engine::AttendanceStatus::Leave => AttendanceStatus::Leave,
    }
}

fn map_entry(entry: engine::Attendance) -> AttendanceView {
    AttendanceView {
        employee_id: entry.employee_id,
        day: entry.day,
        status: map_status(entry.status),
    }
}

pub async fn mark(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<AttendanceMark>,
) -> Result<(StatusCode, Json<Data<AttendanceView>>), ServerError> {
    let status = match payload.status {
        AttendanceStatus::Present => engine::AttendanceStatus::Present,
        AttendanceStatus::Absent => engine::AttendanceStatus::Absent,
        AttendanceStatus::Leave => engine::AttendanceStatus::Leave,
    };
    let entry = state
        .engine
        .mark_attendance(&user.username, payload.employee_id, payload.day, status)
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_entry(entry)))))
}

/// Month and year default to the current calendar month.
pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(employee_id): Path<Uuid>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Data<AttendanceListResponse>>, ServerError> {
    let today = Utc::now().date_naive();
    let month = query.month.unwrap_or_else(|| today.month());
    let year = query.year.unwrap_or_else(|| today.year());

    let report = state
        .engine
        .attendance_month(&user.username, employee_id, year, month)
        .await?;

    Ok(Json(Data::new(AttendanceListResponse {
        entries: report.entries.into_iter().map(map_entry).collect(),
        present_days: report.present_days,
    })))
}
