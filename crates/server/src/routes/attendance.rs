use crate::{
    auth::extract::RequirePrincipal, dtos::filter::SchoolYearScope, error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::{attendance::AttendanceService, student::StudentService};
use models::attendance::AttendanceSummary;

/// Attendance counters of one student
///
/// A student without attendance rows gets all counters at zero; only an
/// unknown student is a 404.
#[utoipa::path(
    get,
    path = "/attendance/{student_id}",
    params(("student_id" = i32, Path, description = "Student ID"), SchoolYearScope),
    responses(
        (status = 200, description = "Attendance counters", body = AttendanceSummary),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_attendance(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(student_id): Path<i32>,
    Query(scope): Query<SchoolYearScope>,
) -> Result<Json<AttendanceSummary>, AppError> {
    if !StudentService::exists(&state.db, student_id).await? {
        return Err(AppError::not_found("student", student_id));
    }

    Ok(Json(
        AttendanceService::summary(&state.db, student_id, scope.label()).await?,
    ))
}
