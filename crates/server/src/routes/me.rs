//! Read-only views for a logged-in student, always scoped to the student
//! record linked to the login.

use crate::{
    auth::extract::{AuthUser, RequireStudent},
    dtos::filter::SchoolYearScope,
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
};
use database::services::{
    attendance::AttendanceService, grade::GradeService, schedule::ScheduleService,
    student::StudentService,
};
use models::{
    attendance::AttendanceEntry,
    grades::GradeRecord,
    records::{ScheduleRecord, StudentRecord},
};

async fn linked_student(state: &AppState, user: AuthUser) -> Result<StudentRecord, AppError> {
    StudentService::find_by_user(&state.db, user.user_id)
        .await?
        .ok_or(AppError::Absent("student record linked to this login"))
}

#[utoipa::path(
    get,
    path = "/me/profile",
    responses(
        (status = 200, description = "The caller's student record", body = StudentRecord),
        (status = 403, description = "Student role required"),
        (status = 404, description = "No student record is linked to this login")
    ),
    security(("jwt" = [])),
    tag = "Self Service"
)]
pub async fn get_profile(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> Result<Json<StudentRecord>, AppError> {
    Ok(Json(linked_student(&state, user).await?))
}

#[utoipa::path(
    get,
    path = "/me/grades",
    params(SchoolYearScope),
    responses(
        (status = 200, description = "The caller's grades", body = Vec<GradeRecord>),
        (status = 403, description = "Student role required"),
        (status = 404, description = "No student record is linked to this login")
    ),
    security(("jwt" = [])),
    tag = "Self Service"
)]
pub async fn get_grades(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Query(scope): Query<SchoolYearScope>,
) -> Result<Json<Vec<GradeRecord>>, AppError> {
    let student = linked_student(&state, user).await?;
    Ok(Json(
        GradeService::for_student(&state.db, student.student_id, scope.label()).await?,
    ))
}

/// Day-by-day attendance marks, oldest first
#[utoipa::path(
    get,
    path = "/me/attendance",
    params(SchoolYearScope),
    responses(
        (status = 200, description = "The caller's attendance marks", body = Vec<AttendanceEntry>),
        (status = 403, description = "Student role required"),
        (status = 404, description = "No student record is linked to this login")
    ),
    security(("jwt" = [])),
    tag = "Self Service"
)]
pub async fn get_attendance(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
    Query(scope): Query<SchoolYearScope>,
) -> Result<Json<Vec<AttendanceEntry>>, AppError> {
    let student = linked_student(&state, user).await?;
    Ok(Json(
        AttendanceService::entries(&state.db, student.student_id, scope.label()).await?,
    ))
}

/// Weekly timetable of the caller's section; empty when unassigned
#[utoipa::path(
    get,
    path = "/me/schedule",
    responses(
        (status = 200, description = "The caller's class schedule", body = Vec<ScheduleRecord>),
        (status = 403, description = "Student role required"),
        (status = 404, description = "No student record is linked to this login")
    ),
    security(("jwt" = [])),
    tag = "Self Service"
)]
pub async fn get_schedule(
    RequireStudent(user): RequireStudent,
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    let student = linked_student(&state, user).await?;
    let schedule = match student.section_id {
        Some(section_id) => ScheduleService::for_section(&state.db, section_id).await?,
        None => Vec::new(),
    };
    Ok(Json(schedule))
}

#[cfg(test)]
mod test {
    use crate::testing::{self, student_row};
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use models::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_profile_of_linked_student() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![student_row(8, "Reyes", "Ana")]])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 20, Role::Student);

        let (status, body) = testing::get(&state, "/me/profile", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["student_id"], 8);
    }

    #[tokio::test]
    async fn test_principal_cannot_use_self_service() {
        let state = testing::state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::get(&state, "/me/profile", Some(&token)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_unlinked_login() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 21, Role::Student);

        let (status, _) = testing::get(&state, "/me/grades", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attendance_entries() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![student_row(8, "Reyes", "Ana")]])
            .append_query_results([vec![BTreeMap::from([
                ("date", Value::from(date)),
                ("status", "L".into()),
            ])]])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 20, Role::Student);

        let (status, body) = testing::get(&state, "/me/attendance", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["date"], "2024-08-05");
        assert_eq!(body[0]["status"], "L");
    }
}
