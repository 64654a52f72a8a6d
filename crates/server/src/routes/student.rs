use crate::{
    auth::extract::RequirePrincipal,
    dtos::filter::{FilterParams, Filters, SchoolYearScope},
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use database::services::{grade::GradeService, student::StudentService};
use models::{grades::GradeRecord, records::StudentRecord, updates::StudentUpdate};

/// List students matching the filters, ordered by last then first name
#[utoipa::path(
    get,
    path = "/students",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching students", body = Vec<StudentRecord>),
        (status = 400, description = "Invalid filter value"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Principal role required"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn list_students(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<Vec<StudentRecord>>, AppError> {
    Ok(Json(StudentService::list(&state.db, &filters).await?))
}

/// Get one student's full record
#[utoipa::path(
    get,
    path = "/students/{id}/details",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = StudentRecord),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student_details(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<StudentRecord>, AppError> {
    StudentService::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("student", id))
}

/// Update a student; absent fields are left untouched
///
/// Deactivating a student is a status update, students are never deleted.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = StudentUpdate,
    responses(
        (status = 200, description = "Updated student", body = StudentRecord),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn update_student(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<StudentUpdate>,
) -> Result<Json<StudentRecord>, AppError> {
    StudentService::update(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("student", id))
}

/// Grades of one student, one row per subject and school year
#[utoipa::path(
    get,
    path = "/students/{id}/grades",
    params(("id" = i32, Path, description = "Student ID"), SchoolYearScope),
    responses(
        (status = 200, description = "Grades, empty when none are recorded", body = Vec<GradeRecord>),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Students"
)]
pub async fn get_student_grades(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(scope): Query<SchoolYearScope>,
) -> Result<Json<Vec<GradeRecord>>, AppError> {
    if !StudentService::exists(&state.db, id).await? {
        return Err(AppError::not_found("student", id));
    }

    Ok(Json(
        GradeService::for_student(&state.db, id, scope.label()).await?,
    ))
}

#[cfg(test)]
mod test {
    use crate::testing::{self, student_row};
    use axum::http::{Method, StatusCode};
    use database::entities::students;
    use models::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_list_requires_token() {
        let state = testing::state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let (status, body) = testing::get(&state, "/students", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_list_requires_principal() {
        let state = testing::state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = testing::token(&state, 5, Role::Student);

        let (status, _) = testing::get(&state, "/students", Some(&token)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_students() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                student_row(1, "Dela Cruz", "Juan"),
                student_row(2, "Reyes", "Ana"),
            ]])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, body) =
            testing::get(&state, "/students?searchTerm=an&grade=7", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[1]["firstname"], "Ana");
    }

    #[tokio::test]
    async fn test_non_numeric_section_is_bad_request() {
        let state = testing::state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::get(&state, "/students?section=abc", Some(&token)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_student_details() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, body) = testing::get(&state, "/students/99/details", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "student 99 not found" }));
    }

    #[tokio::test]
    async fn test_grades_of_missing_student() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<students::Model>::new()])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::get(&state, "/students/99/grades", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_status_update_is_bad_request() {
        let state = testing::state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::send(
            &state,
            Method::PUT,
            "/students/1",
            Some(&token),
            Some(json!({ "student_status": "graduated" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
