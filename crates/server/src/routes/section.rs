use crate::{
    auth::extract::RequirePrincipal,
    dtos::filter::{FilterParams, Filters},
    error::AppError,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::section::SectionService;
use models::{
    records::{SectionDetail, SectionRecord},
    updates::SectionUpdate,
};

#[utoipa::path(
    get,
    path = "/sections",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching sections", body = Vec<SectionRecord>),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn list_sections(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<Vec<SectionRecord>>, AppError> {
    Ok(Json(SectionService::list(&state.db, &filters).await?))
}

/// Get a section with the students assigned to it
#[utoipa::path(
    get,
    path = "/sections/{id}",
    params(("id" = i32, Path, description = "Section ID")),
    responses(
        (status = 200, description = "Section and roster", body = SectionDetail),
        (status = 404, description = "Section not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn get_section(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SectionDetail>, AppError> {
    SectionService::find_detail(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("section", id))
}

#[utoipa::path(
    put,
    path = "/sections/{id}",
    params(("id" = i32, Path, description = "Section ID")),
    request_body = SectionUpdate,
    responses(
        (status = 200, description = "Updated section", body = SectionRecord),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Section not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Sections"
)]
pub async fn update_section(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<SectionUpdate>,
) -> Result<Json<SectionRecord>, AppError> {
    SectionService::update(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("section", id))
}

#[cfg(test)]
mod test {
    use crate::testing::{self, student_row};
    use axum::http::StatusCode;
    use models::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn section_row() -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("section_id", Value::from(2)),
            ("section_name", "Sampaguita".into()),
            ("grade_level", "7".into()),
            ("status", "active".into()),
            ("max_capacity", 40.into()),
            ("school_year_id", 3.into()),
            ("school_year", "2024-2025".into()),
        ])
    }

    #[tokio::test]
    async fn test_section_detail_flattens_roster() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![section_row()]])
            .append_query_results([vec![
                student_row(1, "Dela Cruz", "Juan"),
                student_row(2, "Reyes", "Ana"),
            ]])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, body) = testing::get(&state, "/sections/2", Some(&token)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["section_name"], "Sampaguita");
        assert_eq!(body["students"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_section() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::get(&state, "/sections/7", Some(&token)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
