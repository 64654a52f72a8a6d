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
use database::services::subject::SubjectService;
use models::{records::SubjectRecord, updates::SubjectUpdate};

#[utoipa::path(
    get,
    path = "/subjects",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching subjects", body = Vec<SubjectRecord>),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Subjects"
)]
pub async fn list_subjects(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<Vec<SubjectRecord>>, AppError> {
    Ok(Json(SubjectService::list(&state.db, &filters).await?))
}

#[utoipa::path(
    get,
    path = "/subjects/{id}",
    params(("id" = i32, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject found", body = SubjectRecord),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Subjects"
)]
pub async fn get_subject(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubjectRecord>, AppError> {
    SubjectService::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("subject", id))
}

#[utoipa::path(
    put,
    path = "/subjects/{id}",
    params(("id" = i32, Path, description = "Subject ID")),
    request_body = SubjectUpdate,
    responses(
        (status = 200, description = "Updated subject", body = SubjectRecord),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Subjects"
)]
pub async fn update_subject(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<SubjectUpdate>,
) -> Result<Json<SubjectRecord>, AppError> {
    SubjectService::update(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("subject", id))
}
