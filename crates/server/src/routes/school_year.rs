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
use database::services::school_year::SchoolYearService;
use models::{records::SchoolYearRecord, updates::SchoolYearUpdate};

#[utoipa::path(
    get,
    path = "/school-years",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching school years", body = Vec<SchoolYearRecord>),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "School Years"
)]
pub async fn list_school_years(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<Vec<SchoolYearRecord>>, AppError> {
    Ok(Json(SchoolYearService::list(&state.db, &filters).await?))
}

/// The active school year
///
/// More than one year may be marked active; the one starting last wins.
#[utoipa::path(
    get,
    path = "/school-years/active",
    responses(
        (status = 200, description = "Active school year", body = SchoolYearRecord),
        (status = 404, description = "No school year is active"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "School Years"
)]
pub async fn get_active_school_year(
    _: RequirePrincipal,
    State(state): State<AppState>,
) -> Result<Json<SchoolYearRecord>, AppError> {
    SchoolYearService::active(&state.db)
        .await?
        .map(Json)
        .ok_or(AppError::Absent("active school year"))
}

#[utoipa::path(
    get,
    path = "/school-years/{id}",
    params(("id" = i32, Path, description = "School year ID")),
    responses(
        (status = 200, description = "School year found", body = SchoolYearRecord),
        (status = 404, description = "School year not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "School Years"
)]
pub async fn get_school_year(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SchoolYearRecord>, AppError> {
    SchoolYearService::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("school year", id))
}

/// Update a school year; the merged date ranges must stay ordered
#[utoipa::path(
    put,
    path = "/school-years/{id}",
    params(("id" = i32, Path, description = "School year ID")),
    request_body = SchoolYearUpdate,
    responses(
        (status = 200, description = "Updated school year", body = SchoolYearRecord),
        (status = 400, description = "Invalid field value or date range"),
        (status = 404, description = "School year not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "School Years"
)]
pub async fn update_school_year(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<SchoolYearUpdate>,
) -> Result<Json<SchoolYearRecord>, AppError> {
    SchoolYearService::update(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("school year", id))
}
