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
use database::services::schedule::ScheduleService;
use models::{records::ScheduleRecord, updates::ScheduleUpdate};

/// List schedule entries in weekday order, then by start time
#[utoipa::path(
    get,
    path = "/schedules",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching schedule entries", body = Vec<ScheduleRecord>),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn list_schedules(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<Vec<ScheduleRecord>>, AppError> {
    Ok(Json(ScheduleService::list(&state.db, &filters).await?))
}

#[utoipa::path(
    get,
    path = "/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule entry found", body = ScheduleRecord),
        (status = 404, description = "Schedule entry not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn get_schedule(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ScheduleRecord>, AppError> {
    ScheduleService::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("schedule", id))
}

/// Update a schedule entry; the merged start time must precede the end time
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    params(("id" = i32, Path, description = "Schedule ID")),
    request_body = ScheduleUpdate,
    responses(
        (status = 200, description = "Updated schedule entry", body = ScheduleRecord),
        (status = 400, description = "Invalid field value or time range"),
        (status = 404, description = "Schedule entry not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Schedules"
)]
pub async fn update_schedule(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<ScheduleUpdate>,
) -> Result<Json<ScheduleRecord>, AppError> {
    ScheduleService::update(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("schedule", id))
}

#[cfg(test)]
mod test {
    use crate::testing;
    use axum::http::{Method, StatusCode};
    use database::entities::schedules;
    use models::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    #[tokio::test]
    async fn test_update_missing_schedule() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<schedules::Model>::new()])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::send(
            &state,
            Method::PUT,
            "/schedules/12",
            Some(&token),
            Some(json!({ "day": "Tuesday" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
