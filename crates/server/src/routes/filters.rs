use crate::{auth::extract::RequirePrincipal, error::AppError, state::AppState};
use axum::{Json, extract::State};
use database::services::filter_options::FilterOptionsService;
use models::options::FilterOptions;

/// Choices for the filter dropdowns of every list page
#[utoipa::path(
    get,
    path = "/filters",
    responses(
        (status = 200, description = "Filter options", body = FilterOptions),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Filters"
)]
pub async fn get_filter_options(
    _: RequirePrincipal,
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, AppError> {
    Ok(Json(FilterOptionsService::load(&state.db).await?))
}
