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
use database::services::employee::EmployeeService;
use models::{records::EmployeeRecord, updates::EmployeeUpdate};

/// List employees matching the filters
#[utoipa::path(
    get,
    path = "/employees",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching employees", body = Vec<EmployeeRecord>),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Employees"
)]
pub async fn list_employees(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Filters(filters): Filters,
) -> Result<Json<Vec<EmployeeRecord>>, AppError> {
    Ok(Json(EmployeeService::list(&state.db, &filters).await?))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeRecord),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Employees"
)]
pub async fn get_employee(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeRecord>, AppError> {
    EmployeeService::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("employee", id))
}

/// Update an employee; absent fields are left untouched
#[utoipa::path(
    put,
    path = "/employees/{id}",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = EmployeeUpdate,
    responses(
        (status = 200, description = "Updated employee", body = EmployeeRecord),
        (status = 400, description = "Invalid field value"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Employees"
)]
pub async fn update_employee(
    _: RequirePrincipal,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<EmployeeUpdate>,
) -> Result<Json<EmployeeRecord>, AppError> {
    EmployeeService::update(&state.db, id, update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("employee", id))
}

#[cfg(test)]
mod test {
    use crate::testing;
    use axum::http::{Method, StatusCode};
    use database::entities::employees;
    use models::roles::Role;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn employee(status: &str) -> employees::Model {
        employees::Model {
            employee_id: 4,
            lastname: "Santos".to_string(),
            firstname: "Maria".to_string(),
            middlename: None,
            role: "Class Adviser".to_string(),
            contact_number: None,
            address: None,
            status: status.to_string(),
            year_started: Some(2015),
        }
    }

    #[tokio::test]
    async fn test_deactivate_employee() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![employee("active")],
                vec![employee("inactive")],
                vec![employee("inactive")],
            ])
            .into_connection();
        let state = testing::state(db);
        let token = testing::token(&state, 1, Role::Principal);

        let (status, body) = testing::send(
            &state,
            Method::PUT,
            "/employees/4",
            Some(&token),
            Some(json!({ "status": "Inactive" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "inactive");
        assert_eq!(body["role"], "Class Adviser");
    }

    #[tokio::test]
    async fn test_unknown_role_is_bad_request() {
        let state = testing::state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let token = testing::token(&state, 1, Role::Principal);

        let (status, _) = testing::send(
            &state,
            Method::PUT,
            "/employees/4",
            Some(&token),
            Some(json!({ "role": "Janitor" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
