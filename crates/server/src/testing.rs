use crate::{
    auth::token::{SessionConfig, issue_token},
    config::Config,
    routes,
    state::AppState,
};
use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use models::roles::Role;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

pub fn state(db: DatabaseConnection) -> AppState {
    AppState::new(
        db,
        Config {
            database_url: "postgres://localhost/test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            session: SessionConfig {
                secret: "test-secret".to_string(),
                ttl_minutes: 5,
            },
            bootstrap: None,
        },
    )
}

pub fn token(state: &AppState, user_id: i32, role: Role) -> String {
    issue_token(user_id, role, &state.config.session).unwrap()
}

pub async fn send(
    state: &AppState,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = routes::router(state.clone())
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

pub async fn get(state: &AppState, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(state, Method::GET, uri, token, None).await
}

/// A `StudentRecord` row as the joined student query returns it
pub fn student_row(
    student_id: i32,
    lastname: &str,
    firstname: &str,
) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
    use sea_orm::Value;

    let text = |value: &str| Value::from(value.to_string());
    let none = || Value::String(None);
    std::collections::BTreeMap::from([
        ("student_id", Value::from(student_id)),
        ("lastname", text(lastname)),
        ("firstname", text(firstname)),
        ("middlename", none()),
        ("current_yr_lvl", text("7")),
        ("birthdate", Value::ChronoDate(None)),
        ("gender", text("F")),
        ("age", Value::Int(None)),
        ("home_address", none()),
        ("barangay", text("San Isidro")),
        ("city_municipality", none()),
        ("province", none()),
        ("contact_number", none()),
        ("email_address", none()),
        ("mother_name", none()),
        ("father_name", none()),
        ("parent_address", none()),
        ("father_occupation", none()),
        ("mother_occupation", none()),
        ("annual_hshld_income", none()),
        ("number_of_siblings", Value::Int(None)),
        ("father_educ_lvl", none()),
        ("mother_educ_lvl", none()),
        ("father_contact_number", none()),
        ("mother_contact_number", none()),
        ("student_status", text("active")),
        ("section_id", Value::from(2)),
        ("section_name", text("Sampaguita")),
        ("school_year", text("2024-2025")),
    ])
}
