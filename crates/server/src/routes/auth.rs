use crate::{
    auth::{password::verify_password, token::issue_token},
    error::AppError,
    state::AppState,
};
use axum::{Json, extract::State};
use database::services::user::UserService;
use models::{
    auth::{LoginRequest, LoginResponse},
    roles::Role,
};

/// Exchange credentials for a session token
///
/// Wrong credentials are not an error: the response is 200 with
/// `authenticated: false`.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login attempt evaluated", body = LoginResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let Some(user) = UserService::find_by_username(&state.db, &request.username).await? else {
        log::info!("Rejected login for unknown user {}", request.username.trim());
        return Ok(Json(LoginResponse::rejected()));
    };

    match verify_password(&request.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            log::info!("Rejected login for {}", user.username);
            return Ok(Json(LoginResponse::rejected()));
        }
        Err(err) => {
            log::warn!("Unreadable password hash for {}: {err}", user.username);
            return Ok(Json(LoginResponse::rejected()));
        }
    }

    let Some(role) = Role::from_id(user.role_id) else {
        log::warn!("User {} has unknown role id {}", user.username, user.role_id);
        return Ok(Json(LoginResponse::rejected()));
    };

    let token = issue_token(user.user_id, role, &state.config.session)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    log::info!("{} logged in as {role}", user.username);
    Ok(Json(LoginResponse::accepted(role, token)))
}

#[cfg(test)]
mod test {
    use crate::{
        auth::{password::hash_password, token::validate_token},
        testing,
    };
    use axum::http::{Method, StatusCode};
    use database::entities::users;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn user(password: &str, role_id: i32) -> users::Model {
        users::Model {
            user_id: 1,
            username: "principal".to_string(),
            password_hash: hash_password(password).unwrap(),
            role_id,
        }
    }

    #[tokio::test]
    async fn test_principal_login() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user("admin123", 1)]])
            .into_connection();
        let state = testing::state(db);

        let (status, body) = testing::send(
            &state,
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "principal", "password": "admin123" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["role"], "principal");

        let token = body["token"].as_str().unwrap();
        let claims = validate_token(token, &state.config.session).unwrap();
        assert_eq!(claims.sub, 1);
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected_with_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user("admin123", 1)]])
            .into_connection();

        let (status, body) = testing::send(
            &testing::state(db),
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "principal", "password": "admin" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn test_unknown_user_is_rejected_with_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let (status, body) = testing::send(
            &testing::state(db),
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": "ghost", "password": "boo" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "authenticated": false }));
    }
}
