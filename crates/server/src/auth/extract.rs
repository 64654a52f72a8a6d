//! Extractors that authenticate the bearer token and enforce roles.

use crate::{auth::token::validate_token, error::AppError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use models::roles::Role;

/// The caller behind a valid session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: Role,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".into()))?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Expected Authorization: Bearer <token>".into())
        })?;

        let claims = validate_token(token, &state.config.session)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(Self {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

async fn require(parts: &mut Parts, state: &AppState, role: Role) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        return Err(AppError::Forbidden(format!("{role} role required")));
    }
    Ok(user)
}

/// Staff routes
pub struct RequirePrincipal(pub AuthUser);

impl FromRequestParts<AppState> for RequirePrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::Principal).await.map(Self)
    }
}

/// Self-service routes under `/me`
pub struct RequireStudent(pub AuthUser);

impl FromRequestParts<AppState> for RequireStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Role::Student).await.map(Self)
    }
}
