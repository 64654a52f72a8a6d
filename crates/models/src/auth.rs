use crate::roles::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Result of a login attempt
///
/// A rejected login is not an error: it carries `authenticated: false` and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    pub authenticated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn rejected() -> Self {
        Self {
            authenticated: false,
            role: None,
            token: None,
        }
    }

    pub fn accepted(role: Role, token: String) -> Self {
        Self {
            authenticated: true,
            role: Some(role),
            token: Some(token),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejected_login_only_carries_flag() {
        let body = serde_json::to_value(LoginResponse::rejected()).unwrap();
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[test]
    fn test_accepted_login_carries_role_and_token() {
        let body =
            serde_json::to_value(LoginResponse::accepted(Role::Principal, "abc".to_string()))
                .unwrap();
        assert_eq!(
            body,
            json!({ "authenticated": true, "role": "principal", "token": "abc" })
        );
    }
}
