//! Session tokens handed out by `/login`.
//!
//! Tokens are HS256 JWTs carrying the user id and role; the server checks
//! the signature and expiry on every request, so nothing the client stores
//! can grant a role by itself.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use models::roles::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC secret used to sign and verify tokens
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the `users` row
    pub sub: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_token(user_id: i32, role: Role, config: &SessionConfig) -> Result<String, Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        exp: (now + Duration::minutes(config.ttl_minutes)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Checks signature and expiry and returns the embedded claims
pub fn validate_token(token: &str, config: &SessionConfig) -> Result<Claims, Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(secret: &str) -> SessionConfig {
        SessionConfig {
            secret: secret.to_string(),
            ttl_minutes: 480,
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let config = config("registrar-office");
        let token = issue_token(3, Role::Student, &config).unwrap();
        let claims = validate_token(&token, &config).unwrap();

        assert_eq!(claims.sub, 3);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp - claims.iat, 480 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config("registrar-office");
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: Role::Principal,
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_other_secret_is_rejected() {
        let token = issue_token(1, Role::Principal, &config("alpha")).unwrap();
        assert!(validate_token(&token, &config("bravo")).is_err());
    }
}
