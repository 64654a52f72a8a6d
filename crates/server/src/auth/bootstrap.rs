use crate::{auth::password::hash_password, config::BootstrapLogin, error::AppError};
use database::services::user::UserService;
use models::roles::Role;
use sea_orm::DatabaseConnection;

/// Creates the configured principal login unless the username is taken
pub async fn ensure_principal(
    db: &DatabaseConnection,
    login: &BootstrapLogin,
) -> Result<(), AppError> {
    if UserService::find_by_username(db, &login.username)
        .await?
        .is_some()
    {
        log::info!("Bootstrap login {} already exists", login.username);
        return Ok(());
    }

    let hash =
        hash_password(&login.password).map_err(|err| AppError::Internal(err.to_string()))?;
    UserService::create(db, &login.username, hash, Role::Principal).await?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use database::entities::users;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn login() -> BootstrapLogin {
        BootstrapLogin {
            username: "principal".to_string(),
            password: "change-me".to_string(),
        }
    }

    fn user() -> users::Model {
        users::Model {
            user_id: 1,
            username: "principal".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            role_id: 1,
        }
    }

    #[tokio::test]
    async fn test_existing_login_is_kept() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user()]])
            .into_connection();

        ensure_principal(&db, &login()).await.unwrap();

        // only the lookup ran
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_login_is_created() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new(), vec![user()]])
            .into_connection();

        ensure_principal(&db, &login()).await.unwrap();

        assert_eq!(db.into_transaction_log().len(), 2);
    }
}
