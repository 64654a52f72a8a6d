use crate::entities::users;
use models::roles::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct UserService;

impl UserService {
    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(db)
            .await
    }

    /// Inserts a login; `password_hash` must already be a PHC string
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        password_hash: String,
        role: Role,
    ) -> Result<users::Model, DbErr> {
        let user = users::ActiveModel {
            username: Set(username.trim().to_string()),
            password_hash: Set(password_hash),
            role_id: Set(role.id()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        log::info!("Created {role} login {}", user.username);
        Ok(user)
    }
}
