use models::updates::UpdateError;
use sea_orm::DbErr;

/// Failure of a service call that writes
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error(transparent)]
    Invalid(#[from] UpdateError),
}
