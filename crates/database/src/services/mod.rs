use sea_orm::{ActiveValue, Value};

pub mod attendance;
pub mod employee;
pub mod filter_options;
pub mod grade;
pub mod schedule;
pub mod school_year;
pub mod section;
pub mod student;
pub mod subject;
pub mod user;

/// Sets `slot` when the update carries a value and leaves it untouched
/// otherwise
pub(crate) fn assign<V>(slot: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<Value>,
{
    if let Some(value) = value {
        *slot = ActiveValue::Set(value);
    }
}
