use crate::{
    entities::employees,
    error::ServiceError,
    filter::{FilterColumns, build_condition, col, lower},
    services::assign,
};
use models::{
    filter::{FilterKey, FilterSet},
    records::EmployeeRecord,
    updates::EmployeeUpdate,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, sea_query::SimpleExpr,
};

impl FilterColumns for employees::Entity {
    fn search_columns() -> Vec<SimpleExpr> {
        vec![
            col((employees::Entity, employees::Column::Lastname)),
            col((employees::Entity, employees::Column::Firstname)),
        ]
    }

    fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
        match key {
            FilterKey::Role => Some(col((employees::Entity, employees::Column::Role))),
            FilterKey::Status => Some(col((employees::Entity, employees::Column::Status))),
            _ => None,
        }
    }
}

pub struct EmployeeService;

impl EmployeeService {
    pub async fn list(
        db: &DatabaseConnection,
        filters: &FilterSet,
    ) -> Result<Vec<EmployeeRecord>, DbErr> {
        employees::Entity::find()
            .filter(build_condition::<employees::Entity>(filters))
            .order_by_asc(lower((employees::Entity, employees::Column::Lastname)))
            .order_by_asc(lower((employees::Entity, employees::Column::Firstname)))
            .order_by_asc(employees::Column::EmployeeId)
            .into_model::<EmployeeRecord>()
            .all(db)
            .await
    }

    pub async fn find(
        db: &DatabaseConnection,
        employee_id: i32,
    ) -> Result<Option<EmployeeRecord>, DbErr> {
        employees::Entity::find_by_id(employee_id)
            .into_model::<EmployeeRecord>()
            .one(db)
            .await
    }

    /// Applies a partial update; `None` when the employee does not exist
    pub async fn update(
        db: &DatabaseConnection,
        employee_id: i32,
        update: EmployeeUpdate,
    ) -> Result<Option<EmployeeRecord>, ServiceError> {
        update.validate()?;

        let Some(employee) = employees::Entity::find_by_id(employee_id).one(db).await? else {
            return Ok(None);
        };

        let mut active = employee.into_active_model();
        Self::apply_update(&mut active, update);

        if active.is_changed() {
            active.update(db).await?;
            log::info!("Updated employee {employee_id}");
        }

        Ok(Self::find(db, employee_id).await?)
    }

    fn apply_update(active: &mut employees::ActiveModel, update: EmployeeUpdate) {
        assign(&mut active.lastname, update.lastname);
        assign(&mut active.firstname, update.firstname);
        assign(&mut active.middlename, update.middlename.map(Some));
        assign(&mut active.role, update.role);
        assign(&mut active.contact_number, update.contact_number.map(Some));
        assign(&mut active.address, update.address.map(Some));
        assign(&mut active.status, update.status.map(|status| status.to_lowercase()));
        assign(&mut active.year_started, update.year_started.map(Some));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase};

    fn employee(status: &str) -> employees::Model {
        employees::Model {
            employee_id: 4,
            lastname: "Santos".to_string(),
            firstname: "Maria".to_string(),
            middlename: Some("Luna".to_string()),
            role: "Registrar".to_string(),
            contact_number: Some("09171234567".to_string()),
            address: None,
            status: status.to_string(),
            year_started: Some(2015),
        }
    }

    fn status_only() -> EmployeeUpdate {
        EmployeeUpdate {
            status: Some("inactive".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_only_update_leaves_other_columns() {
        let mut active = employee("active").into_active_model();
        EmployeeService::apply_update(&mut active, status_only());

        assert_eq!(active.status, ActiveValue::Set("inactive".to_string()));
        assert_eq!(
            active.role,
            ActiveValue::Unchanged("Registrar".to_string())
        );
        assert!(!active.lastname.is_set());
        assert!(!active.middlename.is_set());
        assert!(!active.contact_number.is_set());
        assert!(!active.year_started.is_set());
    }

    #[tokio::test]
    async fn test_update_returns_refreshed_record() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![employee("active")],
                vec![employee("inactive")],
                vec![employee("inactive")],
            ])
            .into_connection();

        let record = EmployeeService::update(&db, 4, status_only())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.status, "inactive");
        assert_eq!(record.role, "Registrar");
        assert_eq!(record.year_started, Some(2015));
    }

    #[tokio::test]
    async fn test_list_maps_rows_into_records() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![employee("active")]])
            .into_connection();

        let filters = FilterSet::from_params([("role", "Registrar")]).unwrap();
        let records = EmployeeService::list(&db, &filters).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, 4);
        assert_eq!(records[0].middlename.as_deref(), Some("Luna"));
    }
}
