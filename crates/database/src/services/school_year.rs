use crate::{
    entities::school_years,
    error::ServiceError,
    filter::{FilterColumns, build_condition, col},
    services::assign,
};
use models::{
    filter::{FilterKey, FilterSet},
    records::SchoolYearRecord,
    roles::RecordStatus,
    updates::SchoolYearUpdate,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, sea_query::SimpleExpr,
};

impl FilterColumns for school_years::Entity {
    fn search_columns() -> Vec<SimpleExpr> {
        vec![col((school_years::Entity, school_years::Column::SchoolYear))]
    }

    fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
        match key {
            FilterKey::SchoolYear => {
                Some(col((school_years::Entity, school_years::Column::SchoolYear)))
            }
            FilterKey::Status => Some(col((school_years::Entity, school_years::Column::Status))),
            _ => None,
        }
    }
}

pub struct SchoolYearService;

impl SchoolYearService {
    pub async fn list(
        db: &DatabaseConnection,
        filters: &FilterSet,
    ) -> Result<Vec<SchoolYearRecord>, DbErr> {
        school_years::Entity::find()
            .filter(build_condition::<school_years::Entity>(filters))
            .order_by_asc(school_years::Column::SchoolYear)
            .order_by_asc(school_years::Column::SchoolYearId)
            .into_model::<SchoolYearRecord>()
            .all(db)
            .await
    }

    /// The active school year; when several are active, the one that starts
    /// last
    pub async fn active(db: &DatabaseConnection) -> Result<Option<SchoolYearRecord>, DbErr> {
        school_years::Entity::find()
            .filter(school_years::Column::Status.eq(RecordStatus::Active.as_str()))
            .order_by_desc(school_years::Column::SchoolYearStart)
            .order_by_desc(school_years::Column::SchoolYearId)
            .into_model::<SchoolYearRecord>()
            .one(db)
            .await
    }

    pub async fn find(
        db: &DatabaseConnection,
        school_year_id: i32,
    ) -> Result<Option<SchoolYearRecord>, DbErr> {
        school_years::Entity::find_by_id(school_year_id)
            .into_model::<SchoolYearRecord>()
            .one(db)
            .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        school_year_id: i32,
        update: SchoolYearUpdate,
    ) -> Result<Option<SchoolYearRecord>, ServiceError> {
        update.validate()?;

        let Some(year) = school_years::Entity::find_by_id(school_year_id)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        // dates are checked again once merged with the stored row
        SchoolYearUpdate {
            school_year_start: update.school_year_start.or(Some(year.school_year_start)),
            school_year_end: update.school_year_end.or(Some(year.school_year_end)),
            enrollment_start: update.enrollment_start.or(year.enrollment_start),
            enrollment_end: update.enrollment_end.or(year.enrollment_end),
            ..Default::default()
        }
        .validate()?;

        let mut active = year.into_active_model();
        assign(&mut active.school_year, update.school_year);
        assign(&mut active.school_year_start, update.school_year_start);
        assign(&mut active.school_year_end, update.school_year_end);
        assign(&mut active.enrollment_start, update.enrollment_start.map(Some));
        assign(&mut active.enrollment_end, update.enrollment_end.map(Some));
        assign(&mut active.status, update.status.map(|status| status.to_lowercase()));

        if active.is_changed() {
            active.update(db).await?;
            log::info!("Updated school year {school_year_id}");
        }

        Ok(Self::find(db, school_year_id).await?)
    }
}
