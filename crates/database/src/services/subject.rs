use crate::{
    entities::{school_years, subjects},
    error::ServiceError,
    filter::{FilterColumns, build_condition, col, lower},
    services::assign,
};
use models::{
    filter::{FilterKey, FilterSet},
    records::SubjectRecord,
    updates::SubjectUpdate,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Iterable, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::SimpleExpr,
};

impl FilterColumns for subjects::Entity {
    fn search_columns() -> Vec<SimpleExpr> {
        vec![col((subjects::Entity, subjects::Column::SubjectName))]
    }

    fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
        match key {
            FilterKey::Grade => Some(col((subjects::Entity, subjects::Column::GradeLevel))),
            FilterKey::SchoolYear => {
                Some(col((school_years::Entity, school_years::Column::SchoolYear)))
            }
            FilterKey::Status => Some(col((subjects::Entity, subjects::Column::Status))),
            _ => None,
        }
    }
}

pub struct SubjectService;

impl SubjectService {
    fn records() -> Select<subjects::Entity> {
        subjects::Entity::find()
            .select_only()
            .columns(subjects::Column::iter())
            .column_as(school_years::Column::SchoolYear, "school_year")
            .join(JoinType::LeftJoin, subjects::Relation::SchoolYear.def())
            .order_by_asc(lower((subjects::Entity, subjects::Column::SubjectName)))
            .order_by_asc(subjects::Column::SubjectId)
    }

    pub async fn list(
        db: &DatabaseConnection,
        filters: &FilterSet,
    ) -> Result<Vec<SubjectRecord>, DbErr> {
        Self::records()
            .filter(build_condition::<subjects::Entity>(filters))
            .into_model::<SubjectRecord>()
            .all(db)
            .await
    }

    pub async fn find(
        db: &DatabaseConnection,
        subject_id: i32,
    ) -> Result<Option<SubjectRecord>, DbErr> {
        Self::records()
            .filter(subjects::Column::SubjectId.eq(subject_id))
            .into_model::<SubjectRecord>()
            .one(db)
            .await
    }

    pub async fn update(
        db: &DatabaseConnection,
        subject_id: i32,
        update: SubjectUpdate,
    ) -> Result<Option<SubjectRecord>, ServiceError> {
        update.validate()?;

        let Some(subject) = subjects::Entity::find_by_id(subject_id).one(db).await? else {
            return Ok(None);
        };

        let mut active = subject.into_active_model();
        assign(&mut active.subject_name, update.subject_name);
        assign(&mut active.grade_level, update.grade_level);
        assign(&mut active.grading_criteria, update.grading_criteria.map(Some));
        assign(&mut active.description, update.description.map(Some));
        assign(&mut active.school_year_id, update.school_year_id);
        assign(&mut active.status, update.status.map(|status| status.to_lowercase()));

        if active.is_changed() {
            active.update(db).await?;
            log::info!("Updated subject {subject_id}");
        }

        Ok(Self::find(db, subject_id).await?)
    }
}
