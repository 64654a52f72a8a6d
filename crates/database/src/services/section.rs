use crate::{
    entities::{school_years, sections},
    error::ServiceError,
    filter::{FilterColumns, build_condition, col, lower},
    services::{assign, student::StudentService},
};
use futures::try_join;
use models::{
    filter::{FilterKey, FilterSet},
    records::{SectionDetail, SectionRecord},
    updates::SectionUpdate,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Iterable, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::SimpleExpr,
};

impl FilterColumns for sections::Entity {
    fn search_columns() -> Vec<SimpleExpr> {
        vec![col((sections::Entity, sections::Column::SectionName))]
    }

    fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
        match key {
            FilterKey::Grade => Some(col((sections::Entity, sections::Column::GradeLevel))),
            FilterKey::Section => Some(col((sections::Entity, sections::Column::SectionId))),
            FilterKey::SchoolYear => {
                Some(col((school_years::Entity, school_years::Column::SchoolYear)))
            }
            FilterKey::Status => Some(col((sections::Entity, sections::Column::Status))),
            FilterKey::Search | FilterKey::Role | FilterKey::Day => None,
        }
    }
}

pub struct SectionService;

impl SectionService {
    fn records() -> Select<sections::Entity> {
        sections::Entity::find()
            .select_only()
            .columns(sections::Column::iter())
            .column_as(school_years::Column::SchoolYear, "school_year")
            .join(JoinType::LeftJoin, sections::Relation::SchoolYear.def())
            .order_by_asc(lower((sections::Entity, sections::Column::SectionName)))
            .order_by_asc(sections::Column::SectionId)
    }

    pub async fn list(
        db: &DatabaseConnection,
        filters: &FilterSet,
    ) -> Result<Vec<SectionRecord>, DbErr> {
        Self::records()
            .filter(build_condition::<sections::Entity>(filters))
            .into_model::<SectionRecord>()
            .all(db)
            .await
    }

    pub async fn find(
        db: &DatabaseConnection,
        section_id: i32,
    ) -> Result<Option<SectionRecord>, DbErr> {
        Self::records()
            .filter(sections::Column::SectionId.eq(section_id))
            .into_model::<SectionRecord>()
            .one(db)
            .await
    }

    /// A section together with its current roster
    pub async fn find_detail(
        db: &DatabaseConnection,
        section_id: i32,
    ) -> Result<Option<SectionDetail>, DbErr> {
        let (section, students) = try_join!(
            Self::find(db, section_id),
            StudentService::in_section(db, section_id)
        )?;

        Ok(section.map(|section| SectionDetail { section, students }))
    }

    /// Applies a partial update; `None` when the section does not exist
    pub async fn update(
        db: &DatabaseConnection,
        section_id: i32,
        update: SectionUpdate,
    ) -> Result<Option<SectionRecord>, ServiceError> {
        update.validate()?;

        let Some(section) = sections::Entity::find_by_id(section_id).one(db).await? else {
            return Ok(None);
        };

        let mut active = section.into_active_model();
        Self::apply_update(&mut active, update);

        if active.is_changed() {
            active.update(db).await?;
            log::info!("Updated section {section_id}");
        }

        Ok(Self::find(db, section_id).await?)
    }

    fn apply_update(active: &mut sections::ActiveModel, update: SectionUpdate) {
        assign(&mut active.section_name, update.section_name);
        assign(&mut active.grade_level, update.grade_level);
        assign(&mut active.status, update.status.map(|status| status.to_lowercase()));
        assign(&mut active.max_capacity, update.max_capacity.map(Some));
        assign(&mut active.school_year_id, update.school_year_id);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn section_row(section_id: i32, name: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("section_id", section_id.into()),
            ("section_name", name.into()),
            ("grade_level", "7".into()),
            ("status", "active".into()),
            ("max_capacity", 40.into()),
            ("school_year_id", 1.into()),
            ("school_year", "2024-2025".into()),
        ])
    }

    #[tokio::test]
    async fn test_list_carries_school_year_label() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![section_row(1, "Rizal"), section_row(2, "Mabini")]])
            .into_connection();

        let sections = SectionService::list(&db, &FilterSet::new()).await.unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].school_year.as_deref(), Some("2024-2025"));
        assert_eq!(sections[1].section_name, "Mabini");
    }

    #[tokio::test]
    async fn test_missing_section_has_no_detail() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();

        assert!(SectionService::find_detail(&db, 9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_grade() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let update = SectionUpdate {
            grade_level: Some("11".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            SectionService::update(&db, 1, update).await,
            Err(ServiceError::Invalid(_))
        ));
    }
}
