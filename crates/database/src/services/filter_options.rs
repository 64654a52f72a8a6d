use crate::entities::{school_years, sections};
use models::options::{FilterOptions, SectionOption};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};

pub struct FilterOptionsService;

impl FilterOptionsService {
    /// Dropdown choices for the list pages: school years newest first, the
    /// fixed grade levels and every section
    pub async fn load(db: &DatabaseConnection) -> Result<FilterOptions, DbErr> {
        let school_years = school_years::Entity::find()
            .order_by_desc(school_years::Column::SchoolYearStart)
            .all(db)
            .await?
            .into_iter()
            .map(|year| year.school_year)
            .collect();

        let sections = sections::Entity::find()
            .select_only()
            .column(sections::Column::SectionId)
            .column(sections::Column::SectionName)
            .column(sections::Column::GradeLevel)
            .order_by_asc(sections::Column::SectionName)
            .order_by_asc(sections::Column::SectionId)
            .into_model::<SectionOption>()
            .all(db)
            .await?;

        Ok(FilterOptions::new(school_years, sections))
    }
}
