use crate::{
    entities::{employees, schedules, school_years, sections, subjects},
    error::ServiceError,
    filter::{FilterColumns, build_condition, col},
    services::assign,
};
use models::{
    filter::{FilterKey, FilterSet},
    list_view::Listed,
    records::ScheduleRecord,
    updates::{ScheduleUpdate, check_time_range},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Iterable, JoinType, QueryFilter, QuerySelect, RelationTrait, Select,
    sea_query::{Expr, SimpleExpr},
};

impl FilterColumns for schedules::Entity {
    fn search_columns() -> Vec<SimpleExpr> {
        vec![
            col((sections::Entity, sections::Column::SectionName)),
            col((subjects::Entity, subjects::Column::SubjectName)),
        ]
    }

    fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
        match key {
            FilterKey::Grade => Some(col((sections::Entity, sections::Column::GradeLevel))),
            FilterKey::Section => Some(col((schedules::Entity, schedules::Column::SectionId))),
            FilterKey::SchoolYear => {
                Some(col((school_years::Entity, school_years::Column::SchoolYear)))
            }
            FilterKey::Status => Some(col((schedules::Entity, schedules::Column::Status))),
            FilterKey::Day => Some(col((schedules::Entity, schedules::Column::Day))),
            FilterKey::Search | FilterKey::Role => None,
        }
    }
}

pub struct ScheduleService;

impl ScheduleService {
    fn records() -> Select<schedules::Entity> {
        schedules::Entity::find()
            .select_only()
            .columns(schedules::Column::iter())
            .column_as(subjects::Column::SubjectName, "subject_name")
            .column_as(
                Expr::cust(r#""employees"."firstname" || ' ' || "employees"."lastname""#),
                "teacher_name",
            )
            .column_as(sections::Column::SectionName, "section_name")
            .column_as(sections::Column::GradeLevel, "grade_level")
            .column_as(school_years::Column::SchoolYear, "school_year")
            .join(JoinType::InnerJoin, schedules::Relation::Subject.def())
            .join(JoinType::InnerJoin, schedules::Relation::Section.def())
            .join(JoinType::LeftJoin, schedules::Relation::Teacher.def())
            .join(JoinType::LeftJoin, sections::Relation::SchoolYear.def())
    }

    /// Schedule entries in weekday order, then by start time
    pub async fn list(
        db: &DatabaseConnection,
        filters: &FilterSet,
    ) -> Result<Vec<ScheduleRecord>, DbErr> {
        let mut records = Self::records()
            .filter(build_condition::<schedules::Entity>(filters))
            .into_model::<ScheduleRecord>()
            .all(db)
            .await?;

        records.sort_by(ScheduleRecord::compare);
        Ok(records)
    }

    /// The weekly timetable of one section
    pub async fn for_section(
        db: &DatabaseConnection,
        section_id: i32,
    ) -> Result<Vec<ScheduleRecord>, DbErr> {
        let mut records = Self::records()
            .filter(schedules::Column::SectionId.eq(section_id))
            .filter(schedules::Column::Status.eq("active"))
            .into_model::<ScheduleRecord>()
            .all(db)
            .await?;

        records.sort_by(ScheduleRecord::compare);
        Ok(records)
    }

    pub async fn find(
        db: &DatabaseConnection,
        schedule_id: i32,
    ) -> Result<Option<ScheduleRecord>, DbErr> {
        Self::records()
            .filter(schedules::Column::ScheduleId.eq(schedule_id))
            .into_model::<ScheduleRecord>()
            .one(db)
            .await
    }

    /// Applies a partial update, checking the merged time range
    pub async fn update(
        db: &DatabaseConnection,
        schedule_id: i32,
        update: ScheduleUpdate,
    ) -> Result<Option<ScheduleRecord>, ServiceError> {
        update.validate()?;

        let Some(schedule) = schedules::Entity::find_by_id(schedule_id).one(db).await? else {
            return Ok(None);
        };

        check_time_range(
            update.time_start.unwrap_or(schedule.time_start),
            update.time_end.unwrap_or(schedule.time_end),
        )?;

        let mut active = schedule.into_active_model();
        assign(&mut active.subject_id, update.subject_id);
        assign(&mut active.teacher_id, update.teacher_id.map(Some));
        assign(&mut active.section_id, update.section_id);
        assign(&mut active.day, update.day.map(|day| day.trim().to_string()));
        assign(&mut active.time_start, update.time_start);
        assign(&mut active.time_end, update.time_end);
        assign(&mut active.status, update.status.map(|status| status.to_lowercase()));

        if active.is_changed() {
            active.update(db).await?;
            log::info!("Updated schedule {schedule_id}");
        }

        Ok(Self::find(db, schedule_id).await?)
    }
}
