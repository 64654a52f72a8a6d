use crate::{
    entities::{school_years, sections, students},
    error::ServiceError,
    filter::{FilterColumns, build_condition, col, lower},
    services::assign,
};
use models::{
    filter::{FilterKey, FilterSet},
    records::StudentRecord,
    updates::StudentUpdate,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Iterable, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    sea_query::SimpleExpr,
};

impl FilterColumns for students::Entity {
    fn search_columns() -> Vec<SimpleExpr> {
        vec![
            col((students::Entity, students::Column::Lastname)),
            col((students::Entity, students::Column::Firstname)),
        ]
    }

    fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
        match key {
            FilterKey::Grade => Some(col((students::Entity, students::Column::CurrentYrLvl))),
            FilterKey::Section => Some(col((students::Entity, students::Column::SectionId))),
            FilterKey::SchoolYear => {
                Some(col((school_years::Entity, school_years::Column::SchoolYear)))
            }
            FilterKey::Status => Some(col((students::Entity, students::Column::StudentStatus))),
            FilterKey::Search | FilterKey::Role | FilterKey::Day => None,
        }
    }
}

pub struct StudentService;

impl StudentService {
    /// Students joined with their section name and the section's school year
    fn records() -> Select<students::Entity> {
        students::Entity::find()
            .select_only()
            .columns(students::Column::iter())
            .column_as(sections::Column::SectionName, "section_name")
            .column_as(school_years::Column::SchoolYear, "school_year")
            .join(JoinType::LeftJoin, students::Relation::Section.def())
            .join(JoinType::LeftJoin, sections::Relation::SchoolYear.def())
            .order_by_asc(lower((students::Entity, students::Column::Lastname)))
            .order_by_asc(lower((students::Entity, students::Column::Firstname)))
            .order_by_asc(students::Column::StudentId)
    }

    pub async fn list(
        db: &DatabaseConnection,
        filters: &FilterSet,
    ) -> Result<Vec<StudentRecord>, DbErr> {
        Self::records()
            .filter(build_condition::<students::Entity>(filters))
            .into_model::<StudentRecord>()
            .all(db)
            .await
    }

    /// Students currently assigned to a section
    pub async fn in_section(
        db: &DatabaseConnection,
        section_id: i32,
    ) -> Result<Vec<StudentRecord>, DbErr> {
        Self::records()
            .filter(students::Column::SectionId.eq(section_id))
            .into_model::<StudentRecord>()
            .all(db)
            .await
    }

    pub async fn find(
        db: &DatabaseConnection,
        student_id: i32,
    ) -> Result<Option<StudentRecord>, DbErr> {
        Self::records()
            .filter(students::Column::StudentId.eq(student_id))
            .into_model::<StudentRecord>()
            .one(db)
            .await
    }

    /// The student record linked to a login user
    pub async fn find_by_user(
        db: &DatabaseConnection,
        user_id: i32,
    ) -> Result<Option<StudentRecord>, DbErr> {
        Self::records()
            .filter(students::Column::UserId.eq(user_id))
            .into_model::<StudentRecord>()
            .one(db)
            .await
    }

    pub async fn exists(db: &DatabaseConnection, student_id: i32) -> Result<bool, DbErr> {
        Ok(students::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .is_some())
    }

    /// Applies a partial update; `None` when the student does not exist
    pub async fn update(
        db: &DatabaseConnection,
        student_id: i32,
        update: StudentUpdate,
    ) -> Result<Option<StudentRecord>, ServiceError> {
        update.validate()?;

        let Some(student) = students::Entity::find_by_id(student_id).one(db).await? else {
            return Ok(None);
        };

        let mut active = student.into_active_model();
        Self::apply_update(&mut active, update);

        if active.is_changed() {
            active.update(db).await?;
            log::info!("Updated student {student_id}");
        }

        Ok(Self::find(db, student_id).await?)
    }

    fn apply_update(active: &mut students::ActiveModel, update: StudentUpdate) {
        assign(&mut active.lastname, update.lastname);
        assign(&mut active.firstname, update.firstname);
        assign(&mut active.middlename, update.middlename.map(Some));
        assign(&mut active.current_yr_lvl, update.current_yr_lvl);
        assign(&mut active.birthdate, update.birthdate.map(Some));
        assign(&mut active.gender, update.gender.map(Some));
        assign(&mut active.age, update.age.map(Some));
        assign(&mut active.home_address, update.home_address.map(Some));
        assign(&mut active.barangay, update.barangay.map(Some));
        assign(&mut active.city_municipality, update.city_municipality.map(Some));
        assign(&mut active.province, update.province.map(Some));
        assign(&mut active.contact_number, update.contact_number.map(Some));
        assign(&mut active.email_address, update.email_address.map(Some));
        assign(&mut active.mother_name, update.mother_name.map(Some));
        assign(&mut active.father_name, update.father_name.map(Some));
        assign(&mut active.parent_address, update.parent_address.map(Some));
        assign(&mut active.father_occupation, update.father_occupation.map(Some));
        assign(&mut active.mother_occupation, update.mother_occupation.map(Some));
        assign(&mut active.annual_hshld_income, update.annual_hshld_income.map(Some));
        assign(&mut active.number_of_siblings, update.number_of_siblings.map(Some));
        assign(&mut active.father_educ_lvl, update.father_educ_lvl.map(Some));
        assign(&mut active.mother_educ_lvl, update.mother_educ_lvl.map(Some));
        assign(
            &mut active.father_contact_number,
            update.father_contact_number.map(Some),
        );
        assign(
            &mut active.mother_contact_number,
            update.mother_contact_number.map(Some),
        );
        assign(
            &mut active.student_status,
            update.student_status.map(|status| status.to_lowercase()),
        );
        assign(&mut active.section_id, update.section_id.map(Some));
    }
}
