use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Students are never deleted, only toggled through `student_status`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub student_id: i32,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub current_yr_lvl: String, // "7" through "10"
    pub birthdate: Option<Date>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub home_address: Option<String>,
    pub barangay: Option<String>,
    pub city_municipality: Option<String>,
    pub province: Option<String>,
    pub contact_number: Option<String>,
    pub email_address: Option<String>,
    pub mother_name: Option<String>,
    pub father_name: Option<String>,
    pub parent_address: Option<String>,
    pub father_occupation: Option<String>,
    pub mother_occupation: Option<String>,
    pub annual_hshld_income: Option<String>,
    pub number_of_siblings: Option<i32>,
    pub father_educ_lvl: Option<String>,
    pub mother_educ_lvl: Option<String>,
    pub father_contact_number: Option<String>,
    pub mother_contact_number: Option<String>,
    pub student_status: String,
    pub section_id: Option<i32>,
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::section::Entity",
        from = "Column::SectionId",
        to = "super::section::Column::SectionId"
    )]
    Section,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::UserId"
    )]
    User,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
