use crate::{
    filter::{Field, FilterKey, Filterable},
    list_view::Listed,
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A student as returned by the list and detail endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StudentRecord {
    pub student_id: i32,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub current_yr_lvl: String,
    pub birthdate: Option<NaiveDate>,
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
    pub section_name: Option<String>,
    pub school_year: Option<String>,
}

impl StudentRecord {
    /// "First M. Last", the way names appear in every list
    pub fn display_name(&self) -> String {
        match self
            .middlename
            .as_deref()
            .and_then(|middle| middle.chars().next())
        {
            Some(initial) => format!("{} {initial}. {}", self.firstname, self.lastname),
            None => format!("{} {}", self.firstname, self.lastname),
        }
    }
}

impl Filterable for StudentRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.lastname.as_str(), self.firstname.as_str()]
    }

    fn field(&self, key: FilterKey) -> Option<Field<'_>> {
        match key {
            FilterKey::Grade => Some(Field::Text(Some(self.current_yr_lvl.as_str()))),
            FilterKey::Section => Some(Field::Number(self.section_id.map(i64::from))),
            FilterKey::SchoolYear => Some(Field::Text(self.school_year.as_deref())),
            FilterKey::Status => Some(Field::Text(Some(self.student_status.as_str()))),
            FilterKey::Search | FilterKey::Role | FilterKey::Day => None,
        }
    }
}

impl Listed for StudentRecord {
    fn id(&self) -> i32 {
        self.student_id
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_names(
            (self.lastname.as_str(), self.firstname.as_str(), self.student_id),
            (other.lastname.as_str(), other.firstname.as_str(), other.student_id),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmployeeRecord {
    pub employee_id: i32,
    pub lastname: String,
    pub firstname: String,
    pub middlename: Option<String>,
    pub role: String,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub year_started: Option<i32>,
}

impl Filterable for EmployeeRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.lastname.as_str(), self.firstname.as_str()]
    }

    fn field(&self, key: FilterKey) -> Option<Field<'_>> {
        match key {
            FilterKey::Role => Some(Field::Text(Some(self.role.as_str()))),
            FilterKey::Status => Some(Field::Text(Some(self.status.as_str()))),
            _ => None,
        }
    }
}

impl Listed for EmployeeRecord {
    fn id(&self) -> i32 {
        self.employee_id
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_names(
            (self.lastname.as_str(), self.firstname.as_str(), self.employee_id),
            (other.lastname.as_str(), other.firstname.as_str(), other.employee_id),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionRecord {
    pub section_id: i32,
    pub section_name: String,
    pub grade_level: String,
    pub status: String,
    pub max_capacity: Option<i32>,
    pub school_year_id: i32,
    pub school_year: Option<String>,
}

impl Filterable for SectionRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.section_name.as_str()]
    }

    fn field(&self, key: FilterKey) -> Option<Field<'_>> {
        match key {
            FilterKey::Grade => Some(Field::Text(Some(self.grade_level.as_str()))),
            FilterKey::Section => Some(Field::Number(Some(i64::from(self.section_id)))),
            FilterKey::SchoolYear => Some(Field::Text(self.school_year.as_deref())),
            FilterKey::Status => Some(Field::Text(Some(self.status.as_str()))),
            FilterKey::Search | FilterKey::Role | FilterKey::Day => None,
        }
    }
}

impl Listed for SectionRecord {
    fn id(&self) -> i32 {
        self.section_id
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_label(
            (self.section_name.as_str(), self.section_id),
            (other.section_name.as_str(), other.section_id),
        )
    }
}

/// A section together with the students currently assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionDetail {
    #[serde(flatten)]
    pub section: SectionRecord,
    pub students: Vec<StudentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubjectRecord {
    pub subject_id: i32,
    pub subject_name: String,
    pub grade_level: String,
    pub grading_criteria: Option<String>,
    pub description: Option<String>,
    pub school_year_id: i32,
    pub school_year: Option<String>,
    pub status: String,
}

impl Filterable for SubjectRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.subject_name.as_str()]
    }

    fn field(&self, key: FilterKey) -> Option<Field<'_>> {
        match key {
            FilterKey::Grade => Some(Field::Text(Some(self.grade_level.as_str()))),
            FilterKey::SchoolYear => Some(Field::Text(self.school_year.as_deref())),
            FilterKey::Status => Some(Field::Text(Some(self.status.as_str()))),
            _ => None,
        }
    }
}

impl Listed for SubjectRecord {
    fn id(&self) -> i32 {
        self.subject_id
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_label(
            (self.subject_name.as_str(), self.subject_id),
            (other.subject_name.as_str(), other.subject_id),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScheduleRecord {
    pub schedule_id: i32,
    pub subject_id: i32,
    pub subject_name: String,
    pub teacher_id: Option<i32>,
    pub teacher_name: Option<String>,
    pub section_id: i32,
    pub section_name: String,
    pub grade_level: String,
    pub school_year: Option<String>,
    pub day: String,
    pub time_start: NaiveTime,
    pub time_end: NaiveTime,
    pub status: String,
}

impl ScheduleRecord {
    /// Position of `day` in the week, Monday first; unrecognized days sort last
    pub fn weekday_index(&self) -> u32 {
        self.day
            .trim()
            .parse::<Weekday>()
            .map(|day| day.num_days_from_monday())
            .unwrap_or(7)
    }
}

impl Filterable for ScheduleRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.section_name.as_str(), self.subject_name.as_str()]
    }

    fn field(&self, key: FilterKey) -> Option<Field<'_>> {
        match key {
            FilterKey::Grade => Some(Field::Text(Some(self.grade_level.as_str()))),
            FilterKey::Section => Some(Field::Number(Some(i64::from(self.section_id)))),
            FilterKey::SchoolYear => Some(Field::Text(self.school_year.as_deref())),
            FilterKey::Status => Some(Field::Text(Some(self.status.as_str()))),
            FilterKey::Day => Some(Field::Text(Some(self.day.as_str()))),
            FilterKey::Search | FilterKey::Role => None,
        }
    }
}

impl Listed for ScheduleRecord {
    fn id(&self) -> i32 {
        self.schedule_id
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.weekday_index()
            .cmp(&other.weekday_index())
            .then(self.time_start.cmp(&other.time_start))
            .then(self.schedule_id.cmp(&other.schedule_id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SchoolYearRecord {
    pub school_year_id: i32,
    pub school_year: String,
    pub school_year_start: NaiveDate,
    pub school_year_end: NaiveDate,
    pub enrollment_start: Option<NaiveDate>,
    pub enrollment_end: Option<NaiveDate>,
    pub status: String,
}

impl SchoolYearRecord {
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

impl Filterable for SchoolYearRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.school_year.as_str()]
    }

    fn field(&self, key: FilterKey) -> Option<Field<'_>> {
        match key {
            FilterKey::SchoolYear => Some(Field::Text(Some(self.school_year.as_str()))),
            FilterKey::Status => Some(Field::Text(Some(self.status.as_str()))),
            _ => None,
        }
    }
}

impl Listed for SchoolYearRecord {
    fn id(&self) -> i32 {
        self.school_year_id
    }

    fn compare(&self, other: &Self) -> Ordering {
        compare_label(
            (self.school_year.as_str(), self.school_year_id),
            (other.school_year.as_str(), other.school_year_id),
        )
    }
}

fn compare_names(a: (&str, &str, i32), b: (&str, &str, i32)) -> Ordering {
    a.0.to_lowercase()
        .cmp(&b.0.to_lowercase())
        .then_with(|| a.1.to_lowercase().cmp(&b.1.to_lowercase()))
        .then(a.2.cmp(&b.2))
}

fn compare_label(a: (&str, i32), b: (&str, i32)) -> Ordering {
    a.0.to_lowercase()
        .cmp(&b.0.to_lowercase())
        .then(a.1.cmp(&b.1))
}
