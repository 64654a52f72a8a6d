//! Partial-update bodies for the `PUT` endpoints
//!
//! Every field is optional and an absent field leaves the stored column
//! untouched. [`validate`](StudentUpdate::validate) only checks the fields
//! that are present.

use crate::{
    options::GRADE_LEVELS,
    roles::{RecordStatus, StaffRole},
};
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error("`{field}` has an unsupported value `{value}`")]
    InvalidValue { field: &'static str, value: String },
    #[error("`{field}` cannot be blank")]
    Blank { field: &'static str },
    #[error("start time {start} must be before end time {end}")]
    TimeRange { start: NaiveTime, end: NaiveTime },
    #[error("{start_field} {start} must not be after {end_field} {end}")]
    DateRange {
        start_field: &'static str,
        start: NaiveDate,
        end_field: &'static str,
        end: NaiveDate,
    },
}

fn check_status(field: &'static str, status: Option<&str>) -> Result<(), UpdateError> {
    match status {
        Some(value) if value.parse::<RecordStatus>().is_err() => Err(UpdateError::InvalidValue {
            field,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

fn check_grade(field: &'static str, grade: Option<&str>) -> Result<(), UpdateError> {
    match grade {
        Some(value) if !GRADE_LEVELS.contains(&value) => Err(UpdateError::InvalidValue {
            field,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

fn check_not_blank(field: &'static str, value: Option<&str>) -> Result<(), UpdateError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(UpdateError::Blank { field }),
        _ => Ok(()),
    }
}

/// Rejects a time range that does not move forward
pub fn check_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), UpdateError> {
    if start < end {
        Ok(())
    } else {
        Err(UpdateError::TimeRange { start, end })
    }
}

fn check_date_range(
    (start_field, start): (&'static str, Option<NaiveDate>),
    (end_field, end): (&'static str, Option<NaiveDate>),
) -> Result<(), UpdateError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(UpdateError::DateRange {
            start_field,
            start,
            end_field,
            end,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct StudentUpdate {
    pub lastname: Option<String>,
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub current_yr_lvl: Option<String>,
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
    pub student_status: Option<String>,
    pub section_id: Option<i32>,
}

impl StudentUpdate {
    pub fn validate(&self) -> Result<(), UpdateError> {
        check_not_blank("lastname", self.lastname.as_deref())?;
        check_not_blank("firstname", self.firstname.as_deref())?;
        check_grade("current_yr_lvl", self.current_yr_lvl.as_deref())?;
        check_status("student_status", self.student_status.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct EmployeeUpdate {
    pub lastname: Option<String>,
    pub firstname: Option<String>,
    pub middlename: Option<String>,
    pub role: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub year_started: Option<i32>,
}

impl EmployeeUpdate {
    pub fn validate(&self) -> Result<(), UpdateError> {
        check_not_blank("lastname", self.lastname.as_deref())?;
        check_not_blank("firstname", self.firstname.as_deref())?;

        if let Some(role) = self.role.as_deref()
            && role.parse::<StaffRole>().is_err()
        {
            return Err(UpdateError::InvalidValue {
                field: "role",
                value: role.to_string(),
            });
        }

        check_status("status", self.status.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SectionUpdate {
    pub section_name: Option<String>,
    pub grade_level: Option<String>,
    pub status: Option<String>,
    pub max_capacity: Option<i32>,
    pub school_year_id: Option<i32>,
}

impl SectionUpdate {
    pub fn validate(&self) -> Result<(), UpdateError> {
        check_not_blank("section_name", self.section_name.as_deref())?;
        check_grade("grade_level", self.grade_level.as_deref())?;

        if let Some(capacity) = self.max_capacity
            && capacity < 0
        {
            return Err(UpdateError::InvalidValue {
                field: "max_capacity",
                value: capacity.to_string(),
            });
        }

        check_status("status", self.status.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SubjectUpdate {
    pub subject_name: Option<String>,
    pub grade_level: Option<String>,
    pub grading_criteria: Option<String>,
    pub description: Option<String>,
    pub school_year_id: Option<i32>,
    pub status: Option<String>,
}

impl SubjectUpdate {
    pub fn validate(&self) -> Result<(), UpdateError> {
        check_not_blank("subject_name", self.subject_name.as_deref())?;
        check_grade("grade_level", self.grade_level.as_deref())?;
        check_status("status", self.status.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct ScheduleUpdate {
    pub subject_id: Option<i32>,
    pub teacher_id: Option<i32>,
    pub section_id: Option<i32>,
    pub day: Option<String>,
    pub time_start: Option<NaiveTime>,
    pub time_end: Option<NaiveTime>,
    pub status: Option<String>,
}

impl ScheduleUpdate {
    /// Checks the fields on their own; the time range is checked again
    /// against the stored row once the update has been merged
    pub fn validate(&self) -> Result<(), UpdateError> {
        if let Some(day) = self.day.as_deref()
            && day.trim().parse::<Weekday>().is_err()
        {
            return Err(UpdateError::InvalidValue {
                field: "day",
                value: day.to_string(),
            });
        }

        if let (Some(start), Some(end)) = (self.time_start, self.time_end) {
            check_time_range(start, end)?;
        }

        check_status("status", self.status.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(default)]
pub struct SchoolYearUpdate {
    pub school_year: Option<String>,
    pub school_year_start: Option<NaiveDate>,
    pub school_year_end: Option<NaiveDate>,
    pub enrollment_start: Option<NaiveDate>,
    pub enrollment_end: Option<NaiveDate>,
    pub status: Option<String>,
}

impl SchoolYearUpdate {
    pub fn validate(&self) -> Result<(), UpdateError> {
        check_not_blank("school_year", self.school_year.as_deref())?;
        check_date_range(
            ("school_year_start", self.school_year_start),
            ("school_year_end", self.school_year_end),
        )?;
        check_date_range(
            ("enrollment_start", self.enrollment_start),
            ("enrollment_end", self.enrollment_end),
        )?;
        check_status("status", self.status.as_deref())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_absent_fields_deserialize_as_none() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"status":"inactive"}"#).unwrap();
        assert_eq!(
            update,
            EmployeeUpdate {
                status: Some("inactive".to_string()),
                ..Default::default()
            }
        );
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_unknown_staff_role_is_rejected() {
        let update = EmployeeUpdate {
            role: Some("Janitor".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update.validate(),
            Err(UpdateError::InvalidValue {
                field: "role",
                value: "Janitor".to_string()
            })
        );
    }

    #[test]
    fn test_student_grade_and_status_are_checked() {
        let bad_grade = StudentUpdate {
            current_yr_lvl: Some("12".to_string()),
            ..Default::default()
        };
        assert!(bad_grade.validate().is_err());

        let toggle = StudentUpdate {
            student_status: Some("Inactive".to_string()),
            ..Default::default()
        };
        assert!(toggle.validate().is_ok());

        let blank = StudentUpdate {
            lastname: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.validate(), Err(UpdateError::Blank { field: "lastname" }));
    }

    #[test]
    fn test_schedule_time_range_must_move_forward() {
        let update = ScheduleUpdate {
            time_start: NaiveTime::from_hms_opt(10, 0, 0),
            time_end: NaiveTime::from_hms_opt(9, 0, 0),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(UpdateError::TimeRange { .. })));

        let bad_day = ScheduleUpdate {
            day: Some("Funday".to_string()),
            ..Default::default()
        };
        assert!(bad_day.validate().is_err());
    }

    #[test]
    fn test_school_year_dates_are_ordered() {
        let update = SchoolYearUpdate {
            enrollment_start: NaiveDate::from_ymd_opt(2024, 6, 30),
            enrollment_end: NaiveDate::from_ymd_opt(2024, 6, 1),
            ..Default::default()
        };
        assert!(matches!(update.validate(), Err(UpdateError::DateRange { .. })));
    }
}
