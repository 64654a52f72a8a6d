use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{EnumIter, EnumString, IntoEnumIterator};

/// The role a login user acts under
///
/// Stored as a numeric `role_id` on the user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Principal,
    Student,
}

impl Role {
    pub fn id(self) -> i32 {
        match self {
            Self::Principal => 1,
            Self::Student => 2,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::iter().find(|role| role.id() == id)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::Student => "student",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Position names an employee can hold
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum StaffRole {
    #[serde(rename = "Principal")]
    #[strum(serialize = "Principal")]
    Principal,
    #[serde(rename = "Registrar")]
    #[strum(serialize = "Registrar")]
    Registrar,
    #[serde(rename = "Academic Coordinator")]
    #[strum(serialize = "Academic Coordinator")]
    AcademicCoordinator,
    #[serde(rename = "Grade Level Coordinator")]
    #[strum(serialize = "Grade Level Coordinator")]
    GradeLevelCoordinator,
    #[serde(rename = "Class Adviser")]
    #[strum(serialize = "Class Adviser")]
    ClassAdviser,
    #[serde(rename = "Subject Teacher")]
    #[strum(serialize = "Subject Teacher")]
    SubjectTeacher,
}

impl StaffRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Principal => "Principal",
            Self::Registrar => "Registrar",
            Self::AcademicCoordinator => "Academic Coordinator",
            Self::GradeLevelCoordinator => "Grade Level Coordinator",
            Self::ClassAdviser => "Class Adviser",
            Self::SubjectTeacher => "Subject Teacher",
        }
    }
}

impl Display for StaffRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// Status shared by students, employees, sections, subjects, schedules and
/// school years
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecordStatus {
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
