use models::{
    list_view::Listed,
    records::{
        EmployeeRecord, ScheduleRecord, SchoolYearRecord, SectionRecord, StudentRecord,
        SubjectRecord,
    },
    updates::{
        EmployeeUpdate, ScheduleUpdate, SchoolYearUpdate, SectionUpdate, StudentUpdate,
        SubjectUpdate,
    },
};
use serde::{Serialize, de::DeserializeOwned};

/// A record type served by a filterable list endpoint with a `PUT /{id}`
pub trait Resource: Listed + DeserializeOwned {
    /// Collection path, e.g. `/students`
    const PATH: &'static str;

    type Update: Serialize;
}

impl Resource for StudentRecord {
    const PATH: &'static str = "/students";
    type Update = StudentUpdate;
}

impl Resource for EmployeeRecord {
    const PATH: &'static str = "/employees";
    type Update = EmployeeUpdate;
}

impl Resource for SectionRecord {
    const PATH: &'static str = "/sections";
    type Update = SectionUpdate;
}

impl Resource for SubjectRecord {
    const PATH: &'static str = "/subjects";
    type Update = SubjectUpdate;
}

impl Resource for ScheduleRecord {
    const PATH: &'static str = "/schedules";
    type Update = ScheduleUpdate;
}

impl Resource for SchoolYearRecord {
    const PATH: &'static str = "/school-years";
    type Update = SchoolYearUpdate;
}
