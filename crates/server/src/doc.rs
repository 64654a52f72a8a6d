use crate::routes::{
    attendance, auth, employee, filters, health, me, root, schedule, school_year, section,
    student, subject,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::login,
        student::list_students,
        student::get_student_details,
        student::update_student,
        student::get_student_grades,
        attendance::get_attendance,
        employee::list_employees,
        employee::get_employee,
        employee::update_employee,
        section::list_sections,
        section::get_section,
        section::update_section,
        subject::list_subjects,
        subject::get_subject,
        subject::update_subject,
        schedule::list_schedules,
        schedule::get_schedule,
        schedule::update_schedule,
        school_year::list_school_years,
        school_year::get_active_school_year,
        school_year::get_school_year,
        school_year::update_school_year,
        filters::get_filter_options,
        me::get_profile,
        me::get_grades,
        me::get_attendance,
        me::get_schedule,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "Login and session tokens"),
        (name = "Students", description = "Student records, grades and attendance"),
        (name = "Employees", description = "Staff records"),
        (name = "Sections", description = "Sections and their rosters"),
        (name = "Subjects", description = "Subjects offered per grade level"),
        (name = "Schedules", description = "Weekly class schedules"),
        (name = "School Years", description = "School year calendar"),
        (name = "Filters", description = "Filter dropdown options"),
        (name = "Self Service", description = "Views for a logged-in student"),
    ),
    info(
        title = "School Records API",
        version = "1.0.0",
        description = "Student, staff and class records of a junior high school",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
