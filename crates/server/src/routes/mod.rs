use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub mod attendance;
pub mod auth;
pub mod employee;
pub mod filters;
pub mod health;
pub mod me;
pub mod root;
pub mod schedule;
pub mod school_year;
pub mod section;
pub mod student;
pub mod subject;

/// Every API route, without the docs UI and outer layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/login", post(auth::login))
        .route("/students", get(student::list_students))
        .route("/students/{id}", put(student::update_student))
        .route("/students/{id}/details", get(student::get_student_details))
        .route("/students/{id}/grades", get(student::get_student_grades))
        .route("/attendance/{student_id}", get(attendance::get_attendance))
        .route("/employees", get(employee::list_employees))
        .route(
            "/employees/{id}",
            get(employee::get_employee).put(employee::update_employee),
        )
        .route("/sections", get(section::list_sections))
        .route(
            "/sections/{id}",
            get(section::get_section).put(section::update_section),
        )
        .route("/subjects", get(subject::list_subjects))
        .route(
            "/subjects/{id}",
            get(subject::get_subject).put(subject::update_subject),
        )
        .route("/schedules", get(schedule::list_schedules))
        .route(
            "/schedules/{id}",
            get(schedule::get_schedule).put(schedule::update_schedule),
        )
        .route("/school-years", get(school_year::list_school_years))
        .route(
            "/school-years/active",
            get(school_year::get_active_school_year),
        )
        .route(
            "/school-years/{id}",
            get(school_year::get_school_year).put(school_year::update_school_year),
        )
        .route("/filters", get(filters::get_filter_options))
        .route("/me/profile", get(me::get_profile))
        .route("/me/grades", get(me::get_grades))
        .route("/me/attendance", get(me::get_attendance))
        .route("/me/schedule", get(me::get_schedule))
        .with_state(state)
}
