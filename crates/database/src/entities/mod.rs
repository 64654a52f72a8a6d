pub mod attendance;
pub mod employee;
pub mod enrollment;
pub mod grade;
pub mod school_year;
pub mod schedule;
pub mod section;
pub mod student;
pub mod subject;
pub mod user;

pub use attendance as attendance_records;
pub use employee as employees;
pub use enrollment as enrollments;
pub use grade as grades;
pub use school_year as school_years;
pub use schedule as schedules;
pub use section as sections;
pub use student as students;
pub use subject as subjects;
pub use user as users;
