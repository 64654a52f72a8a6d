use sea_orm_migration::prelude::*;

use crate::m20250801_create_school_tables::{
    Attendance, Enrollments, Grades, Schedules, Sections, Students, Subjects,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Name search and the alphabetical listing both go through LOWER()
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_students_lower_name \
                 ON students (LOWER(lastname), LOWER(firstname))",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_section_id")
                    .table(Students::Table)
                    .col(Students::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sections_school_year_id")
                    .table(Sections::Table)
                    .col(Sections::SchoolYearId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subjects_school_year_id")
                    .table(Subjects::Table)
                    .col(Subjects::SchoolYearId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_section_id")
                    .table(Schedules::Table)
                    .col(Schedules::SectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        // One grade row per subject per enrollment
        manager
            .create_index(
                Index::create()
                    .name("idx_grades_enrollment_subject")
                    .table(Grades::Table)
                    .col(Grades::EnrollmentId)
                    .col(Grades::SubjectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // One attendance mark per day per enrollment
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_enrollment_date")
                    .table(Attendance::Table)
                    .col(Attendance::EnrollmentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_attendance_enrollment_date")
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_grades_enrollment_subject")
                    .table(Grades::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_schedules_section_id")
                    .table(Schedules::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_subjects_school_year_id")
                    .table(Subjects::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_sections_school_year_id")
                    .table(Sections::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_students_section_id")
                    .table(Students::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_students_lower_name")
            .await?;

        Ok(())
    }
}
