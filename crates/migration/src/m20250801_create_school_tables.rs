use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SchoolYears::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolYears::SchoolYearId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SchoolYears::SchoolYear).string().not_null())
                    .col(ColumnDef::new(SchoolYears::SchoolYearStart).date().not_null())
                    .col(ColumnDef::new(SchoolYears::SchoolYearEnd).date().not_null())
                    .col(ColumnDef::new(SchoolYears::EnrollmentStart).date())
                    .col(ColumnDef::new(SchoolYears::EnrollmentEnd).date())
                    .col(
                        ColumnDef::new(SchoolYears::Status)
                            .string()
                            .not_null()
                            .default("inactive"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::UserId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::RoleId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sections::SectionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sections::SectionName).string().not_null())
                    .col(ColumnDef::new(Sections::GradeLevel).string().not_null())
                    .col(
                        ColumnDef::new(Sections::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Sections::MaxCapacity).integer())
                    .col(ColumnDef::new(Sections::SchoolYearId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-sections-school_year_id")
                            .from(Sections::Table, Sections::SchoolYearId)
                            .to(SchoolYears::Table, SchoolYears::SchoolYearId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Lastname).string().not_null())
                    .col(ColumnDef::new(Students::Firstname).string().not_null())
                    .col(ColumnDef::new(Students::Middlename).string())
                    .col(ColumnDef::new(Students::CurrentYrLvl).string().not_null())
                    .col(ColumnDef::new(Students::Birthdate).date())
                    .col(ColumnDef::new(Students::Gender).string())
                    .col(ColumnDef::new(Students::Age).integer())
                    .col(ColumnDef::new(Students::HomeAddress).string())
                    .col(ColumnDef::new(Students::Barangay).string())
                    .col(ColumnDef::new(Students::CityMunicipality).string())
                    .col(ColumnDef::new(Students::Province).string())
                    .col(ColumnDef::new(Students::ContactNumber).string())
                    .col(ColumnDef::new(Students::EmailAddress).string())
                    .col(ColumnDef::new(Students::MotherName).string())
                    .col(ColumnDef::new(Students::FatherName).string())
                    .col(ColumnDef::new(Students::ParentAddress).string())
                    .col(ColumnDef::new(Students::FatherOccupation).string())
                    .col(ColumnDef::new(Students::MotherOccupation).string())
                    .col(ColumnDef::new(Students::AnnualHshldIncome).string())
                    .col(ColumnDef::new(Students::NumberOfSiblings).integer())
                    .col(ColumnDef::new(Students::FatherEducLvl).string())
                    .col(ColumnDef::new(Students::MotherEducLvl).string())
                    .col(ColumnDef::new(Students::FatherContactNumber).string())
                    .col(ColumnDef::new(Students::MotherContactNumber).string())
                    .col(
                        ColumnDef::new(Students::StudentStatus)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Students::SectionId).integer())
                    .col(ColumnDef::new(Students::UserId).integer().unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-section_id")
                            .from(Students::Table, Students::SectionId)
                            .to(Sections::Table, Sections::SectionId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-students-user_id")
                            .from(Students::Table, Students::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::EmployeeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::Lastname).string().not_null())
                    .col(ColumnDef::new(Employees::Firstname).string().not_null())
                    .col(ColumnDef::new(Employees::Middlename).string())
                    .col(ColumnDef::new(Employees::Role).string().not_null())
                    .col(ColumnDef::new(Employees::ContactNumber).string())
                    .col(ColumnDef::new(Employees::Address).string())
                    .col(
                        ColumnDef::new(Employees::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Employees::YearStarted).integer())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subjects::SubjectId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subjects::SubjectName).string().not_null())
                    .col(ColumnDef::new(Subjects::GradeLevel).string().not_null())
                    .col(ColumnDef::new(Subjects::GradingCriteria).text())
                    .col(ColumnDef::new(Subjects::Description).text())
                    .col(ColumnDef::new(Subjects::SchoolYearId).integer().not_null())
                    .col(
                        ColumnDef::new(Subjects::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subjects-school_year_id")
                            .from(Subjects::Table, Subjects::SchoolYearId)
                            .to(SchoolYears::Table, SchoolYears::SchoolYearId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::ScheduleId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::SubjectId).integer().not_null())
                    .col(ColumnDef::new(Schedules::TeacherId).integer())
                    .col(ColumnDef::new(Schedules::SectionId).integer().not_null())
                    .col(ColumnDef::new(Schedules::Day).string().not_null())
                    .col(ColumnDef::new(Schedules::TimeStart).time().not_null())
                    .col(ColumnDef::new(Schedules::TimeEnd).time().not_null())
                    .col(
                        ColumnDef::new(Schedules::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .check(Expr::col(Schedules::TimeStart).lt(Expr::col(Schedules::TimeEnd)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-subject_id")
                            .from(Schedules::Table, Schedules::SubjectId)
                            .to(Subjects::Table, Subjects::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-teacher_id")
                            .from(Schedules::Table, Schedules::TeacherId)
                            .to(Employees::Table, Employees::EmployeeId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-section_id")
                            .from(Schedules::Table, Schedules::SectionId)
                            .to(Sections::Table, Sections::SectionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::EnrollmentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollments::StudentId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::SectionId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::SchoolYearId).integer().not_null())
                    .col(ColumnDef::new(Enrollments::EnrollmentDate).date())
                    .col(
                        ColumnDef::new(Enrollments::EnrollmentStatus)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-student_id")
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::StudentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-section_id")
                            .from(Enrollments::Table, Enrollments::SectionId)
                            .to(Sections::Table, Sections::SectionId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-enrollments-school_year_id")
                            .from(Enrollments::Table, Enrollments::SchoolYearId)
                            .to(SchoolYears::Table, SchoolYears::SchoolYearId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grades::GradeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grades::EnrollmentId).integer().not_null())
                    .col(ColumnDef::new(Grades::SubjectId).integer().not_null())
                    .col(ColumnDef::new(Grades::Q1Grade).double())
                    .col(ColumnDef::new(Grades::Q2Grade).double())
                    .col(ColumnDef::new(Grades::Q3Grade).double())
                    .col(ColumnDef::new(Grades::Q4Grade).double())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grades-enrollment_id")
                            .from(Grades::Table, Grades::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::EnrollmentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-grades-subject_id")
                            .from(Grades::Table, Grades::SubjectId)
                            .to(Subjects::Table, Subjects::SubjectId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::AttendanceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::EnrollmentId).integer().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string_len(1).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attendance-enrollment_id")
                            .from(Attendance::Table, Attendance::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::EnrollmentId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Sections::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SchoolYears::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum SchoolYears {
    Table,
    SchoolYearId,
    SchoolYear,
    SchoolYearStart,
    SchoolYearEnd,
    EnrollmentStart,
    EnrollmentEnd,
    Status,
}

#[derive(Iden)]
pub(crate) enum Users {
    Table,
    UserId,
    Username,
    PasswordHash,
    RoleId,
}

#[derive(Iden)]
pub(crate) enum Sections {
    Table,
    SectionId,
    SectionName,
    GradeLevel,
    Status,
    MaxCapacity,
    SchoolYearId,
}

#[derive(Iden)]
pub(crate) enum Students {
    Table,
    StudentId,
    Lastname,
    Firstname,
    Middlename,
    CurrentYrLvl,
    Birthdate,
    Gender,
    Age,
    HomeAddress,
    Barangay,
    CityMunicipality,
    Province,
    ContactNumber,
    EmailAddress,
    MotherName,
    FatherName,
    ParentAddress,
    FatherOccupation,
    MotherOccupation,
    AnnualHshldIncome,
    NumberOfSiblings,
    FatherEducLvl,
    MotherEducLvl,
    FatherContactNumber,
    MotherContactNumber,
    StudentStatus,
    SectionId,
    UserId,
}

#[derive(Iden)]
pub(crate) enum Employees {
    Table,
    EmployeeId,
    Lastname,
    Firstname,
    Middlename,
    Role,
    ContactNumber,
    Address,
    Status,
    YearStarted,
}

#[derive(Iden)]
pub(crate) enum Subjects {
    Table,
    SubjectId,
    SubjectName,
    GradeLevel,
    GradingCriteria,
    Description,
    SchoolYearId,
    Status,
}

#[derive(Iden)]
pub(crate) enum Schedules {
    Table,
    ScheduleId,
    SubjectId,
    TeacherId,
    SectionId,
    Day,
    TimeStart,
    TimeEnd,
    Status,
}

#[derive(Iden)]
pub(crate) enum Enrollments {
    Table,
    EnrollmentId,
    StudentId,
    SectionId,
    SchoolYearId,
    EnrollmentDate,
    EnrollmentStatus,
}

#[derive(Iden)]
pub(crate) enum Grades {
    Table,
    GradeId,
    EnrollmentId,
    SubjectId,
    Q1Grade,
    Q2Grade,
    Q3Grade,
    Q4Grade,
}

#[derive(Iden)]
pub(crate) enum Attendance {
    Table,
    AttendanceId,
    EnrollmentId,
    Date,
    Status,
}
