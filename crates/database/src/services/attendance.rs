use crate::entities::{attendance_records, enrollments, school_years};
use models::attendance::{AttendanceEntry, AttendanceSummary};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, RelationTrait, Select,
};

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: String,
    count: i64,
}

pub struct AttendanceService;

impl AttendanceService {
    /// Attendance rows of one student, joined back to the school year
    fn for_student(student_id: i32, school_year: Option<&str>) -> Select<attendance_records::Entity> {
        attendance_records::Entity::find()
            .join(JoinType::InnerJoin, attendance_records::Relation::Enrollment.def())
            .join(JoinType::LeftJoin, enrollments::Relation::SchoolYear.def())
            .filter(enrollments::Column::StudentId.eq(student_id))
            .apply_if(school_year, |query, label| {
                query.filter(school_years::Column::SchoolYear.eq(label))
            })
    }

    /// Counts of each status code, pivoted into named counters
    pub async fn summary(
        db: &DatabaseConnection,
        student_id: i32,
        school_year: Option<&str>,
    ) -> Result<AttendanceSummary, DbErr> {
        let counts = Self::for_student(student_id, school_year)
            .select_only()
            .column(attendance_records::Column::Status)
            .column_as(attendance_records::Column::AttendanceId.count(), "count")
            .group_by(attendance_records::Column::Status)
            .into_model::<StatusCount>()
            .all(db)
            .await?;

        Ok(AttendanceSummary::from_counts(
            counts.into_iter().map(|row| (row.status, row.count)),
        ))
    }

    /// Day-by-day attendance, oldest first
    pub async fn entries(
        db: &DatabaseConnection,
        student_id: i32,
        school_year: Option<&str>,
    ) -> Result<Vec<AttendanceEntry>, DbErr> {
        Self::for_student(student_id, school_year)
            .select_only()
            .column(attendance_records::Column::Date)
            .column(attendance_records::Column::Status)
            .order_by_asc(attendance_records::Column::Date)
            .into_model::<AttendanceEntry>()
            .all(db)
            .await
    }
}
