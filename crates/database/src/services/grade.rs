use crate::entities::{enrollments, grades, school_years, sections, subjects};
use models::grades::{GradeRecord, QuarterGrades};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, RelationTrait,
};

#[derive(Debug, FromQueryResult)]
struct GradeRow {
    subject_id: i32,
    subject_name: String,
    q1_grade: Option<f64>,
    q2_grade: Option<f64>,
    q3_grade: Option<f64>,
    q4_grade: Option<f64>,
    grade_level: Option<String>,
    school_year: Option<String>,
}

impl From<GradeRow> for GradeRecord {
    fn from(row: GradeRow) -> Self {
        GradeRecord::new(
            row.subject_id,
            row.subject_name,
            QuarterGrades::new(row.q1_grade, row.q2_grade, row.q3_grade, row.q4_grade),
            row.grade_level,
            row.school_year,
        )
    }
}

pub struct GradeService;

impl GradeService {
    /// Every graded subject of a student, optionally scoped to one school year
    ///
    /// An empty list means the student has no grades yet; whether the student
    /// exists at all is for the caller to check.
    pub async fn for_student(
        db: &DatabaseConnection,
        student_id: i32,
        school_year: Option<&str>,
    ) -> Result<Vec<GradeRecord>, DbErr> {
        let rows = grades::Entity::find()
            .select_only()
            .column(grades::Column::SubjectId)
            .column(subjects::Column::SubjectName)
            .column(grades::Column::Q1Grade)
            .column(grades::Column::Q2Grade)
            .column(grades::Column::Q3Grade)
            .column(grades::Column::Q4Grade)
            .column_as(sections::Column::GradeLevel, "grade_level")
            .column_as(school_years::Column::SchoolYear, "school_year")
            .join(JoinType::InnerJoin, grades::Relation::Enrollment.def())
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .join(JoinType::LeftJoin, enrollments::Relation::Section.def())
            .join(JoinType::LeftJoin, enrollments::Relation::SchoolYear.def())
            .filter(enrollments::Column::StudentId.eq(student_id))
            .apply_if(school_year, |query, label| {
                query.filter(school_years::Column::SchoolYear.eq(label))
            })
            .order_by_asc(school_years::Column::SchoolYearStart)
            .order_by_asc(subjects::Column::SubjectName)
            .into_model::<GradeRow>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(GradeRecord::from).collect())
    }
}
