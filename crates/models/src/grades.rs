use serde::{Deserialize, Serialize};

/// The four quarter scores of one subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterGrades {
    pub q1: Option<f64>,
    pub q2: Option<f64>,
    pub q3: Option<f64>,
    pub q4: Option<f64>,
}

impl QuarterGrades {
    pub fn new(q1: Option<f64>, q2: Option<f64>, q3: Option<f64>, q4: Option<f64>) -> Self {
        Self { q1, q2, q3, q4 }
    }

    pub fn as_array(&self) -> [Option<f64>; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }

    /// Arithmetic mean of the four quarters, once all of them are graded
    pub fn final_grade(&self) -> Option<f64> {
        let [q1, q2, q3, q4] = self.as_array();
        Some((q1? + q2? + q3? + q4?) / 4.0)
    }
}

/// Two-decimal display form used wherever a grade is printed
pub fn format_grade(grade: f64) -> String {
    format!("{grade:.2}")
}

/// One subject's grades for a student, joined with where they were earned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GradeRecord {
    pub subject_id: i32,
    pub subject_name: String,
    pub q1_grade: Option<f64>,
    pub q2_grade: Option<f64>,
    pub q3_grade: Option<f64>,
    pub q4_grade: Option<f64>,
    pub final_grade: Option<f64>,
    pub grade_level: Option<String>,
    pub school_year: Option<String>,
}

impl GradeRecord {
    pub fn new(
        subject_id: i32,
        subject_name: String,
        quarters: QuarterGrades,
        grade_level: Option<String>,
        school_year: Option<String>,
    ) -> Self {
        Self {
            subject_id,
            subject_name,
            q1_grade: quarters.q1,
            q2_grade: quarters.q2,
            q3_grade: quarters.q3,
            q4_grade: quarters.q4,
            final_grade: quarters.final_grade(),
            grade_level,
            school_year,
        }
    }

    pub fn quarters(&self) -> QuarterGrades {
        QuarterGrades::new(self.q1_grade, self.q2_grade, self.q3_grade, self.q4_grade)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_final_grade_is_mean_of_quarters() {
        let quarters = QuarterGrades::new(Some(85.0), Some(90.0), Some(88.0), Some(92.0));
        assert_eq!(quarters.final_grade(), Some(88.75));
        assert_eq!(format_grade(quarters.final_grade().unwrap()), "88.75");
    }

    #[test]
    fn test_final_grade_waits_for_every_quarter() {
        let quarters = QuarterGrades::new(Some(85.0), Some(90.0), None, None);
        assert_eq!(quarters.final_grade(), None);
    }

    #[test]
    fn test_format_grade_pads_to_two_decimals() {
        assert_eq!(format_grade(90.0), "90.00");
        assert_eq!(format_grade(87.333_333), "87.33");
    }

    #[test]
    fn test_grade_record_computes_final_grade() {
        let record = GradeRecord::new(
            4,
            "Science".to_string(),
            QuarterGrades::new(Some(80.0), Some(82.0), Some(84.0), Some(86.0)),
            Some("8".to_string()),
            Some("2024-2025".to_string()),
        );

        assert_eq!(record.final_grade, Some(83.0));
        assert_eq!(record.quarters().as_array()[2], Some(84.0));
    }
}
