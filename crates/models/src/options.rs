use serde::{Deserialize, Serialize};

/// Grade levels offered by the school, in display order
pub const GRADE_LEVELS: [&str; 4] = ["7", "8", "9", "10"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionOption {
    pub section_id: i32,
    pub section_name: String,
    pub grade_level: String,
}

/// Choices offered by the filter dropdowns of every list page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub school_years: Vec<String>,
    pub grades: Vec<String>,
    pub sections: Vec<SectionOption>,
}

impl FilterOptions {
    pub fn new(school_years: Vec<String>, sections: Vec<SectionOption>) -> Self {
        Self {
            school_years,
            grades: GRADE_LEVELS.iter().map(|grade| grade.to_string()).collect(),
            sections,
        }
    }

    /// Sections offered once a grade has been picked
    pub fn sections_for_grade<'a>(
        &'a self,
        grade: &'a str,
    ) -> impl Iterator<Item = &'a SectionOption> + 'a {
        self.sections
            .iter()
            .filter(move |section| grade.is_empty() || section.grade_level == grade)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn section(id: i32, name: &str, grade: &str) -> SectionOption {
        SectionOption {
            section_id: id,
            section_name: name.to_string(),
            grade_level: grade.to_string(),
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let options = FilterOptions::new(vec!["2024-2025".to_string()], vec![]);
        let body = serde_json::to_value(&options).unwrap();

        assert_eq!(body["schoolYears"][0], "2024-2025");
        assert_eq!(body["grades"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_sections_narrow_by_grade() {
        let options = FilterOptions::new(
            vec![],
            vec![section(1, "Rizal", "7"), section(2, "Bonifacio", "8")],
        );

        let names: Vec<_> = options
            .sections_for_grade("8")
            .map(|section| section.section_name.as_str())
            .collect();
        assert_eq!(names, vec!["Bonifacio"]);
        assert_eq!(options.sections_for_grade("").count(), 2);
    }
}
