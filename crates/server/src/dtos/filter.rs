use crate::error::AppError;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use models::filter::FilterSet;
use serde::Deserialize;
use utoipa::IntoParams;

/// Filter query string shared by every list endpoint
///
/// Only used for the API documentation; requests are parsed by [`Filters`]
/// so that every alias of a key is accepted.
#[allow(dead_code)]
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    /// Case-insensitive substring over the entity's name fields (alias `search`)
    #[param(rename = "searchTerm")]
    pub search_term: Option<String>,
    /// Grade level "7" to "10" (aliases `current_yr_lvl`, `grade_level`)
    pub grade: Option<String>,
    /// Numeric section id (alias `section_id`)
    pub section: Option<i64>,
    /// School year label such as "2024-2025"
    pub school_year: Option<String>,
    /// `active` or `inactive` (alias `student_status`)
    pub status: Option<String>,
    /// Staff role name (alias `position`)
    pub role: Option<String>,
    /// Full weekday name
    pub day: Option<String>,
}

/// The filter set parsed from the query string
///
/// Unknown parameters are ignored and blank values are dropped; a
/// non-numeric `section` is rejected with 400.
pub struct Filters(pub FilterSet);

impl<S> FromRequestParts<S> for Filters
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(FilterSet::from_params(params)?))
    }
}

/// Optional `?school_year=` scope on grade and attendance reads
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SchoolYearScope {
    /// School year label such as "2024-2025"
    pub school_year: Option<String>,
}

impl SchoolYearScope {
    pub fn label(&self) -> Option<&str> {
        self.school_year
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::Request;
    use models::filter::{FilterKey, FilterValue};

    async fn parse(uri: &str) -> Result<FilterSet, AppError> {
        let (mut parts, _) = Request::get(uri).body(()).unwrap().into_parts();
        Filters::from_request_parts(&mut parts, &())
            .await
            .map(|Filters(filters)| filters)
    }

    #[tokio::test]
    async fn test_aliases_and_blank_values() {
        let filters = parse("/students?current_yr_lvl=8&search=an&status=&page=2")
            .await
            .unwrap();

        assert_eq!(
            filters.get(FilterKey::Grade),
            Some(&FilterValue::Text("8".to_string()))
        );
        assert_eq!(filters.search_term(), Some("an"));
        assert!(filters.get(FilterKey::Status).is_none());
    }

    #[tokio::test]
    async fn test_non_numeric_section_is_rejected() {
        assert!(matches!(
            parse("/students?section=abc").await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_blank_school_year_scope_is_unscoped() {
        let scope = SchoolYearScope {
            school_year: Some("  ".to_string()),
        };
        assert_eq!(scope.label(), None);
    }
}
