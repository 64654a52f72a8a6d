use models::filter::{FilterKey, FilterSet, FilterValue, MatchKind};
use sea_orm::{
    Condition,
    sea_query::{Expr, ExprTrait, Func, IntoColumnRef, LikeExpr, SimpleExpr},
};

/// Maps filter keys onto the columns of one entity's list query
///
/// The columns may belong to joined tables, so they are always table
/// qualified.
pub trait FilterColumns {
    /// Columns the search term is matched against
    fn search_columns() -> Vec<SimpleExpr>;

    /// Column compared by `key`, or `None` when the entity ignores the key
    fn filter_column(key: FilterKey) -> Option<SimpleExpr>;
}

/// Table-qualified column reference
pub fn col(column: impl IntoColumnRef) -> SimpleExpr {
    Expr::col(column).into()
}

/// `LOWER(column)`, used for case-insensitive search and ordering
pub fn lower(column: impl IntoColumnRef) -> SimpleExpr {
    Func::lower(Expr::col(column)).into()
}

/// Escapes `LIKE` wildcards so they match literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn search_condition(columns: Vec<SimpleExpr>, term: &str) -> Condition {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    columns
        .into_iter()
        .fold(Condition::any(), |condition, column| {
            condition.add(
                SimpleExpr::from(Func::lower(column))
                    .like(LikeExpr::new(pattern.clone()).escape('\\')),
            )
        })
}

/// Builds the `WHERE` condition for a filter set
///
/// Every filter is ANDed; the search term is ORed across the entity's
/// search columns. Values are bound as parameters.
pub fn build_condition<F: FilterColumns>(filters: &FilterSet) -> Condition {
    let mut condition = Condition::all();

    for (key, value) in filters.iter() {
        match (key.match_kind(), value) {
            (MatchKind::Substring, FilterValue::Text(term)) => {
                condition = condition.add(search_condition(F::search_columns(), term));
            }
            (_, value) => {
                let Some(column) = F::filter_column(key) else {
                    continue;
                };

                condition = match value {
                    FilterValue::Text(text) => condition.add(column.eq(text.as_str())),
                    FilterValue::Number(number) => condition.add(column.eq(*number)),
                };
            }
        }
    }

    condition
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entities::{school_years, sections, students};
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    struct StudentColumns;

    impl FilterColumns for StudentColumns {
        fn search_columns() -> Vec<SimpleExpr> {
            vec![
                col((students::Entity, students::Column::Lastname)),
                col((students::Entity, students::Column::Firstname)),
            ]
        }

        fn filter_column(key: FilterKey) -> Option<SimpleExpr> {
            match key {
                FilterKey::Grade => Some(col((students::Entity, students::Column::CurrentYrLvl))),
                FilterKey::Section => Some(col((students::Entity, students::Column::SectionId))),
                FilterKey::SchoolYear => {
                    Some(col((school_years::Entity, school_years::Column::SchoolYear)))
                }
                FilterKey::Status => {
                    Some(col((students::Entity, students::Column::StudentStatus)))
                }
                _ => None,
            }
        }
    }

    fn sql(filters: &FilterSet) -> String {
        students::Entity::find()
            .find_also_related(sections::Entity)
            .filter(build_condition::<StudentColumns>(filters))
            .build(DbBackend::Postgres)
            .to_string()
    }

    /// The `WHERE` clause; an empty `Condition::all()` renders as `TRUE`
    fn predicate(sql: &str) -> &str {
        sql.split_once(" WHERE ").map_or("TRUE", |(_, clause)| clause)
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("cruz"), "cruz");
    }

    #[test]
    fn test_empty_filter_set_adds_no_predicate() {
        assert_eq!(predicate(&sql(&FilterSet::new())), "TRUE");
    }

    #[test]
    fn test_search_is_lowercased_like_over_name_columns() {
        let filters = FilterSet::from_params([("searchTerm", "AN")]).unwrap();
        let sql = sql(&filters);

        assert!(sql.contains(r#"LOWER("students"."lastname") LIKE '%an%'"#));
        assert!(sql.contains(r#"LOWER("students"."firstname") LIKE '%an%'"#));
        assert!(sql.contains(" OR "));
        assert!(sql.contains("ESCAPE"));
    }

    #[test]
    fn test_exact_filters_are_conjunctive() {
        let filters = FilterSet::from_params([("grade", "8"), ("section", "3")]).unwrap();
        let sql = sql(&filters);

        assert!(sql.contains(r#""students"."current_yr_lvl" = '8'"#));
        assert!(sql.contains(r#""students"."section_id" = 3"#));
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn test_status_matches_stored_lowercase() {
        let filters = FilterSet::from_params([("status", "Active")]).unwrap();
        assert!(predicate(&sql(&filters)).contains(r#""students"."student_status" = 'active'"#));
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let filters = FilterSet::from_params([("role", "Registrar"), ("day", "Monday")]).unwrap();
        assert_eq!(predicate(&sql(&filters)), "TRUE");
    }
}
