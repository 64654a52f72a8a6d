use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// A named filter accepted by every list endpoint and list view
///
/// Each key has exactly one comparison kind. Which record field a key
/// applies to is decided per entity, by [`Filterable`] on the client and by
/// the column mapping in the `database` crate on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKey {
    Search,
    Grade,
    Section,
    SchoolYear,
    Status,
    Role,
    Day,
}

/// How a filter value is compared against a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive substring, OR'd across the entity's search fields
    Substring,
    /// Exact text equality
    Exact,
    /// Exact equality on a numeric id
    ExactNumber,
}

impl FilterKey {
    pub const ALL: [Self; 7] = [
        Self::Search,
        Self::Grade,
        Self::Section,
        Self::SchoolYear,
        Self::Status,
        Self::Role,
        Self::Day,
    ];

    /// Canonical query parameter name
    pub fn name(self) -> &'static str {
        match self {
            Self::Search => "searchTerm",
            Self::Grade => "grade",
            Self::Section => "section",
            Self::SchoolYear => "school_year",
            Self::Status => "status",
            Self::Role => "role",
            Self::Day => "day",
        }
    }

    /// Every query parameter name that maps onto this key
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Search => &["searchTerm", "search"],
            Self::Grade => &["grade", "current_yr_lvl", "grade_level"],
            Self::Section => &["section", "section_id"],
            Self::SchoolYear => &["school_year"],
            Self::Status => &["status", "student_status"],
            Self::Role => &["role", "position"],
            Self::Day => &["day"],
        }
    }

    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.aliases().contains(&name))
    }

    pub fn match_kind(self) -> MatchKind {
        match self {
            Self::Search => MatchKind::Substring,
            Self::Section => MatchKind::ExactNumber,
            Self::Grade | Self::SchoolYear | Self::Status | Self::Role | Self::Day => {
                MatchKind::Exact
            }
        }
    }
}

impl Display for FilterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("filter `{key}` expects a numeric id, got `{value}`")]
    NotNumeric { key: FilterKey, value: String },
}

/// A record field as seen by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Text(Option<&'a str>),
    Number(Option<i64>),
}

/// Implemented by every record type that can be shown in a filtered list
pub trait Filterable {
    /// Fields the search term is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// The field a categorical key compares against, or `None` when this
    /// entity does not recognize the key (the filter is then ignored)
    fn field(&self, key: FilterKey) -> Option<Field<'_>>;
}

/// A normalized set of filter values
///
/// Empty and whitespace-only values are never stored, so an empty value is
/// indistinguishable from an absent one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: BTreeMap<FilterKey, FilterValue>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter set from raw query parameters
    ///
    /// Unknown parameter names are skipped. When several aliases of the same
    /// key are present, the last one wins.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, value) in params {
            if let Some(key) = FilterKey::from_param(name.as_ref()) {
                set.set(key, value.as_ref())?;
            }
        }

        Ok(set)
    }

    /// Sets a filter from its raw text form, removing it when `raw` is blank
    pub fn set(&mut self, key: FilterKey, raw: &str) -> Result<(), FilterError> {
        let raw = raw.trim();
        if raw.is_empty() {
            self.values.remove(&key);
            return Ok(());
        }

        let value = match key.match_kind() {
            MatchKind::ExactNumber => {
                let number = raw.parse::<i64>().map_err(|_| FilterError::NotNumeric {
                    key,
                    value: raw.to_string(),
                })?;
                FilterValue::Number(number)
            }
            // statuses are stored lowercase
            MatchKind::Exact if key == FilterKey::Status => FilterValue::Text(raw.to_lowercase()),
            MatchKind::Substring | MatchKind::Exact => FilterValue::Text(raw.to_string()),
        };

        self.values.insert(key, value);
        Ok(())
    }

    pub fn with(mut self, key: FilterKey, raw: &str) -> Result<Self, FilterError> {
        self.set(key, raw)?;
        Ok(self)
    }

    pub fn remove(&mut self, key: FilterKey) {
        self.values.remove(&key);
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn get(&self, key: FilterKey) -> Option<&FilterValue> {
        self.values.get(&key)
    }

    pub fn search_term(&self) -> Option<&str> {
        match self.values.get(&FilterKey::Search) {
            Some(FilterValue::Text(term)) => Some(term),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &FilterValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Query parameters that reproduce this filter set on the server
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        self.iter()
            .map(|(key, value)| (key.name(), value.to_string()))
            .collect()
    }

    /// Whether `record` satisfies every filter in the set
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.iter().all(|(key, value)| match (key.match_kind(), value) {
            (MatchKind::Substring, FilterValue::Text(term)) => {
                let needle = term.to_lowercase();
                record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            _ => match (record.field(key), value) {
                (None, _) => true,
                (Some(Field::Text(actual)), FilterValue::Text(expected)) => {
                    actual == Some(expected.as_str())
                }
                (Some(Field::Number(actual)), FilterValue::Number(expected)) => {
                    actual == Some(*expected)
                }
                _ => false,
            },
        })
    }
}
