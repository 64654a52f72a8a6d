use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

#[cfg(feature = "database")]
use sea_orm::Value;

/// The status code recorded for a student on a school day
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AttendanceStatus {
    #[serde(rename = "P")]
    #[strum(serialize = "P")]
    Present,
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Absent,
    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Late,
    #[serde(rename = "B")]
    #[strum(serialize = "B")]
    Brigada,
}

impl AttendanceStatus {
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

/// Per-status attendance counters for one student
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AttendanceSummary {
    pub total_school_days: i64,
    pub days_present: i64,
    pub days_absent: i64,
    pub days_late: i64,
    pub brigada_attendance: i64,
}

impl AttendanceSummary {
    /// Pivots grouped `(status code, count)` rows into named counters
    ///
    /// Every row counts towards the total, including codes that have no
    /// counter of their own.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let mut summary = Self::default();

        for (code, count) in counts {
            summary.total_school_days += count;

            match code.as_ref().trim().parse::<AttendanceStatus>() {
                Ok(AttendanceStatus::Present) => summary.days_present += count,
                Ok(AttendanceStatus::Absent) => summary.days_absent += count,
                Ok(AttendanceStatus::Late) => summary.days_late += count,
                Ok(AttendanceStatus::Brigada) => summary.brigada_attendance += count,
                Err(_) => {}
            }
        }

        summary
    }

    /// Label/value rows in the order they are printed
    pub fn rows(&self) -> [(&'static str, i64); 5] {
        [
            ("Total School Days", self.total_school_days),
            ("Total Days Present", self.days_present),
            ("Total Days Absent", self.days_absent),
            ("Total Days Late", self.days_late),
            ("Brigada Attendance", self.brigada_attendance),
        ]
    }
}

/// A single day on a student's attendance calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::FromQueryResult))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AttendanceEntry {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for AttendanceStatus {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => s.parse().map_err(|_| sea_orm::sea_query::ValueTypeErr),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "AttendanceStatus".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<AttendanceStatus> for Value {
    fn from(status: AttendanceStatus) -> Self {
        Value::String(Some(Box::new(status.code().to_string())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for AttendanceStatus {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        let val: String = res.try_get_by(index)?;

        val.trim().parse().map_err(|e| {
            sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                "Failed to decode attendance status '{val}': {e}"
            )))
        })
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for AttendanceStatus {
    fn null() -> Value {
        Value::String(None)
    }
}
