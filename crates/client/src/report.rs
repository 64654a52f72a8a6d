//! The consolidated student record as a paginated document.
//!
//! Pages are plain tables; turning them into PDF bytes is left to whatever
//! renderer the caller uses. [`Document::render_text`] gives a printable
//! rendering for terminals and tests.

use models::{
    attendance::AttendanceSummary,
    grades::{GradeRecord, format_grade},
    records::StudentRecord,
};
use std::fmt::Write;

const GRADE_COLUMNS: [&str; 6] = ["Subject", "Q1", "Q2", "Q3", "Q4", "Final Grade"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub head: Vec<Vec<String>>,
    pub body: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub file_name: String,
    pub pages: Vec<Page>,
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn shown<N: ToString>(value: Option<N>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

/// Label and display value of every personal field, in print order
///
/// The first and last name are the page title and are not repeated.
pub fn personal_fields(student: &StudentRecord) -> Vec<(&'static str, String)> {
    vec![
        ("Student ID", student.student_id.to_string()),
        ("Middle Name", text(student.middlename.as_deref())),
        ("Current Year Level", student.current_yr_lvl.clone()),
        (
            "Birthdate",
            shown(student.birthdate.map(|date| date.format("%m/%d/%Y"))),
        ),
        ("Gender", text(student.gender.as_deref())),
        ("Age", shown(student.age)),
        ("Home Address", text(student.home_address.as_deref())),
        ("Barangay", text(student.barangay.as_deref())),
        ("City/Municipality", text(student.city_municipality.as_deref())),
        ("Province", text(student.province.as_deref())),
        ("Contact Number", text(student.contact_number.as_deref())),
        ("Email Address", text(student.email_address.as_deref())),
        ("Mother's Name", text(student.mother_name.as_deref())),
        ("Father's Name", text(student.father_name.as_deref())),
        ("Parent Address", text(student.parent_address.as_deref())),
        ("Father's Occupation", text(student.father_occupation.as_deref())),
        ("Mother's Occupation", text(student.mother_occupation.as_deref())),
        (
            "Annual Household Income",
            text(student.annual_hshld_income.as_deref()),
        ),
        ("Number of Siblings", shown(student.number_of_siblings)),
        (
            "Father's Education Level",
            text(student.father_educ_lvl.as_deref()),
        ),
        (
            "Mother's Education Level",
            text(student.mother_educ_lvl.as_deref()),
        ),
        (
            "Father's Contact Number",
            text(student.father_contact_number.as_deref()),
        ),
        (
            "Mother's Contact Number",
            text(student.mother_contact_number.as_deref()),
        ),
        ("Status", student.student_status.clone()),
        ("Section", text(student.section_name.as_deref())),
        ("School Year", text(student.school_year.as_deref())),
    ]
}

type Scope<'a> = (Option<&'a str>, Option<&'a str>);

/// `Grade Level: …` / `School Year: …`
fn scope_header((grade_level, school_year): Scope<'_>) -> Vec<String> {
    vec![
        format!("Grade Level: {}", text(grade_level)),
        format!("School Year: {}", text(school_year)),
    ]
}

/// Grade rows split by grade level and school year, in first-seen order
fn by_scope(grades: &[GradeRecord]) -> Vec<(Scope<'_>, Vec<&GradeRecord>)> {
    let mut groups: Vec<(Scope<'_>, Vec<&GradeRecord>)> = Vec::new();
    for grade in grades {
        let scope = (grade.grade_level.as_deref(), grade.school_year.as_deref());
        match groups.iter_mut().find(|(key, _)| *key == scope) {
            Some((_, rows)) => rows.push(grade),
            None => groups.push((scope, vec![grade])),
        }
    }
    groups
}

fn grade_row(grade: &GradeRecord) -> Vec<String> {
    let mut row = vec![grade.subject_name.clone()];
    row.extend(grade.quarters().as_array().into_iter().map(shown));
    row.push(grade.final_grade.map(format_grade).unwrap_or_default());
    row
}

impl Document {
    /// Builds the export of one student
    ///
    /// Grades get one page per school year and no page when there are none.
    /// The attendance page is headed with the student's current grade level
    /// and school year, and is left out when there is no summary.
    pub fn student_record(
        student: &StudentRecord,
        grades: &[GradeRecord],
        attendance: Option<&AttendanceSummary>,
    ) -> Self {
        let mut pages = vec![Page {
            title: format!("{} {}", student.firstname, student.lastname),
            table: Table {
                head: Vec::new(),
                body: personal_fields(student)
                    .into_iter()
                    .map(|(label, value)| vec![label.to_string(), value])
                    .collect(),
            },
        }];

        for (scope, rows) in by_scope(grades) {
            pages.push(Page {
                title: "Grades".to_string(),
                table: Table {
                    head: vec![
                        scope_header(scope),
                        GRADE_COLUMNS.iter().map(|column| column.to_string()).collect(),
                    ],
                    body: rows.into_iter().map(grade_row).collect(),
                },
            });
        }

        if let Some(summary) = attendance {
            pages.push(Page {
                title: "Attendance".to_string(),
                table: Table {
                    head: vec![scope_header((
                        Some(student.current_yr_lvl.as_str()),
                        student.school_year.as_deref(),
                    ))],
                    body: summary
                        .rows()
                        .into_iter()
                        .map(|(label, value)| vec![label.to_string(), value.to_string()])
                        .collect(),
                },
            });
        }

        Self {
            file_name: format!("{}_{}_Details.pdf", student.firstname, student.lastname),
            pages,
        }
    }

    /// One block per page, separated by form feeds
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for (idx, page) in self.pages.iter().enumerate() {
            if idx > 0 {
                out.push('\u{c}');
            }
            let _ = writeln!(out, "{}", page.title);
            let _ = writeln!(out);
            for row in page.table.head.iter().chain(&page.table.body) {
                let _ = writeln!(out, "{}", row.join(" | "));
            }
        }

        out
    }
}
