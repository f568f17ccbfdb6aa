//! CSV bulk import of employees.
//!
//! Header row required; columns are matched by name and may appear in any order.
//! `skills` and `roles` are `|`-separated inside their cell.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::employees::validation::{clean_list, NewEmployee};
use crate::errors::AppError;

pub const TEMPLATE_FILE_NAME: &str = "employees_template.csv";
const TEMPLATE_HEADERS: [&str; 5] = [
    "fullName",
    "skills",
    "yearsOfExperience",
    "seniority",
    "roles",
];
const TEMPLATE_SAMPLE: [&str; 5] = [
    "Jane Doe",
    "React | TypeScript | SQL",
    "5",
    "Senior",
    "Frontend Developer",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct EmployeeCsvRow {
    full_name: Option<String>,
    skills: Option<String>,
    seniority: Option<String>,
    roles: Option<String>,
    years_of_experience: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

fn split_pipes(cell: Option<&str>) -> Vec<String> {
    cell.map(|c| clean_list(c.split('|'))).unwrap_or_default()
}

fn parse_years(cell: Option<&str>) -> Result<Option<i32>, ()> {
    match cell.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|y| y.is_finite() && *y >= 0.0)
            .map(f64::round)
            .filter(|y| *y <= f64::from(i32::MAX))
            .map(|y| Some(y as i32))
            .ok_or(()),
    }
}

impl EmployeeCsvRow {
    /// `None` when the row has no name or a non-numeric or out-of-range
    /// `yearsOfExperience`.
    fn into_employee(self) -> Option<NewEmployee> {
        let full_name = self.full_name.as_deref().map(str::trim).unwrap_or_default();
        if full_name.is_empty() {
            return None;
        }
        let years_of_experience = parse_years(self.years_of_experience.as_deref()).ok()?;

        Some(NewEmployee {
            full_name: full_name.to_string(),
            seniority: self
                .seniority
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            skills: split_pipes(self.skills.as_deref()),
            roles: split_pipes(self.roles.as_deref()),
            years_of_experience,
            position: None,
            location: None,
            cv_link: None,
        })
    }
}

/// Parses an uploaded CSV into employees ready for insertion.
///
/// Invalid rows are skipped and counted; a file with no valid rows is rejected.
pub fn parse_employees_csv(bytes: &[u8]) -> Result<(Vec<NewEmployee>, usize), AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(bytes);

    let mut employees = Vec::new();
    let mut skipped = 0;

    for record in reader.deserialize::<EmployeeCsvRow>() {
        let row = match record {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable CSV row: {e}");
                skipped += 1;
                continue;
            }
        };
        match row.into_employee() {
            Some(employee) => employees.push(employee),
            None => skipped += 1,
        }
    }

    if employees.is_empty() {
        return Err(AppError::Validation(
            "CSV contains no valid rows".to_string(),
        ));
    }
    Ok((employees, skipped))
}

/// The downloadable starter file: header plus one sample row.
pub fn template_csv() -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(TEMPLATE_HEADERS)?;
    writer.write_record(TEMPLATE_SAMPLE)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV template: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
