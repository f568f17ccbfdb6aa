use std::collections::BTreeSet;

use serde::Deserialize;

use crate::models::employee::EmployeeRow;

/// Experience bands offered by the employee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearsBand {
    UpToTwo,
    ThreeToFive,
    SixPlus,
}

impl YearsBand {
    /// `"0-2" | "3-5" | "6+"`. Anything else means "no band".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0-2" => Some(YearsBand::UpToTwo),
            "3-5" => Some(YearsBand::ThreeToFive),
            "6+" => Some(YearsBand::SixPlus),
            _ => None,
        }
    }

    pub fn contains(self, years: i32) -> bool {
        match self {
            YearsBand::UpToTwo => years <= 2,
            YearsBand::ThreeToFive => (3..=5).contains(&years),
            YearsBand::SixPlus => years >= 6,
        }
    }
}

/// Query-string filters for `GET /api/v1/employees`. Empty values mean "any".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeFilter {
    pub search: Option<String>,
    pub skill: Option<String>,
    pub seniority: Option<String>,
    pub years: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &EmployeeRow) -> bool {
        if let Some(search) = non_empty(&self.search) {
            if !employee
                .full_name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        if let Some(skill) = non_empty(&self.skill) {
            if !employee.skills.iter().any(|s| s == skill) {
                return false;
            }
        }
        if let Some(seniority) = non_empty(&self.seniority) {
            if employee.seniority.as_deref() != Some(seniority) {
                return false;
            }
        }
        if let Some(band) = self.years.as_deref().and_then(YearsBand::parse) {
            if !band.contains(employee.years_of_experience.unwrap_or(0)) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, employees: Vec<EmployeeRow>) -> Vec<EmployeeRow> {
        employees.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Sorted distinct skills across the given employees, for the skill picker.
pub fn skill_options(employees: &[EmployeeRow]) -> Vec<String> {
    employees
        .iter()
        .flat_map(|e| e.skills.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
