use serde::Deserialize;

use crate::errors::AppError;

pub const SENIORITY_OPTIONS: &[&str] = &["Junior", "Mid", "Senior", "Lead"];

/// Body of `POST /api/v1/employees` and `PUT /api/v1/employees/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeInput {
    pub full_name: String,
    pub seniority: Option<String>,
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub cv_link: Option<String>,
}

/// An employee payload that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub full_name: String,
    pub seniority: Option<String>,
    pub skills: Vec<String>,
    pub roles: Vec<String>,
    pub years_of_experience: Option<i32>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub cv_link: Option<String>,
}

/// Trims every entry and drops the empty ones.
pub fn clean_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn is_absolute_url(value: &str) -> bool {
    reqwest::Url::parse(value).is_ok()
}

impl EmployeeInput {
    pub fn validate(self) -> Result<NewEmployee, AppError> {
        let full_name = self.full_name.trim().to_string();
        let seniority = clean_optional(self.seniority);
        let skills = clean_list(&self.skills);

        let (Some(seniority), Some(years)) = (seniority, self.years_of_experience) else {
            return Err(required_fields());
        };
        if full_name.is_empty() || skills.is_empty() {
            return Err(required_fields());
        }
        if !SENIORITY_OPTIONS.contains(&seniority.as_str()) {
            return Err(AppError::Validation(format!(
                "Seniority must be one of: {}",
                SENIORITY_OPTIONS.join(", ")
            )));
        }
        if years < 0 {
            return Err(AppError::Validation(
                "Years of experience cannot be negative".to_string(),
            ));
        }

        let cv_link = clean_optional(self.cv_link);
        if let Some(link) = &cv_link {
            if !is_absolute_url(link) {
                return Err(AppError::Validation(
                    "CV link must be a valid URL".to_string(),
                ));
            }
        }

        Ok(NewEmployee {
            full_name,
            seniority: Some(seniority),
            skills,
            roles: clean_list(&self.roles),
            years_of_experience: Some(years),
            position: clean_optional(self.position),
            location: clean_optional(self.location),
            cv_link,
        })
    }
}

fn required_fields() -> AppError {
    AppError::Validation("All required fields must be filled".to_string())
}
