use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub full_name: String,
    pub seniority: Option<String>,
    pub skills: Vec<String>,
    pub roles: Vec<String>,
    pub years_of_experience: Option<i32>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub cv_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
