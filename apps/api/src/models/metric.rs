use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// A row of the `metrics` table, written by the candidate-suggestion workflow.
///
/// `required_*` are selected through `to_jsonb` and `created_at` as text, so the row
/// decodes regardless of how the workflow typed those columns.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MetricRow {
    pub suggested: Option<String>,
    pub required_skills: Option<Value>,
    pub required_seniority: Option<Value>,
    pub created_at: Option<String>,
}
