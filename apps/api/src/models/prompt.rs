use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One request/response pair logged by the suggestion workflow (`prompts` table).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PromptRow {
    pub id: Uuid,
    pub requester_content: Option<String>,
    pub returned_list: Option<String>,
    pub requester: Option<String>,
    pub created_at: DateTime<Utc>,
}
