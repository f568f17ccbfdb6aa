//! Suggestion audit log: what was asked of the suggestion workflow and what it returned.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::prompt::PromptRow;
use crate::state::AppState;

pub const PAGE_SIZE: i64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: i64,
}

#[derive(Debug, Serialize)]
pub struct SuggestionPage {
    pub items: Vec<PromptRow>,
    pub page: i64,
    pub has_more: bool,
}

/// Zero-based page → SQL offset. Negative pages are rejected.
pub fn page_offset(page: i64) -> Result<i64, AppError> {
    if page < 0 {
        return Err(AppError::Validation("page must be >= 0".to_string()));
    }
    page.checked_mul(PAGE_SIZE)
        .ok_or_else(|| AppError::Validation("page is out of range".to_string()))
}

pub async fn fetch_page(pool: &PgPool, offset: i64) -> sqlx::Result<Vec<PromptRow>> {
    Ok(sqlx::query_as::<_, PromptRow>(
        r#"
        SELECT id, requester_content, returned_list, requester, created_at
        FROM prompts
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(PAGE_SIZE)
    .bind(offset)
    .fetch_all(pool)
    .await?)
}

/// GET /api/v1/suggestions?page=N
pub async fn handle_list_suggestions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SuggestionPage>, AppError> {
    let offset = page_offset(query.page)?;
    let items = fetch_page(&state.db, offset).await?;
    Ok(Json(SuggestionPage {
        has_more: items.len() as i64 == PAGE_SIZE,
        page: query.page,
        items,
    }))
}
