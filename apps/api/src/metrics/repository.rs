use sqlx::{PgPool, Result};
use tracing::debug;

use crate::models::metric::MetricRow;

/// Loads every metric record. The pipelines need the full set, so there is no paging.
pub async fn fetch_metric_rows(pool: &PgPool) -> Result<Vec<MetricRow>> {
    let rows = sqlx::query_as::<_, MetricRow>(
        r#"
        SELECT suggested,
               to_jsonb(required_skills)    AS required_skills,
               to_jsonb(required_seniority) AS required_seniority,
               created_at::text             AS created_at
        FROM metrics
        "#,
    )
    .fetch_all(pool)
    .await?;

    debug!("Fetched {} metric rows", rows.len());
    Ok(rows)
}
