use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::metrics::dashboard::{build_dashboard, DashboardResponse};
use crate::metrics::repository::fetch_metric_rows;
use crate::metrics::MetricRecord;
use crate::state::AppState;

/// GET /api/v1/metrics/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let records: Vec<MetricRecord> = fetch_metric_rows(&state.db)
        .await?
        .into_iter()
        .map(MetricRecord::from)
        .collect();

    Ok(Json(build_dashboard(&records)))
}
