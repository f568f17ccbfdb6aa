use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::employees::csv_import::{
    parse_employees_csv, template_csv, ImportSummary, TEMPLATE_FILE_NAME,
};
use crate::employees::filters::{skill_options, EmployeeFilter};
use crate::employees::repository;
use crate::employees::validation::{EmployeeInput, NewEmployee};
use crate::errors::AppError;
use crate::models::employee::EmployeeRow;
use crate::state::AppState;

#[derive(Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeRow>,
    pub total: usize,
}

const DUPLICATE_CV: &str = "An employee with the same CV already exists";

async fn ensure_unique_cv(
    state: &AppState,
    employee: &NewEmployee,
    exclude: Option<Uuid>,
) -> Result<(), AppError> {
    if let Some(cv_link) = &employee.cv_link {
        if repository::cv_link_taken(&state.db, cv_link, exclude).await? {
            warn!("Rejected duplicate CV link {cv_link}");
            return Err(AppError::Conflict(DUPLICATE_CV.to_string()));
        }
    }
    Ok(())
}

/// A concurrent write can slip past `ensure_unique_cv`; the unique index on active
/// `cv_link` then rejects it and the client still gets a 409.
fn map_write_error(e: sqlx::Error) -> AppError {
    let duplicate = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if duplicate {
        warn!("Duplicate CV link rejected by the database: {e}");
        return AppError::Conflict(DUPLICATE_CV.to_string());
    }
    AppError::Database(e)
}

/// GET /api/v1/employees
pub async fn handle_list_employees(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<Json<EmployeeListResponse>, AppError> {
    let employees = filter.apply(repository::list_active(&state.db).await?);
    Ok(Json(EmployeeListResponse {
        total: employees.len(),
        employees,
    }))
}

/// GET /api/v1/employees/skills
pub async fn handle_skill_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let employees = repository::list_active(&state.db).await?;
    Ok(Json(skill_options(&employees)))
}

/// GET /api/v1/employees/:id
pub async fn handle_get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeRow>, AppError> {
    repository::find_active(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}

/// POST /api/v1/employees
pub async fn handle_create_employee(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<EmployeeRow>), AppError> {
    let Json(input) = payload?;
    let employee = input.validate()?;
    ensure_unique_cv(&state, &employee, None).await?;
    let row = repository::insert(&state.db, &employee)
        .await
        .map_err(map_write_error)?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/employees/:id
pub async fn handle_update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<EmployeeRow>, AppError> {
    let Json(input) = payload?;
    let employee = input.validate()?;
    ensure_unique_cv(&state, &employee, Some(id)).await?;
    repository::update(&state.db, id, &employee)
        .await
        .map_err(map_write_error)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}

/// DELETE /api/v1/employees/:id
pub async fn handle_delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if repository::soft_delete(&state.db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Employee {id} not found")))
    }
}

/// POST /api/v1/employees/import
/// Body is the raw CSV file.
pub async fn handle_import_csv(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<ImportSummary>), AppError> {
    let (employees, skipped) = parse_employees_csv(&body)?;
    let imported = repository::insert_many(&state.db, &employees).await?;
    Ok((StatusCode::CREATED, Json(ImportSummary { imported, skipped })))
}

/// GET /api/v1/employees/import/template
pub async fn handle_import_template() -> Result<impl IntoResponse, AppError> {
    let csv = template_csv()?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILE_NAME}\""),
            ),
        ],
        csv,
    ))
}
