use sqlx::{PgPool, Postgres, Result, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::employees::validation::NewEmployee;
use crate::models::employee::EmployeeRow;

/// Active (not soft-deleted) employees, newest first.
pub async fn list_active(pool: &PgPool) -> Result<Vec<EmployeeRow>> {
    Ok(sqlx::query_as::<_, EmployeeRow>(
        "SELECT * FROM employees WHERE deleted_at IS NULL ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn find_active(pool: &PgPool, id: Uuid) -> Result<Option<EmployeeRow>> {
    Ok(sqlx::query_as::<_, EmployeeRow>(
        "SELECT * FROM employees WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?)
}

/// Whether another active employee already points at this CV.
/// `exclude` skips the employee being edited. The unique index on active
/// `cv_link` still has the final say when two writes race.
pub async fn cv_link_taken(pool: &PgPool, cv_link: &str, exclude: Option<Uuid>) -> Result<bool> {
    let existing: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM employees
        WHERE cv_link = $1
          AND deleted_at IS NULL
          AND ($2::uuid IS NULL OR id <> $2)
        LIMIT 1
        "#,
    )
    .bind(cv_link)
    .bind(exclude)
    .fetch_optional(pool)
    .await?;
    Ok(existing.is_some())
}

const INSERT_EMPLOYEE: &str = r#"
    INSERT INTO employees
        (full_name, seniority, skills, roles, years_of_experience, position, location, cv_link)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING *
"#;

pub async fn insert(pool: &PgPool, employee: &NewEmployee) -> Result<EmployeeRow> {
    let row = sqlx::query_as::<_, EmployeeRow>(INSERT_EMPLOYEE)
        .bind(&employee.full_name)
        .bind(&employee.seniority)
        .bind(&employee.skills)
        .bind(&employee.roles)
        .bind(employee.years_of_experience)
        .bind(&employee.position)
        .bind(&employee.location)
        .bind(&employee.cv_link)
        .fetch_one(pool)
        .await?;

    info!("Created employee {}", row.id);
    Ok(row)
}

/// Inserts all rows in one transaction: either the whole import lands or none of it.
pub async fn insert_many(pool: &PgPool, employees: &[NewEmployee]) -> Result<usize> {
    let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

    for employee in employees {
        sqlx::query(INSERT_EMPLOYEE)
            .bind(&employee.full_name)
            .bind(&employee.seniority)
            .bind(&employee.skills)
            .bind(&employee.roles)
            .bind(employee.years_of_experience)
            .bind(&employee.position)
            .bind(&employee.location)
            .bind(&employee.cv_link)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!("Imported {} employees", employees.len());
    Ok(employees.len())
}

/// Overwrites the editable fields of an active employee. `None` if no such employee.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    employee: &NewEmployee,
) -> Result<Option<EmployeeRow>> {
    Ok(sqlx::query_as::<_, EmployeeRow>(
        r#"
        UPDATE employees
        SET full_name = $2,
            seniority = $3,
            skills = $4,
            roles = $5,
            years_of_experience = $6,
            position = $7,
            location = $8,
            cv_link = $9
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&employee.full_name)
    .bind(&employee.seniority)
    .bind(&employee.skills)
    .bind(&employee.roles)
    .bind(employee.years_of_experience)
    .bind(&employee.position)
    .bind(&employee.location)
    .bind(&employee.cv_link)
    .fetch_optional(pool)
    .await?)
}

/// Soft delete: stamps `deleted_at`. Returns false if the employee was not active.
pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE employees SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        info!("Soft-deleted employee {id}");
    }
    Ok(result.rows_affected() > 0)
}
