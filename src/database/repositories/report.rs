use anyhow::Result;
use sqlx::SqlitePool;

use crate::database::models::{EmployeeDailyRow, EmployeeFilter, UserRole};

const DAILY_EMPLOYEE_ROWS: &str = r#"
    SELECT
        u.id AS employee_id,
        u.name AS employee_name,
        COUNT(c.id) AS total_checkins,
        COUNT(DISTINCT c.client_id) AS clients_visited,
        CAST(COALESCE(SUM(
            CASE
                WHEN c.checkout_time IS NOT NULL
                THEN (julianday(c.checkout_time) - julianday(c.checkin_time)) * 24
                ELSE 0.0
            END
        ), 0.0) AS REAL) AS total_hours
    FROM users u
    LEFT JOIN checkins c
        ON u.id = c.employee_id
        AND DATE(c.checkin_time) = ?
    WHERE u.role = ?
"#;

#[derive(Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Per-employee check-in totals for `date` (`YYYY-MM-DD`), ordered by name.
    ///
    /// Every employee matching the filter gets a row, zero-filled when they
    /// have no check-ins that day. Check-ins without a checkout count towards
    /// `total_checkins` but add no hours.
    pub async fn daily_employee_rows(
        &self,
        date: &str,
        filter: EmployeeFilter,
    ) -> Result<Vec<EmployeeDailyRow>> {
        let mut query = DAILY_EMPLOYEE_ROWS.to_string();
        match filter {
            EmployeeFilter::All => {}
            EmployeeFilter::Only(_) => query.push_str(" AND u.id = ?"),
            EmployeeFilter::NoMatch => return Ok(Vec::new()),
        }
        query.push_str(" GROUP BY u.id, u.name ORDER BY u.name");

        let mut rows = sqlx::query_as::<_, EmployeeDailyRow>(&query)
            .bind(date)
            .bind(UserRole::Employee);
        if let EmployeeFilter::Only(employee_id) = filter {
            rows = rows.bind(employee_id);
        }

        Ok(rows.fetch_all(&self.pool).await?)
    }
}
