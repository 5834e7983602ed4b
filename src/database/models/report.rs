use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Deserialize, Serialize};

/// Raw daily summary parameters. Repeated keys are kept so the handler can
/// reject them instead of the extractor.
#[derive(Debug, Default, PartialEq)]
pub struct DailySummaryQuery {
    pub dates: Vec<String>,
    pub employee_ids: Vec<String>,
}

impl DailySummaryQuery {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = DailySummaryQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "date" => query.dates.push(value),
                "employee_id" => query.employee_ids.push(value),
                _ => {}
            }
        }
        query
    }

    /// A repeated `employee_id` cannot name a single employee.
    pub fn employee_filter(&self) -> EmployeeFilter {
        match self.employee_ids.as_slice() {
            [] => EmployeeFilter::All,
            [id] => EmployeeFilter::parse(Some(id.as_str())),
            _ => EmployeeFilter::NoMatch,
        }
    }
}

/// Which employees a daily summary covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeFilter {
    All,
    Only(i64),
    /// The caller asked for an id that cannot name any employee.
    NoMatch,
}

impl EmployeeFilter {
    /// An empty value means "no filter". Any other value is compared the way
    /// SQLite compares text with an integer column: surrounding whitespace is
    /// ignored and integral numbers such as `2.0` name id 2. Everything else
    /// matches nobody.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|value| !value.is_empty()) else {
            return EmployeeFilter::All;
        };

        let value = raw.trim();
        if let Ok(id) = value.parse::<i64>() {
            return EmployeeFilter::Only(id);
        }

        match value.parse::<f64>() {
            Ok(id)
                if id.is_finite()
                    && id.fract() == 0.0
                    && id >= i64::MIN as f64
                    && id < i64::MAX as f64 =>
            {
                EmployeeFilter::Only(id as i64)
            }
            _ => EmployeeFilter::NoMatch,
        }
    }
}

/// One aggregated row per employee for a single day.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EmployeeDailyRow {
    pub employee_id: i64,
    pub employee_name: String,
    pub total_checkins: i64,
    pub clients_visited: i64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub total_employees: i64,
    pub total_checkins: i64,
    pub total_clients_visited: i64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeBreakdown {
    pub employee_id: i64,
    pub employee_name: String,
    pub checkins: i64,
    pub clients_visited: i64,
    pub working_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub team_summary: TeamSummary,
    pub employee_breakdown: Vec<EmployeeBreakdown>,
}

impl DailySummary {
    /// Folds per-employee rows into team totals. Hours are summed unrounded and
    /// rounded once at the end, both for the team and for each employee.
    pub fn from_rows(date: impl Into<String>, rows: Vec<EmployeeDailyRow>) -> Self {
        let mut team_summary = TeamSummary::default();
        let mut employee_breakdown = Vec::with_capacity(rows.len());

        for row in rows {
            team_summary.total_employees += 1;
            team_summary.total_checkins += row.total_checkins;
            team_summary.total_clients_visited += row.clients_visited;
            team_summary.total_hours += row.total_hours;

            employee_breakdown.push(EmployeeBreakdown {
                employee_id: row.employee_id,
                employee_name: row.employee_name,
                checkins: row.total_checkins,
                clients_visited: row.clients_visited,
                working_hours: round_hours(row.total_hours),
            });
        }

        team_summary.total_hours = round_hours(team_summary.total_hours);

        Self {
            date: date.into(),
            team_summary,
            employee_breakdown,
        }
    }
}

/// Rounds to two decimals, half away from zero.
///
/// Rounding happens on the shortest decimal form of the value rather than on
/// its binary expansion, so `8.505` becomes `8.51` even though the nearest
/// `f64` is slightly below it.
pub fn round_hours(hours: f64) -> f64 {
    if !hours.is_finite() {
        return hours;
    }

    BigDecimal::from_str(&hours.to_string())
        .ok()
        .and_then(|value| {
            value
                .with_scale_round(2, RoundingMode::HalfUp)
                .to_string()
                .parse::<f64>()
                .ok()
        })
        .unwrap_or(hours)
}
