use std::sync::LazyLock;

use actix_web::{HttpRequest, HttpResponse, Result, web};
use regex::Regex;

use crate::database::models::{DailySummary, DailySummaryQuery};
use crate::database::repositories::ReportRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::Claims;

static REPORT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("report date pattern is valid")
});

fn invalid_date_format() -> AppError {
    AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string())
}

/// Checks the shape of the `date` parameter. Calendar validity is not checked,
/// and a repeated `date` is malformed.
fn validate_report_date(dates: &[String]) -> Result<&str, AppError> {
    let date = match dates {
        [] => None,
        [date] => Some(date.as_str()).filter(|d| !d.is_empty()),
        _ => return Err(invalid_date_format()),
    }
    .ok_or_else(|| {
        AppError::BadRequest("Date parameter is required (YYYY-MM-DD format)".to_string())
    })?;

    if !REPORT_DATE.is_match(date) {
        return Err(invalid_date_format());
    }

    Ok(date)
}

fn parse_summary_query(query_string: &str) -> Result<DailySummaryQuery, AppError> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string).map_err(|e| {
        log::debug!("Unreadable daily summary query {:?}: {}", query_string, e);
        invalid_date_format()
    })?;

    Ok(DailySummaryQuery::from_pairs(pairs.into_inner()))
}

/// Daily attendance summary for the whole team, managers only
pub async fn get_daily_summary(
    req: HttpRequest,
    claims: Claims,
    repo: web::Data<ReportRepository>,
) -> Result<HttpResponse> {
    claims.require_manager()?;

    // Parsed here rather than by an extractor so the role check comes first.
    let query = parse_summary_query(req.query_string())?;
    let date = validate_report_date(&query.dates)?;
    let filter = query.employee_filter();

    let rows = repo
        .daily_employee_rows(date, filter)
        .await
        .map_err(|err| {
            log::error!(
                "Daily summary error (correlation_id={}): {}",
                req.correlation_id().unwrap_or_default(),
                err
            );
            AppError::internal_server_error_message("Failed to generate daily summary")
        })?;

    log::debug!(
        "Daily summary for {} requested by user {}: {} employees",
        date,
        claims.user_id(),
        rows.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(DailySummary::from_rows(date, rows))))
}
