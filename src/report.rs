//! Request-driven report flow: validate the date pair, fetch, filter
//! commodities, and render both the table view and the HTML dashboard.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::client::PasarClient;
use crate::config::VARIANT_NAME_COLUMN;
use crate::dashboard::{self, DashboardOptions};
use crate::dates;
use crate::error::{PasarError, Result};
use crate::table::PriceTable;

#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Earlier date of the comparison.
    pub start: NaiveDate,
    /// Later date of the comparison.
    pub end: NaiveDate,
    /// Commodity names to keep; `None` keeps every row.
    pub commodities: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub table: PriceTable,
    pub prev: String,
    pub curr: String,
    /// `Variant Name`, previous and current price columns as text.
    pub text_table: String,
    pub html: String,
    pub file_name: String,
}

impl Report {
    /// Build the report from an already fetched table.
    pub fn from_table(table: &PriceTable, request: &ReportRequest, options: &DashboardOptions) -> Result<Self> {
        let table = match &request.commodities {
            Some(names) => table.filter_names(names),
            None => table.clone(),
        };
        if table.is_empty() {
            return Err(PasarError::InvalidArgument(
                "no rows to report; select at least one commodity".into(),
            ));
        }

        let prev = dates::iso(request.start);
        let curr = dates::iso(request.end);
        if !table.has_date(&prev) || !table.has_date(&curr) {
            warn!(%prev, %curr, "Requested dates not in API response");
            return Err(PasarError::DatesUnavailable {
                prev,
                curr,
                available: table.dates().to_vec(),
            });
        }

        let text_table = table.to_text(&[VARIANT_NAME_COLUMN, prev.as_str(), curr.as_str()])?;
        let html = dashboard::try_render_html(&table, &prev, &curr, options)?;
        let file_name = dashboard::export_file_name(&prev, &curr);

        Ok(Self {
            table,
            prev,
            curr,
            text_table,
            html,
            file_name,
        })
    }
}

/// Fetch enough history to cover `request.start` and build the report.
///
/// `today` anchors the fetch window; both requested dates must be weekdays.
pub fn build_report(
    client: &mut PasarClient,
    request: &ReportRequest,
    today: NaiveDate,
    options: &DashboardOptions,
) -> Result<Report> {
    dates::ensure_weekday(request.start)?;
    dates::ensure_weekday(request.end)?;

    let days = dates::lookback_days(today, request.start);
    info!(days, start = %request.start, "Fetching report window");
    let table = client.get_data_at(today, days, None);
    if table.is_empty() {
        return Err(PasarError::Api("no data returned for the requested window".into()));
    }
    Report::from_table(&table, request, options)
}
