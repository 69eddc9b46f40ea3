//! HTTP client for the SP2KP daily average-price export.
//!
//! Owns the connection parameters (endpoint, fixed headers, market fields)
//! and the current commodity filter. Each fetch is a single multipart POST;
//! failures are logged and never retried.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{error, info, warn};

use crate::config::{self, MarketParams};
use crate::dates;
use crate::error::{PasarError, Result};
use crate::models::{ApiResponse, VariantPrices, VariantSelection};
use crate::table::PriceTable;

// ---------------------------------------------------------------------------
// PasarClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PasarClient`].
pub struct PasarClientBuilder {
    endpoint: String,
    timeout: Duration,
    market: MarketParams,
    user_agent: String,
    selection: VariantSelection,
}

impl Default for PasarClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: config::API_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            market: MarketParams::default(),
            user_agent: config::USER_AGENT.to_string(),
            selection: VariantSelection::All,
        }
    }
}

impl PasarClientBuilder {
    /// Override the export endpoint URL.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 20 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Query a different region or market. Defaults to Pasar Induk, Bondowoso.
    pub fn market(mut self, market: MarketParams) -> Self {
        self.market = market;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Initial commodity filter. Defaults to [`VariantSelection::All`].
    pub fn variants(mut self, selection: VariantSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Build the client and its HTTP connection pool.
    pub fn build(self) -> Result<PasarClient> {
        if self.endpoint.trim().is_empty() {
            return Err(PasarError::InvalidArgument("endpoint must not be empty".into()));
        }
        let variant_ids = match &self.selection {
            VariantSelection::Ids(ids) if ids.is_empty() => {
                return Err(PasarError::InvalidArgument(
                    "variant id list must not be empty".into(),
                ))
            }
            selection => selection.to_param(),
        };
        let http = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()?;
        Ok(PasarClient {
            endpoint: self.endpoint,
            market: self.market,
            variant_ids,
            http,
            last_table: None,
        })
    }
}

// ---------------------------------------------------------------------------
// PasarClient
// ---------------------------------------------------------------------------

pub struct PasarClient {
    endpoint: String,
    market: MarketParams,
    variant_ids: String,
    http: Client,
    last_table: Option<PriceTable>,
}

impl PasarClient {
    pub fn builder() -> PasarClientBuilder {
        PasarClientBuilder::default()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn market(&self) -> &MarketParams {
        &self.market
    }

    // -- Variant selection -------------------------------------------------

    /// Replace the commodity filter sent with subsequent requests.
    ///
    /// [`VariantSelection::All`] restores the full default id list. An empty
    /// id list is ignored with a warning.
    pub fn select_variants(&mut self, selection: VariantSelection) -> bool {
        match selection {
            VariantSelection::Ids(ids) if ids.is_empty() => {
                warn!("Invalid variant selection: empty id list; use a list of ids or 'all'");
                false
            }
            VariantSelection::All => {
                self.variant_ids = VariantSelection::All.to_param();
                info!("Variant selection reset to ALL");
                true
            }
            selection => {
                self.variant_ids = selection.to_param();
                info!(variant_ids = %self.variant_ids, "Variant selection updated");
                true
            }
        }
    }

    /// Parse `all` or a comma-separated id list and apply it.
    ///
    /// Invalid input leaves the filter untouched and logs a warning.
    pub fn select_variants_str(&mut self, raw: &str) -> bool {
        match VariantSelection::parse(raw) {
            Some(selection) => self.select_variants(selection),
            None => {
                warn!(input = raw, "Invalid variant selection; use a list of ids or 'all'");
                false
            }
        }
    }

    /// The comma-joined ids currently sent as `variant_ids`.
    pub fn variant_filter(&self) -> &str {
        &self.variant_ids
    }

    /// Every multipart field of a request for `[start, end]`.
    pub fn form_fields(&self, start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
        let mut fields = self.market.fields();
        fields.push(("variant_ids", self.variant_ids.clone()));
        fields.push(("start_date", dates::iso(start)));
        fields.push(("end_date", dates::iso(end)));
        fields
    }

    // -- Fetch -------------------------------------------------------------

    /// Issue one POST for `[start, end]` and return the `data` array.
    ///
    /// Non-200 responses map to [`PasarError::Status`]; a 200 whose status
    /// flag is not `"success"` maps to [`PasarError::Api`].
    pub fn try_fetch_raw(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<VariantPrices>> {
        info!(start = %start, end = %end, "Fetching from API");

        let form = self
            .form_fields(start, end)
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let resp = self.http.post(&self.endpoint).multipart(form).send()?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(PasarError::Status(status.as_u16()));
        }

        let body: ApiResponse = resp.json()?;
        if !body.is_success() {
            return Err(PasarError::Api(
                body.message.unwrap_or_else(|| "no message".to_string()),
            ));
        }
        Ok(body.data)
    }

    /// Like [`try_fetch_raw`](Self::try_fetch_raw), but logs any failure
    /// and returns `None`.
    pub fn fetch_raw(&self, start: NaiveDate, end: NaiveDate) -> Option<Vec<VariantPrices>> {
        match self.try_fetch_raw(start, end) {
            Ok(data) => Some(data),
            Err(PasarError::Status(code)) => {
                error!(status = code, "HTTP error");
                None
            }
            Err(PasarError::Api(message)) => {
                warn!(%message, "API error");
                None
            }
            Err(e) => {
                error!(error = %e, "Connection error");
                None
            }
        }
    }

    // -- Reshape and persist ----------------------------------------------

    /// Build a [`PriceTable`] and remember it as [`last_table`](Self::last_table).
    pub fn reshape(&mut self, raw: &[VariantPrices]) -> PriceTable {
        let table = PriceTable::from_variants(raw);
        self.last_table = Some(table.clone());
        table
    }

    /// The table built by the most recent [`reshape`](Self::reshape).
    pub fn last_table(&self) -> Option<&PriceTable> {
        self.last_table.as_ref()
    }

    /// Write `table` to CSV. Returns `false` (after logging) when the table
    /// is empty or the write fails.
    pub fn save_csv<P: AsRef<Path>>(&self, table: &PriceTable, path: P) -> bool {
        let path = path.as_ref();
        if table.is_empty() {
            warn!("No data to save");
            return false;
        }
        match table.write_csv(path) {
            Ok(()) => {
                info!(path = %path.display(), "Saved CSV");
                true
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Save error");
                false
            }
        }
    }

    // -- Convenience -------------------------------------------------------

    /// Fetch the last `days` days up to today, reshape, and optionally save.
    pub fn get_data(&mut self, days: i64, save_to: Option<&Path>) -> PriceTable {
        let today = chrono::Local::now().date_naive();
        self.get_data_at(today, days, save_to)
    }

    /// [`get_data`](Self::get_data) with an explicit reference day.
    ///
    /// An invalid window is logged and yields an empty table.
    pub fn get_data_at(&mut self, now: NaiveDate, days: i64, save_to: Option<&Path>) -> PriceTable {
        let raw = match dates::window(now, days) {
            Ok((start, end)) => self.fetch_raw(start, end).unwrap_or_default(),
            Err(e) => {
                error!(error = %e, "Invalid fetch window");
                Vec::new()
            }
        };
        let table = self.reshape(&raw);
        if let Some(path) = save_to {
            self.save_csv(&table, path);
        }
        table
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PasarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PasarClient(endpoint={}, market={}/{}, variants=[{}])",
            self.endpoint, self.market.regency_code, self.market.market_id, self.variant_ids
        )
    }
}
