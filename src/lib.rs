//! Pasar SDK for Rust.
//!
//! Fetches daily commodity prices for one regional market from the
//! Kemendag SP2KP reporting API, reshapes them into a wide table (one row
//! per commodity, one column per date), and renders a two-date comparison
//! dashboard as standalone HTML.
//!
//! # Quick start
//!
//! ```no_run
//! use pasar_sdk::{PasarClient, VariantSelection};
//!
//! let mut client = PasarClient::builder().build().unwrap();
//!
//! // Beras Medium and Cabe Merah only
//! client.select_variants(VariantSelection::Ids(vec![52, 9]));
//! let table = client.get_data(100, None);
//!
//! let dates = table.dates();
//! if let [.., prev, curr] = dates {
//!     let html = pasar_sdk::dashboard::render_html(&table, prev, curr, &Default::default());
//!     println!("{html}");
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod models;
pub mod report;
pub mod table;

#[cfg(feature = "async")]
pub use async_client::AsyncPasarClient;
pub use client::{PasarClient, PasarClientBuilder};
pub use config::MarketParams;
pub use dashboard::{DashboardOptions, Trend};
pub use error::{PasarError, Result};
pub use models::{PriceEntry, VariantPrices, VariantSelection};
pub use report::{Report, ReportRequest};
pub use table::{PriceRow, PriceTable};
