//! Async wrapper around [`PasarClient`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every client operation on Tokio's blocking pool via
//! [`tokio::task::spawn_blocking`], so the single blocking POST never stalls
//! the event loop.
//!
//! # Example
//!
//! ```ignore
//! use pasar_sdk::AsyncPasarClient;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AsyncPasarClient::new(pasar_sdk::PasarClient::builder().build().unwrap());
//!     let table = client.run(|c| Ok(c.get_data(4, None))).await.unwrap();
//!     println!("{} commodities", table.len());
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{PasarError, Result};
use crate::models::VariantSelection;
use crate::table::PriceTable;
use crate::PasarClient;

/// Async wrapper around [`PasarClient`].
///
/// The client is guarded by a [`Mutex`] since every fetch mutates its
/// lazily created HTTP pool and last-table cache.
#[derive(Clone)]
pub struct AsyncPasarClient {
    inner: Arc<Mutex<PasarClient>>,
}

impl AsyncPasarClient {
    pub fn new(client: PasarClient) -> Self {
        Self {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    /// Run a sync client operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PasarClient) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = client
                .lock()
                .map_err(|_| PasarError::InvalidArgument("client lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| PasarError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn select_variants(&self, selection: VariantSelection) -> Result<bool> {
        self.run(move |c| Ok(c.select_variants(selection))).await
    }

    /// Async form of [`PasarClient::get_data`].
    pub async fn get_data(&self, days: i64) -> Result<PriceTable> {
        self.run(move |c| Ok(c.get_data(days, None))).await
    }
}
