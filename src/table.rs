//! Wide-form price table: one row per commodity, one column per date.
//!
//! Built fresh from each API response. Date columns are ISO `YYYY-MM-DD`
//! strings sorted ascending; rows keep the order the API returned them in.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

use tracing::warn;

use crate::config::{VARIANT_NAME_COLUMN, VAR_ID_COLUMN};
use crate::error::{PasarError, Result};
use crate::models::VariantPrices;

/// One commodity and its price per table date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    /// Empty in the `Var ID` column when `None`.
    pub variant_id: Option<u32>,
    pub variant_name: String,
    /// Aligned with [`PriceTable::dates`]; missing observations are 0.
    pub prices: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    dates: Vec<String>,
    rows: Vec<PriceRow>,
}

impl PriceTable {
    /// Reshape API records into the wide table.
    ///
    /// Empty input yields an empty table with no columns. A variant that
    /// reports the same date twice keeps the later price.
    pub fn from_variants(items: &[VariantPrices]) -> Self {
        if items.is_empty() {
            return Self::default();
        }

        let dates: Vec<String> = items
            .iter()
            .flat_map(|item| item.daftar_harga.iter())
            .filter_map(|entry| entry.date.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let rows = items
            .iter()
            .map(|item| {
                let observed: HashMap<&str, i64> = item
                    .daftar_harga
                    .iter()
                    .filter_map(|e| e.date.as_deref().map(|d| (d, e.harga)))
                    .collect();
                PriceRow {
                    variant_id: item.variant_id,
                    variant_name: item.variant.clone(),
                    prices: dates
                        .iter()
                        .map(|d| observed.get(d.as_str()).copied().unwrap_or(0))
                        .collect(),
                }
            })
            .collect();

        Self { dates, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    /// Date columns, ascending.
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Full header: `Var ID`, `Variant Name`, then every date.
    pub fn columns(&self) -> Vec<String> {
        if self.rows.is_empty() && self.dates.is_empty() {
            return Vec::new();
        }
        let mut cols = vec![VAR_ID_COLUMN.to_string(), VARIANT_NAME_COLUMN.to_string()];
        cols.extend(self.dates.iter().cloned());
        cols
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns().iter().any(|c| c == name)
    }

    pub fn has_date(&self, date: &str) -> bool {
        self.date_index(date).is_some()
    }

    fn date_index(&self, date: &str) -> Option<usize> {
        self.dates.binary_search_by(|d| d.as_str().cmp(date)).ok()
    }

    /// Price of `row` on `date`, or `None` if the date is not a column.
    pub fn price(&self, row: &PriceRow, date: &str) -> Option<i64> {
        self.date_index(date)
            .map(|i| row.prices.get(i).copied().unwrap_or(0))
    }

    /// Distinct commodity names in row order.
    pub fn variant_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter(|r| seen.insert(r.variant_name.as_str()))
            .map(|r| r.variant_name.clone())
            .collect()
    }

    /// Keep only the rows whose name is in `names`.
    ///
    /// An empty selection yields an empty table.
    pub fn filter_names<S: AsRef<str>>(&self, names: &[S]) -> Self {
        if names.is_empty() {
            warn!("No commodity selected; select at least one");
            return Self::default();
        }
        let wanted: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        Self {
            dates: self.dates.clone(),
            rows: self
                .rows
                .iter()
                .filter(|r| wanted.contains(r.variant_name.as_str()))
                .cloned()
                .collect(),
        }
    }

    fn cell(&self, row: &PriceRow, column: &str) -> Option<String> {
        match column {
            VAR_ID_COLUMN => Some(var_id_cell(row)),
            VARIANT_NAME_COLUMN => Some(row.variant_name.clone()),
            date => self.price(row, date).map(|p| p.to_string()),
        }
    }

    /// Render the selected columns as a fixed-width text table.
    pub fn to_text(&self, columns: &[&str]) -> Result<String> {
        if let Some(missing) = columns.iter().find(|c| !self.has_column(c)) {
            return Err(PasarError::MissingColumn(missing.to_string()));
        }

        let mut grid: Vec<Vec<String>> = vec![columns.iter().map(|c| c.to_string()).collect()];
        for row in &self.rows {
            grid.push(
                columns
                    .iter()
                    .map(|c| self.cell(row, c).unwrap_or_default())
                    .collect(),
            );
        }

        let widths: Vec<usize> = (0..columns.len())
            .map(|i| grid.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
            .collect();

        let mut out = String::new();
        for line in &grid {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .zip(columns)
                .map(|((cell, &w), col)| {
                    if *col == VARIANT_NAME_COLUMN {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", cells.join("  ").trim_end());
        }
        Ok(out)
    }

    // -- CSV ---------------------------------------------------------------

    /// Write the table as CSV with a header row.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(self.columns())?;
        for row in &self.rows {
            let mut record = vec![var_id_cell(row), row.variant_name.clone()];
            record.extend(row.prices.iter().map(|p| p.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a table previously written by [`write_csv`](Self::write_csv).
    ///
    /// Price cells that do not parse as integers are read as 0.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        if headers.get(0) != Some(VAR_ID_COLUMN) || headers.get(1) != Some(VARIANT_NAME_COLUMN) {
            return Err(PasarError::InvalidArgument(format!(
                "CSV header must start with '{}', '{}'",
                VAR_ID_COLUMN, VARIANT_NAME_COLUMN
            )));
        }
        let dates: Vec<String> = headers.iter().skip(2).map(|h| h.to_string()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        sorted.dedup();
        if sorted != dates {
            return Err(PasarError::InvalidArgument(
                "CSV date columns must be unique and ascending".into(),
            ));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(PriceRow {
                variant_id: record.get(0).and_then(|v| v.trim().parse().ok()),
                variant_name: record.get(1).unwrap_or("").to_string(),
                prices: (0..dates.len())
                    .map(|i| {
                        record
                            .get(i + 2)
                            .and_then(|v| v.trim().parse().ok())
                            .unwrap_or(0)
                    })
                    .collect(),
            });
        }

        Ok(Self { dates, rows })
    }
}

fn var_id_cell(row: &PriceRow) -> String {
    row.variant_id.map(|id| id.to_string()).unwrap_or_default()
}
