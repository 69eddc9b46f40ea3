//! Comparison dashboard: one styled card per commodity contrasting two dates.

use std::fmt::Write as _;

use crate::config;
use crate::dates;
use crate::error::{PasarError, Result};
use crate::table::PriceTable;

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Direction of the price change between the two compared dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increase(u64),
    Decrease(u64),
    Stable,
}

impl Trend {
    pub fn classify(prev: i64, curr: i64) -> Self {
        // The difference of two i64 values always fits in i128, and its
        // magnitude in u64.
        let diff = i128::from(curr) - i128::from(prev);
        let magnitude = u64::try_from(diff.unsigned_abs()).unwrap_or(u64::MAX);
        if diff > 0 {
            Trend::Increase(magnitude)
        } else if diff < 0 {
            Trend::Decrease(magnitude)
        } else {
            Trend::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Increase(_) => "increase",
            Trend::Decrease(_) => "decrease",
            Trend::Stable => "stable",
        }
    }

    /// `+200` for an increase, `200` for a decrease, `0` when stable.
    pub fn delta_text(&self) -> String {
        match self {
            Trend::Increase(d) => format!("+{d}"),
            Trend::Decrease(d) => d.to_string(),
            Trend::Stable => "0".to_string(),
        }
    }

    /// Background of the current-price pill. Rising food prices are red.
    pub fn color(&self) -> &'static str {
        match self {
            Trend::Increase(_) => "#ff5252",
            Trend::Decrease(_) => "#4caf50",
            Trend::Stable => "#5c6bc0",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Increase(_) => "▲",
            Trend::Decrease(_) => "▼",
            Trend::Stable => "-",
        }
    }

    fn indicator(&self) -> String {
        match self {
            Trend::Increase(d) => format!("+ Rp {}", group_thousands(*d)),
            Trend::Decrease(d) => format!("- Rp {}", group_thousands(*d)),
            Trend::Stable => "Stabil".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub name: String,
    pub prev: i64,
    pub curr: i64,
    pub trend: Trend,
}

/// Build one card per row comparing `col_prev` with `col_curr`.
pub fn cards(table: &PriceTable, col_prev: &str, col_curr: &str) -> Result<Vec<Card>> {
    for col in [col_prev, col_curr] {
        if !table.has_date(col) {
            return Err(PasarError::MissingColumn(col.to_string()));
        }
    }
    Ok(table
        .rows()
        .iter()
        .map(|row| {
            let prev = table.price(row, col_prev).unwrap_or(0);
            let curr = table.price(row, col_curr).unwrap_or(0);
            Card {
                name: row.variant_name.clone(),
                prev,
                curr,
                trend: Trend::classify(prev, curr),
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// HTML rendering
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub title: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            title: config::DEFAULT_TITLE.to_string(),
        }
    }
}

/// Render the standalone dashboard document.
///
/// A missing column yields an inline error heading instead of the card grid.
pub fn render_html(table: &PriceTable, col_prev: &str, col_curr: &str, options: &DashboardOptions) -> String {
    match try_render_html(table, col_prev, col_curr, options) {
        Ok(html) => html,
        Err(_) => format!(
            "<h3 style='color:red; text-align:center;'>Error: Kolom {} atau {} tidak ditemukan.</h3>",
            escape(col_prev),
            escape(col_curr)
        ),
    }
}

pub fn try_render_html(
    table: &PriceTable,
    col_prev: &str,
    col_curr: &str,
    options: &DashboardOptions,
) -> Result<String> {
    let cards = cards(table, col_prev, col_curr)?;
    let prev_label = dates::short_label(col_prev);
    let curr_label = dates::short_label(col_curr);

    let mut grid = String::new();
    for card in &cards {
        let _ = write!(
            grid,
            r#"
        <div class="card">
            <div class="card-header">{name}</div>
            <div class="card-body">
                <div class="price-area">
                    <div class="price-pill neutral">
                        <span class="date-tag">{prev_label}</span>
                        <span class="price-tag small">{prev}</span>
                    </div>
                    <div class="price-pill dynamic" style="background-color: {color};">
                        <span class="date-tag">{curr_tag}</span>
                        <span class="price-tag">{curr}</span>
                        <div class="trend-indicator">{arrow} {indicator}</div>
                    </div>
                </div>
            </div>
        </div>"#,
            name = escape(&card.name),
            prev_label = escape(&prev_label),
            prev = rupiah(card.prev),
            color = card.trend.color(),
            curr_tag = escape(&curr_label.to_uppercase()),
            curr = rupiah(card.curr),
            arrow = card.trend.arrow(),
            indicator = card.trend.indicator(),
        );
    }

    let year: String = col_curr.chars().take(4).collect();
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
    <h1 style="color:#283593">{title}</h1>
    <p style="color:#666">Periode {prev_label} - {curr_label} {year}</p>
    <div class="container">{grid}
    </div>
</body>
</html>
"#,
        title = escape(&options.title),
        prev_label = escape(&prev_label),
        curr_label = escape(&curr_label),
        year = escape(&year),
        style = STYLE,
    ))
}

/// File name offered for the exported dashboard.
pub fn export_file_name(col_prev: &str, col_curr: &str) -> String {
    format!("Harga_Pasar_{col_prev}_to_{col_curr}.html")
}

/// `1200` -> `Rp 1,200`.
pub fn rupiah(amount: i64) -> String {
    let grouped = group_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
        @import url('https://fonts.googleapis.com/css2?family=Poppins:wght@500;700&display=swap');
        body { font-family: 'Poppins', sans-serif; background-color: #f0f2f5; padding: 20px; text-align: center; }
        .container { display: grid; grid-template-columns: repeat(auto-fill, minmax(250px, 1fr)); gap: 20px; max-width: 1200px; margin: 0 auto; }
        .card { background-color: #283593; border-radius: 25px; padding: 15px; box-shadow: 0 4px 15px rgba(0,0,0,0.2); display: flex; flex-direction: column; height: 140px; }
        .card-header { color: white; font-weight: 700; font-size: 16px; margin-bottom: 15px; height: 40px; display: flex; align-items: center; justify-content: center; line-height: 1.2; overflow: hidden; }
        .card-body { display: flex; flex: 1; justify-content: center; align-items: center; }
        .price-area { width: 100%; display: flex; flex-direction: column; align-items: center; gap: 10px; justify-content: center; }
        .price-pill { border-radius: 12px; padding: 8px 15px; display: flex; justify-content: space-between; align-items: center; box-shadow: 0 2px 5px rgba(0,0,0,0.2); width: 100%; box-sizing: border-box; }
        .price-pill.neutral { background-color: rgba(255,255,255,0.2); }
        .date-tag { font-size: 11px; color: rgba(255,255,255,0.8); text-transform: uppercase; letter-spacing: 0.5px; font-weight: 600; }
        .price-tag { font-size: 17.5px; font-weight: 700; color: white; }
        .price-tag.small { font-size: 20px; color: rgba(255,255,255,0.9); }
        .trend-indicator { font-size: 11px; font-weight: 700; color: rgba(0,0,0,0.4); background-color: rgba(255,255,255,0.9); padding: 2px 6px; border-radius: 4px; margin-left: 10px; display: inline-block; }
    "#;
