//! `pasar` - fetch market prices and export the comparison dashboard.
//!
//! # Commands
//!
//! - `pasar fetch --days 4 --output prices.csv` - fetch and persist the table
//! - `pasar report --start 2024-03-01 --end 2024-03-08` - compare two dates
//! - `pasar render --csv prices.csv --prev .. --curr ..` - dashboard from a saved file

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pasar_sdk::config::{self, VARIANT_NAME_COLUMN};
use pasar_sdk::{dashboard, dates, report, DashboardOptions, PasarClient, PriceTable, ReportRequest};

#[derive(Parser)]
#[command(name = "pasar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API endpoint
    #[arg(long, global = true, env = "PASAR_ENDPOINT", default_value = config::API_URL)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Dashboard heading
    #[arg(long, global = true, default_value = config::DEFAULT_TITLE)]
    title: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the last N days and print or save the price table
    Fetch {
        #[arg(short, long, default_value_t = config::DEFAULT_WINDOW_DAYS)]
        days: i64,

        /// `all` or a comma-separated list of variant ids
        #[arg(short, long, default_value = "all")]
        variants: String,

        /// CSV output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare prices between two weekdays and export the HTML dashboard
    Report {
        /// Earlier date (YYYY-MM-DD); defaults to the first of this month
        #[arg(short, long)]
        start: Option<String>,

        /// Later date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        end: Option<String>,

        /// `all` or a comma-separated list of variant ids
        #[arg(short, long, default_value = "all")]
        variants: String,

        /// Commodity name to include (repeatable); all when omitted
        #[arg(short, long = "commodity")]
        commodities: Vec<String>,

        /// HTML output path; defaults to Harga_Pasar_<start>_to_<end>.html
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the dashboard from a previously saved CSV
    Render {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        prev: String,

        #[arg(long)]
        curr: String,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let options = DashboardOptions { title: cli.title.clone() };
    let mut client = PasarClient::builder()
        .endpoint(cli.endpoint.clone())
        .timeout(std::time::Duration::from_secs(cli.timeout))
        .build()?;

    match cli.command {
        Commands::Fetch { days, variants, output } => {
            if !client.select_variants_str(&variants) {
                bail!("invalid --variants '{variants}'; use 'all' or a list of ids");
            }
            let table = client.get_data(days, output.as_deref());
            print_table(&table)?;
        }
        Commands::Report {
            start,
            end,
            variants,
            commodities,
            output,
        } => {
            if !client.select_variants_str(&variants) {
                bail!("invalid --variants '{variants}'; use 'all' or a list of ids");
            }
            let today = chrono::Local::now().date_naive();
            let start = match start {
                Some(raw) => dates::parse_iso(&raw)?,
                None => dates::default_start(today),
            };
            let end = match end {
                Some(raw) => dates::parse_iso(&raw)?,
                None => today,
            };
            let request = ReportRequest {
                start,
                end,
                commodities: (!commodities.is_empty()).then_some(commodities),
            };
            let report = report::build_report(&mut client, &request, today, &options)?;
            print!("{}", report.text_table);
            let path = output.unwrap_or_else(|| PathBuf::from(&report.file_name));
            fs::write(&path, &report.html)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Saved dashboard");
        }
        Commands::Render { csv, prev, curr, output } => {
            let table = PriceTable::read_csv(&csv)
                .with_context(|| format!("reading {}", csv.display()))?;
            let html = dashboard::try_render_html(&table, &prev, &curr, &options)?;
            print!("{}", table.to_text(&[VARIANT_NAME_COLUMN, prev.as_str(), curr.as_str()])?);
            let path = output.unwrap_or_else(|| PathBuf::from(dashboard::export_file_name(&prev, &curr)));
            fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "Saved dashboard");
        }
    }

    Ok(())
}

fn print_table(table: &PriceTable) -> anyhow::Result<()> {
    if table.is_empty() {
        bail!("no data returned");
    }
    let columns = table.columns();
    let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
    print!("{}", table.to_text(&refs)?);
    Ok(())
}
