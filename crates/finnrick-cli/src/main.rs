use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::Handle;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use finnrick_core::catalog::known_products;
use finnrick_core::render::render;
use finnrick_core::widget::PageScanner;
use finnrick_core::{FinnrickWidget, RatingFetcher, RatingRecord, WidgetConfig};

use args::{Args, Command, OutputFormat};
use page::PageSpec;

mod args;
mod page;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    debug!(?config, "resolved widget config");

    match args.command {
        Command::Rating { product_id, format } => {
            let fetcher = RatingFetcher::from_config(&config);
            let record = fetcher.fetch_rating(Some(&product_id)).await;
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&record)? + "\n",
                OutputFormat::Text => render_text(&record),
                OutputFormat::Html => render(&record)? + "\n",
            };
            print!("{output}");
        }
        Command::Page { path } => {
            let document = Arc::new(PageSpec::load(&path)?.build()?);
            let scanner = PageScanner::new(RatingFetcher::from_config(&config), Handle::current());
            let widget = FinnrickWidget::new(Arc::clone(&document), scanner);

            for handle in widget.refresh() {
                let state = handle.await.context("widget task failed")?;
                debug!(%state, "widget settled");
            }
            print!("{}", document.to_html()?);
        }
        Command::Products => {
            for (product_id, catalog_id) in known_products() {
                println!("{product_id}\t{catalog_id}");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Config file first, then flag/env overrides.
fn load_config(args: &Args) -> Result<WidgetConfig> {
    let mut config = match &args.config {
        Some(path) => WidgetConfig::load(path)?,
        None => WidgetConfig::default(),
    };
    if let Some(base_url) = &args.base_url {
        config.api_base_url = base_url.clone();
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    Ok(config)
}

fn render_text(record: &RatingRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("Grade: {} ({})\n", record.grade, record.label));
    out.push_str(&format!("Company: {}\n", record.company_name));
    out.push_str(&format!("Product: {}\n", record.product_name));
    out.push_str(&format!("Tested {} Samples\n", record.test_count));
    out.push_str(&format!("Last test {}\n", record.last_test_date));
    out
}
