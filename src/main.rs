//! Retail Insights - a terminal dashboard for retail order analytics.

use retail_insights::catalog;
use retail_insights::cli::Cli;
use retail_insights::config::Config;
use retail_insights::dashboard::Dashboard;
use retail_insights::error::Result;
use retail_insights::{logging, tui};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env before clap reads the dataset variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();

    if cli.headless || cli.list {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    cli.validate_headless()?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_overrides(cli.flat_db.as_deref(), cli.normalized_db.as_deref());

    if cli.list {
        print!("{}", catalog_listing());
        return Ok(0);
    }

    info!(
        "Datasets: flat={} normalized={}",
        config.datasets.flat.display(),
        config.datasets.normalized.display()
    );

    let mut dashboard = Dashboard::new(config);
    dashboard.prepare().await;

    if cli.headless {
        return tui::headless::run_headless(&cli, &dashboard).await;
    }

    tui::run(&dashboard).await?;
    Ok(0)
}

/// Both catalogs, one entry per line under each heading.
fn catalog_listing() -> String {
    let mut out = String::new();
    for catalog in catalog::all() {
        out.push_str(&format!("{} ({})\n", catalog.heading, catalog.dataset.as_str()));
        for entry in catalog.entries {
            out.push_str(&format!("  {:<34} {}\n", entry.id, entry.title));
        }
    }
    out
}
