// src/bin/export_charts.rs
use anyhow::Context;
use log::{info, warn};
use macro_dashboard_views::services::charts::{quota_history_svg, yield_history_svg};
use macro_dashboard_views::services::quota::QuotaApi;
use macro_dashboard_views::services::treasury::TreasuryApi;
use macro_dashboard_views::views::treasury::project_chart;
use macro_dashboard_views::{ApiClient, DashboardConfig};
use std::env;
use std::fs;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let out_dir = PathBuf::from(env::args().nth(1).unwrap_or_else(|| {
        warn!("No output directory given, writing to the current directory");
        ".".to_string()
    }));
    fs::create_dir_all(&out_dir)?;

    let config = DashboardConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let term = config.default_term;
    let period = config.default_period;

    let (history, yields) = tokio::join!(
        client.get_history(config.history_days),
        client.get_yield_history(term, period.years())
    );

    let quota_svg = quota_history_svg(&history?)?;
    let quota_path = out_dir.join("quota_history.svg");
    fs::write(&quota_path, quota_svg).with_context(|| format!("writing {}", quota_path.display()))?;
    info!("Wrote {}", quota_path.display());

    let yield_svg = yield_history_svg(term, period, &project_chart(&yields?))?;
    let yield_path = out_dir.join(format!("yield_history_{}.svg", term));
    fs::write(&yield_path, yield_svg).with_context(|| format!("writing {}", yield_path.display()))?;
    info!("Wrote {}", yield_path.display());

    Ok(())
}
