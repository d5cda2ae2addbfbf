use anyhow::Context;
use log::info;
use macro_dashboard_views::views::quota::QuotaView;
use macro_dashboard_views::views::treasury::TreasuryExplorer;
use macro_dashboard_views::{ApiClient, DashboardConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("Logger initialized. Rendering dashboard...");

    let config = DashboardConfig::from_env().context("invalid dashboard configuration")?;
    let client = ApiClient::new(&config)?;
    info!("Using API at {}", client.base_url());

    let (quota, treasury) = tokio::join!(
        QuotaView::load(&client, config.history_days),
        TreasuryExplorer::mount(&client, &config)
    );

    println!("{}", quota.render());
    println!();
    println!("{}", treasury.render());
    Ok(())
}
