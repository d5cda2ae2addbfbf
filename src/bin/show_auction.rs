// src/bin/show_auction.rs
use anyhow::{bail, Context};
use macro_dashboard_views::models::AuctionId;
use macro_dashboard_views::services::treasury::TreasuryApi;
use macro_dashboard_views::views::treasury::render_detail;
use macro_dashboard_views::{ApiClient, DashboardConfig};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(raw_id) = env::args().nth(1) else {
        bail!("usage: show_auction <auction_id>");
    };
    let auction_id = AuctionId::from(raw_id.as_str());

    let config = DashboardConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let detail = client
        .get_auction_detail(&auction_id)
        .await
        .with_context(|| format!("failed to load auction {}", auction_id))?;

    println!("Auction {}", auction_id);
    println!("{}", render_detail(&detail));
    Ok(())
}
