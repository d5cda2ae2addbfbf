mod common;

use macro_dashboard_views::models::{Period, SecurityTerm};
use macro_dashboard_views::services::formatting::{Tone, Trend};
use macro_dashboard_views::views::query::QueryState;
use macro_dashboard_views::views::quota::QuotaView;
use macro_dashboard_views::views::treasury::{ExplorerEvent, TreasuryExplorer};
use macro_dashboard_views::DashboardConfig;

#[tokio::test]
async fn quota_view_renders_over_http() {
    let base = common::spawn_backend().await;
    let client = common::client_for(&base);

    let view = QuotaView::load(&client, 7).await;
    let stats = view.stats().unwrap();
    assert_eq!(stats.remaining_tone, Tone::Success);
    assert_eq!(stats.percentage_used, "76.0%");

    assert_eq!(view.survey_rows()[0].join(" | "), "CES | 120 | 45");

    let rendered = view.render();
    assert!(rendered.contains("Remaining: 120 [ok]"));
    assert!(rendered.contains("-- By Script --"));
    assert!(rendered.contains("weekly_claims"));
}

#[tokio::test]
async fn explorer_walkthrough_over_http() {
    let base = common::spawn_backend().await;
    let client = common::client_for(&base);
    let config = DashboardConfig {
        api_base_url: base.clone(),
        ..DashboardConfig::default()
    };

    let mut explorer = TreasuryExplorer::mount(&client, &config).await;
    let cards = explorer.term_cards();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0].trend, Trend::Down);
    assert_eq!(cards[1].trend, Trend::Up);
    assert!(cards[1].selected);
    assert_eq!(cards[2].trend, Trend::Flat);
    assert_eq!(cards[2].bid_to_cover, "N/A");
    assert_eq!(explorer.upcoming, QueryState::Empty);

    let chart = explorer.chart_points();
    assert_eq!(chart[0].date, "2024-01-15");
    assert_eq!(chart[0].yield_pct, Some(4.123));
    assert_eq!(chart[0].amount, Some(58.0));
    assert_eq!(chart[1].date, "10-Year/5");

    explorer.dispatch(ExplorerEvent::SelectTerm(SecurityTerm::TwoYear)).await;
    assert_eq!(explorer.state.period, Period::FiveYears);
    assert_eq!(explorer.chart_points()[1].date, "2-Year/5");
    assert_eq!(explorer.auctions.data().unwrap()[0].security_term, "2-Year");

    explorer.dispatch(ExplorerEvent::SelectPeriod(Period::TwentyYears)).await;
    assert_eq!(explorer.chart_points()[1].date, "2-Year/20");
    assert_eq!(explorer.state.selected_term, SecurityTerm::TwoYear);

    let first = explorer.auctions.data().unwrap()[0].clone();
    explorer.dispatch(ExplorerEvent::OpenAuction(first)).await;
    assert!(explorer.render().contains("Total Tendered    $105.4B"));

    explorer.dispatch(ExplorerEvent::CloseDetail).await;
    assert!(!explorer.state.dialog_open);
    assert!(explorer.state.selected_auction.is_some());
    assert!(explorer.detail.data().is_some());

    explorer.dispatch(ExplorerEvent::ClearSelection).await;
    assert!(explorer.state.selected_auction.is_none());
    assert_eq!(explorer.detail, QueryState::Idle);
}
