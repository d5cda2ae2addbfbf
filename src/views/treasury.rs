// src/views/treasury.rs
//! Treasury explorer: term cards, yield history, recent and upcoming
//! auctions, and an auction detail panel.

use crate::config::DashboardConfig;
use crate::models::{
    AuctionDetail, AuctionId, AuctionSummary, ChartPoint, Period, SecurityTerm,
    TreasurySnapshotEntry, UpcomingAuction, YieldHistoryPoint,
};
use crate::services::formatting::{
    classify_trend, format_amount, format_billions, format_bps, format_price, format_ratio, format_yield,
    text_or_na, Tone, Trend,
};
use crate::services::treasury::{AuctionQuery, TreasuryApi};
use crate::views::query::QueryState;
use crate::views::table::Table;
use log::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ExplorerEvent {
    SelectTerm(SecurityTerm),
    SelectPeriod(Period),
    OpenAuction(AuctionSummary),
    CloseDetail,
    ReopenDetail,
    ClearSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refetch {
    YieldHistory,
    RecentAuctions,
    AuctionDetail(AuctionId),
}

/// Client-local UI state. Closing the dialog keeps the selected auction so
/// it can be reopened; `ClearSelection` drops both together.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerState {
    pub selected_term: SecurityTerm,
    pub period: Period,
    pub dialog_open: bool,
    pub selected_auction: Option<AuctionSummary>,
    loaded_detail: Option<AuctionId>,
}

impl Default for ExplorerState {
    fn default() -> Self {
        ExplorerState::new(SecurityTerm::default(), Period::default())
    }
}

impl ExplorerState {
    pub fn new(selected_term: SecurityTerm, period: Period) -> Self {
        ExplorerState {
            selected_term,
            period,
            dialog_open: false,
            selected_auction: None,
            loaded_detail: None,
        }
    }

    /// Applies one event and returns the queries it invalidates.
    pub fn apply(&mut self, event: ExplorerEvent) -> Vec<Refetch> {
        match event {
            ExplorerEvent::SelectTerm(term) => {
                if term == self.selected_term {
                    return Vec::new();
                }
                self.selected_term = term;
                vec![Refetch::YieldHistory, Refetch::RecentAuctions]
            }
            ExplorerEvent::SelectPeriod(period) => {
                if period == self.period {
                    return Vec::new();
                }
                self.period = period;
                vec![Refetch::YieldHistory]
            }
            ExplorerEvent::OpenAuction(auction) => {
                let id = auction.auction_id.clone();
                self.selected_auction = Some(auction);
                self.dialog_open = true;
                self.detail_refetch(id)
            }
            ExplorerEvent::CloseDetail => {
                self.dialog_open = false;
                Vec::new()
            }
            ExplorerEvent::ReopenDetail => match &self.selected_auction {
                Some(auction) => {
                    let id = auction.auction_id.clone();
                    self.dialog_open = true;
                    self.detail_refetch(id)
                }
                None => Vec::new(),
            },
            ExplorerEvent::ClearSelection => {
                self.dialog_open = false;
                self.selected_auction = None;
                self.loaded_detail = None;
                Vec::new()
            }
        }
    }

    fn detail_refetch(&mut self, id: AuctionId) -> Vec<Refetch> {
        if self.loaded_detail.as_ref() == Some(&id) {
            return Vec::new();
        }
        self.loaded_detail = Some(id.clone());
        vec![Refetch::AuctionDetail(id)]
    }

    pub fn detail_enabled(&self) -> bool {
        self.selected_auction.is_some()
    }
}

/// One selector card per snapshot entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TermCard {
    pub term: String,
    pub high_yield: String,
    pub change_bps: String,
    pub trend: Trend,
    pub tone: Tone,
    pub bid_to_cover: String,
    pub auction_date: String,
    pub selected: bool,
}

impl TermCard {
    pub fn new(entry: &TreasurySnapshotEntry, selected_term: SecurityTerm) -> Self {
        let trend = classify_trend(entry.yield_change);
        TermCard {
            term: entry.security_term.clone(),
            high_yield: format_yield(entry.high_yield),
            change_bps: format_bps(entry.yield_change),
            trend,
            tone: trend.tone(),
            bid_to_cover: format_ratio(entry.bid_to_cover_ratio),
            auction_date: text_or_na(entry.auction_date.as_deref()),
            selected: entry.security_term == selected_term.as_str(),
        }
    }

    pub fn render(&self) -> String {
        let marker = if self.selected { "*" } else { " " };
        format!(
            "{} {:<8} {:>8}  {} {} bps  b/c {}  {}",
            marker,
            self.term,
            self.high_yield,
            self.trend.arrow(),
            self.change_bps,
            self.bid_to_cover,
            self.auction_date
        )
    }
}

pub fn project_chart(points: &[YieldHistoryPoint]) -> Vec<ChartPoint> {
    points.iter().map(ChartPoint::from).collect()
}

pub struct TreasuryExplorer<'a, A: TreasuryApi + ?Sized> {
    api: &'a A,
    auction_limit: u32,
    pub state: ExplorerState,
    pub snapshot: QueryState<Vec<TreasurySnapshotEntry>>,
    pub history: QueryState<Vec<YieldHistoryPoint>>,
    pub auctions: QueryState<Vec<AuctionSummary>>,
    pub upcoming: QueryState<Vec<UpcomingAuction>>,
    pub detail: QueryState<AuctionDetail>,
}

impl<'a, A: TreasuryApi + ?Sized> TreasuryExplorer<'a, A> {
    pub fn new(api: &'a A, config: &DashboardConfig) -> Self {
        TreasuryExplorer {
            api,
            auction_limit: config.auction_limit,
            state: ExplorerState::new(config.default_term, config.default_period),
            snapshot: QueryState::Loading,
            history: QueryState::Loading,
            auctions: QueryState::Loading,
            upcoming: QueryState::Loading,
            detail: QueryState::Idle,
        }
    }

    /// Issues the four independent queries concurrently.
    pub async fn mount(api: &'a A, config: &DashboardConfig) -> TreasuryExplorer<'a, A> {
        let mut explorer = TreasuryExplorer::new(api, config);
        info!(
            "Mounting treasury explorer for {} over {}",
            explorer.state.selected_term, explorer.state.period
        );

        let (snapshot, history, auctions, upcoming) = tokio::join!(
            api.get_snapshot(),
            explorer.fetch_history(),
            explorer.fetch_auctions(),
            api.get_upcoming()
        );

        explorer.snapshot = QueryState::from_result(snapshot);
        explorer.history = history;
        explorer.auctions = auctions;
        explorer.upcoming = QueryState::from_result(upcoming);
        explorer
    }

    pub async fn dispatch(&mut self, event: ExplorerEvent) {
        debug!("Explorer event: {:?}", event);
        let refetches = self.state.apply(event);

        if self.state.selected_auction.is_none() {
            self.detail = QueryState::Idle;
        }
        if refetches.is_empty() {
            return;
        }
        info!("Refetching {:?}", refetches);

        for refetch in &refetches {
            match refetch {
                Refetch::YieldHistory => self.history = QueryState::Loading,
                Refetch::RecentAuctions => self.auctions = QueryState::Loading,
                Refetch::AuctionDetail(_) => self.detail = QueryState::Loading,
            }
        }

        let wants_history = refetches.contains(&Refetch::YieldHistory);
        let wants_auctions = refetches.contains(&Refetch::RecentAuctions);
        let detail_id = refetches.iter().find_map(|r| match r {
            Refetch::AuctionDetail(id) => Some(id.clone()),
            _ => None,
        });

        let this: &Self = self;
        let (history, auctions, detail) = tokio::join!(
            async {
                if wants_history {
                    Some(this.fetch_history().await)
                } else {
                    None
                }
            },
            async {
                if wants_auctions {
                    Some(this.fetch_auctions().await)
                } else {
                    None
                }
            },
            async {
                match &detail_id {
                    Some(id) => Some(this.fetch_detail(id).await),
                    None => None,
                }
            }
        );

        if let Some(history) = history {
            self.history = history;
        }
        if let Some(auctions) = auctions {
            self.auctions = auctions;
        }
        if let Some(detail) = detail {
            if detail.error().is_some() {
                // Let a reopen retry the failed id.
                self.state.loaded_detail = None;
            }
            self.detail = detail;
        }
    }

    async fn fetch_history(&self) -> QueryState<Vec<YieldHistoryPoint>> {
        let result = self
            .api
            .get_yield_history(self.state.selected_term, self.state.period.years())
            .await;
        if let Err(e) = &result {
            warn!("Yield history for {} failed: {}", self.state.selected_term, e);
        }
        QueryState::from_result(result)
    }

    async fn fetch_auctions(&self) -> QueryState<Vec<AuctionSummary>> {
        let query = AuctionQuery {
            security_term: self.state.selected_term,
            limit: self.auction_limit,
        };
        let result = self.api.get_auctions(query).await;
        if let Err(e) = &result {
            warn!("Recent auctions for {} failed: {}", self.state.selected_term, e);
        }
        QueryState::from_result(result)
    }

    async fn fetch_detail(&self, id: &AuctionId) -> QueryState<AuctionDetail> {
        let result = self.api.get_auction_detail(id).await;
        if let Err(e) = &result {
            warn!("Detail for auction {} failed: {}", id, e);
        }
        QueryState::from_result(result)
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.is_loading()
            || self.history.is_loading()
            || self.auctions.is_loading()
            || self.upcoming.is_loading()
            || self.detail.is_loading()
    }

    pub fn term_cards(&self) -> Vec<TermCard> {
        self.snapshot
            .data()
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| TermCard::new(e, self.state.selected_term))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.history
            .data()
            .map(|points| project_chart(points))
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        let term = self.state.selected_term;
        let mut sections = vec!["== Treasury Auctions ==".to_string()];

        sections.push(self.snapshot.render_with("treasury snapshot", |_| {
            self.term_cards()
                .iter()
                .map(TermCard::render)
                .collect::<Vec<_>>()
                .join("\n")
        }));

        sections.push(format!("-- {} yield history ({}) --", term, self.state.period));
        sections.push(self.history.render_with("yield history", |points| {
            render_chart_table(&project_chart(points))
        }));

        sections.push(format!("-- Recent {} auctions --", term));
        sections.push(self.auctions.render_with("recent auctions", |a| render_auctions(a)));

        sections.push("-- Upcoming auctions --".to_string());
        sections.push(self.upcoming.render_with("upcoming auctions", |u| render_upcoming(u)));

        if self.state.dialog_open {
            sections.push(self.render_detail_panel());
        }

        sections.retain(|s| !s.is_empty());
        sections.join("\n\n")
    }

    pub fn render_detail_panel(&self) -> String {
        let title = match &self.state.selected_auction {
            Some(a) => format!(
                "-- Auction {} ({}, {}) --",
                a.auction_id, a.security_term, a.auction_date
            ),
            None => "-- Auction detail --".to_string(),
        };
        let body = self.detail.render_with("auction detail", render_detail);
        format!("{}\n{}", title, body)
    }
}

fn render_chart_table(points: &[ChartPoint]) -> String {
    let mut table = Table::new(&["Date", "Yield", "Bid/Cover", "Amount"]);
    for p in points {
        table.add_row(vec![
            p.date.clone(),
            format_yield(p.yield_pct),
            format_ratio(p.bid_to_cover),
            format_billions(p.amount),
        ]);
    }
    table.render()
}

fn render_auctions(auctions: &[AuctionSummary]) -> String {
    let mut table = Table::new(&["ID", "Date", "CUSIP", "High Yield", "Coupon", "Bid/Cover", "Amount"]);
    for a in auctions {
        table.add_row(vec![
            a.auction_id.to_string(),
            a.auction_date.clone(),
            text_or_na(a.cusip.as_deref()),
            format_yield(a.high_yield),
            format_yield(a.coupon_rate),
            format_ratio(a.bid_to_cover_ratio),
            format_amount(a.offering_amount),
        ]);
    }
    table.render()
}

fn render_upcoming(upcoming: &[UpcomingAuction]) -> String {
    let mut table = Table::new(&["Term", "Auction Date"]);
    for u in upcoming {
        table.add_row(vec![u.security_term.clone(), u.auction_date.clone()]);
    }
    table.render()
}

pub fn render_detail(detail: &AuctionDetail) -> String {
    let s = &detail.summary;
    let rows: Vec<(&str, String)> = vec![
        ("Security Type", text_or_na(detail.security_type.as_deref())),
        ("Security Term", s.security_term.clone()),
        ("CUSIP", text_or_na(s.cusip.as_deref())),
        ("Auction Date", s.auction_date.clone()),
        ("Issue Date", text_or_na(detail.issue_date.as_deref())),
        ("Maturity Date", text_or_na(detail.maturity_date.as_deref())),
        ("High Yield", format_yield(s.high_yield)),
        ("Median Yield", format_yield(detail.median_yield)),
        ("Low Yield", format_yield(detail.low_yield)),
        ("Coupon Rate", format_yield(s.coupon_rate)),
        ("Price per $100", format_price(detail.price_per_100)),
        ("Bid-to-Cover", format_ratio(s.bid_to_cover_ratio)),
        ("Offering Amount", format_amount(s.offering_amount)),
        ("Total Tendered", format_amount(detail.total_tendered)),
        ("Total Accepted", format_amount(detail.total_accepted)),
        ("Primary Dealers", format_amount(detail.primary_dealer_accepted)),
        ("Direct Bidders", format_amount(detail.direct_bidder_accepted)),
        ("Indirect Bidders", format_amount(detail.indirect_bidder_accepted)),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{:<width$}  {}", k, v, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
