// src/services/treasury.rs
use crate::models::{
    AuctionDetail, AuctionId, AuctionSummary, SecurityTerm, TreasurySnapshotEntry, UpcomingAuction,
    YieldHistoryPoint,
};
use crate::services::client::ApiClient;
use crate::services::error::ApiError;
use async_trait::async_trait;
use log::info;

/// Filter for the recent-auctions list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionQuery {
    pub security_term: SecurityTerm,
    pub limit: u32,
}

#[async_trait]
pub trait TreasuryApi: Send + Sync {
    async fn get_snapshot(&self) -> Result<Vec<TreasurySnapshotEntry>, ApiError>;
    async fn get_yield_history(
        &self,
        term: SecurityTerm,
        years: u32,
    ) -> Result<Vec<YieldHistoryPoint>, ApiError>;
    async fn get_auctions(&self, query: AuctionQuery) -> Result<Vec<AuctionSummary>, ApiError>;
    async fn get_upcoming(&self) -> Result<Vec<UpcomingAuction>, ApiError>;
    async fn get_auction_detail(&self, auction_id: &AuctionId) -> Result<AuctionDetail, ApiError>;
}

#[async_trait]
impl TreasuryApi for ApiClient {
    async fn get_snapshot(&self) -> Result<Vec<TreasurySnapshotEntry>, ApiError> {
        let entries: Vec<TreasurySnapshotEntry> = self.get_json(&["treasury", "snapshot"], &[]).await?;
        info!("Fetched treasury snapshot with {} terms", entries.len());
        Ok(entries)
    }

    /// Auctions of one term over the trailing `years` window.
    async fn get_yield_history(
        &self,
        term: SecurityTerm,
        years: u32,
    ) -> Result<Vec<YieldHistoryPoint>, ApiError> {
        let points: Vec<YieldHistoryPoint> = self
            .get_json(
                &["treasury", "yield-history"],
                &[("term", term.to_string()), ("years", years.to_string())],
            )
            .await?;
        info!("Fetched {} yield history points for {} over {}y", points.len(), term, years);
        Ok(points)
    }

    async fn get_auctions(&self, query: AuctionQuery) -> Result<Vec<AuctionSummary>, ApiError> {
        let auctions: Vec<AuctionSummary> = self
            .get_json(
                &["treasury", "auctions"],
                &[
                    ("security_term", query.security_term.to_string()),
                    ("limit", query.limit.to_string()),
                ],
            )
            .await?;
        info!("Fetched {} recent {} auctions", auctions.len(), query.security_term);
        Ok(auctions)
    }

    async fn get_upcoming(&self) -> Result<Vec<UpcomingAuction>, ApiError> {
        let upcoming: Vec<UpcomingAuction> = self.get_json(&["treasury", "upcoming"], &[]).await?;
        info!("Fetched {} upcoming auctions", upcoming.len());
        Ok(upcoming)
    }

    async fn get_auction_detail(&self, auction_id: &AuctionId) -> Result<AuctionDetail, ApiError> {
        let id = auction_id.to_string();
        let detail: AuctionDetail = self
            .get_json(&["treasury", "auctions", id.as_str()], &[])
            .await?;
        info!("Fetched detail for auction {}", auction_id);
        Ok(detail)
    }
}
