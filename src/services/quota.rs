// src/services/quota.rs
use crate::models::{QuotaBreakdown, QuotaHistoryPoint, QuotaSnapshot};
use crate::services::client::ApiClient;
use crate::services::error::ApiError;
use async_trait::async_trait;
use log::info;

#[async_trait]
pub trait QuotaApi: Send + Sync {
    async fn get_today(&self) -> Result<QuotaSnapshot, ApiError>;
    async fn get_history(&self, days: u32) -> Result<Vec<QuotaHistoryPoint>, ApiError>;
    async fn get_breakdown(&self) -> Result<QuotaBreakdown, ApiError>;
}

#[async_trait]
impl QuotaApi for ApiClient {
    async fn get_today(&self) -> Result<QuotaSnapshot, ApiError> {
        let snapshot: QuotaSnapshot = self.get_json(&["quota", "today"], &[]).await?;
        info!(
            "Quota today: {} of {} used ({} remaining)",
            snapshot.used, snapshot.limit, snapshot.remaining
        );
        Ok(snapshot)
    }

    async fn get_history(&self, days: u32) -> Result<Vec<QuotaHistoryPoint>, ApiError> {
        let points: Vec<QuotaHistoryPoint> = self
            .get_json(&["quota", "history"], &[("days", days.to_string())])
            .await?;
        info!("Fetched {} quota history points for {} days", points.len(), days);
        Ok(points)
    }

    async fn get_breakdown(&self) -> Result<QuotaBreakdown, ApiError> {
        let breakdown: QuotaBreakdown = self.get_json(&["quota", "breakdown"], &[]).await?;
        info!(
            "Fetched quota breakdown: {} surveys, {} scripts",
            breakdown.by_survey.len(),
            breakdown.by_script.len()
        );
        Ok(breakdown)
    }
}
