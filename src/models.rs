// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub used: u64,
    pub limit: u64,
    pub remaining: i64,
    pub percentage_used: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaHistoryPoint {
    pub date: String,
    pub used: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaBreakdownEntry {
    #[serde(alias = "survey", alias = "script")]
    pub label: String,
    pub requests: u64,
    pub series: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaBreakdown {
    #[serde(default)]
    pub total_series: u64,
    #[serde(default)]
    pub by_survey: Vec<QuotaBreakdownEntry>,
    #[serde(default)]
    pub by_script: Vec<QuotaBreakdownEntry>,
}

/// Treasury maturity categories shown as selector cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityTerm {
    #[serde(rename = "2-Year")]
    TwoYear,
    #[serde(rename = "5-Year")]
    FiveYear,
    #[serde(rename = "7-Year")]
    SevenYear,
    #[default]
    #[serde(rename = "10-Year")]
    TenYear,
    #[serde(rename = "20-Year")]
    TwentyYear,
    #[serde(rename = "30-Year")]
    ThirtyYear,
}

impl SecurityTerm {
    pub const ALL: [SecurityTerm; 6] = [
        SecurityTerm::TwoYear,
        SecurityTerm::FiveYear,
        SecurityTerm::SevenYear,
        SecurityTerm::TenYear,
        SecurityTerm::TwentyYear,
        SecurityTerm::ThirtyYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityTerm::TwoYear => "2-Year",
            SecurityTerm::FiveYear => "5-Year",
            SecurityTerm::SevenYear => "7-Year",
            SecurityTerm::TenYear => "10-Year",
            SecurityTerm::TwentyYear => "20-Year",
            SecurityTerm::ThirtyYear => "30-Year",
        }
    }
}

impl fmt::Display for SecurityTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SecurityTerm::ALL
            .iter()
            .copied()
            .find(|term| term.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown security term: '{}'", s))
    }
}

/// Trailing window for the yield history chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Period {
    OneYear,
    ThreeYears,
    #[default]
    FiveYears,
    TenYears,
    TwentyYears,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::OneYear,
        Period::ThreeYears,
        Period::FiveYears,
        Period::TenYears,
        Period::TwentyYears,
    ];

    pub fn years(&self) -> u32 {
        match self {
            Period::OneYear => 1,
            Period::ThreeYears => 3,
            Period::FiveYears => 5,
            Period::TenYears => 10,
            Period::TwentyYears => 20,
        }
    }
}

impl TryFrom<u32> for Period {
    type Error = String;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.years() == years)
            .ok_or_else(|| format!("Unsupported period: {} years (expected 1, 3, 5, 10 or 20)", years))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}Y", self.years())
    }
}

/// Auction identifiers arrive either as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuctionId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuctionId::Numeric(id) => write!(f, "{}", id),
            AuctionId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for AuctionId {
    fn from(id: i64) -> Self {
        AuctionId::Numeric(id)
    }
}

/// Command-line ids are kept verbatim; the path segment is the same either way.
impl From<&str> for AuctionId {
    fn from(id: &str) -> Self {
        AuctionId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasurySnapshotEntry {
    pub security_term: String,
    #[serde(default)]
    pub high_yield: Option<f64>,
    #[serde(default)]
    pub yield_change: Option<f64>,
    #[serde(default)]
    pub bid_to_cover_ratio: Option<f64>,
    #[serde(default)]
    pub auction_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldHistoryPoint {
    pub auction_date: String,
    #[serde(default)]
    pub high_yield: Option<f64>,
    #[serde(default)]
    pub bid_to_cover_ratio: Option<f64>,
    #[serde(default)]
    pub offering_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSummary {
    pub auction_id: AuctionId,
    pub auction_date: String,
    #[serde(default)]
    pub cusip: Option<String>,
    #[serde(default)]
    pub high_yield: Option<f64>,
    #[serde(default)]
    pub coupon_rate: Option<f64>,
    #[serde(default)]
    pub bid_to_cover_ratio: Option<f64>,
    #[serde(default)]
    pub offering_amount: Option<f64>,
    pub security_term: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionDetail {
    #[serde(flatten)]
    pub summary: AuctionSummary,
    #[serde(default)]
    pub security_type: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub maturity_date: Option<String>,
    #[serde(default)]
    pub low_yield: Option<f64>,
    #[serde(default)]
    pub median_yield: Option<f64>,
    #[serde(default)]
    pub price_per_100: Option<f64>,
    #[serde(default)]
    pub total_tendered: Option<f64>,
    #[serde(default)]
    pub total_accepted: Option<f64>,
    #[serde(default)]
    pub primary_dealer_accepted: Option<f64>,
    #[serde(default)]
    pub direct_bidder_accepted: Option<f64>,
    #[serde(default)]
    pub indirect_bidder_accepted: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingAuction {
    pub upcoming_id: AuctionId,
    pub security_term: String,
    pub auction_date: String,
}

/// Flattened yield-history record fed to the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    #[serde(rename = "yield")]
    pub yield_pct: Option<f64>,
    #[serde(rename = "bidToCover")]
    pub bid_to_cover: Option<f64>,
    pub amount: Option<f64>,
}

impl From<&YieldHistoryPoint> for ChartPoint {
    fn from(point: &YieldHistoryPoint) -> Self {
        ChartPoint {
            date: point.auction_date.clone(),
            yield_pct: point.high_yield,
            bid_to_cover: point.bid_to_cover_ratio,
            amount: point.offering_amount.map(|a| a / 1e9),
        }
    }
}
