// src/views/quota.rs
use crate::models::{QuotaBreakdown, QuotaBreakdownEntry, QuotaHistoryPoint, QuotaSnapshot};
use crate::services::formatting::{format_count, format_percentage, remaining_tone, Tone};
use crate::services::quota::QuotaApi;
use crate::views::query::QueryState;
use crate::views::table::Table;
use log::{info, warn};

pub const DEFAULT_HISTORY_DAYS: u32 = 7;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct QuotaView {
    pub today: QueryState<QuotaSnapshot>,
    pub history: QueryState<Vec<QuotaHistoryPoint>>,
    pub breakdown: QueryState<QuotaBreakdown>,
}

/// Summary statistics shown above the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaStats {
    pub used: String,
    pub limit: String,
    pub remaining: String,
    pub remaining_tone: Tone,
    pub percentage_used: String,
}

impl From<&QuotaSnapshot> for QuotaStats {
    fn from(snapshot: &QuotaSnapshot) -> Self {
        QuotaStats {
            used: format_count(snapshot.used),
            limit: format_count(snapshot.limit),
            remaining: format_count(snapshot.remaining),
            remaining_tone: remaining_tone(snapshot.remaining),
            percentage_used: format_percentage(snapshot.percentage_used),
        }
    }
}

impl QuotaView {
    pub fn pending() -> Self {
        QuotaView {
            today: QueryState::Loading,
            history: QueryState::Loading,
            breakdown: QueryState::Loading,
        }
    }

    /// Fetches today, history and breakdown concurrently.
    pub async fn load<A>(api: &A, history_days: u32) -> Self
    where
        A: QuotaApi + ?Sized,
    {
        info!("Loading quota view ({} days of history)", history_days);
        let (today, history, breakdown) = tokio::join!(
            api.get_today(),
            api.get_history(history_days),
            api.get_breakdown()
        );

        for err in [today.as_ref().err(), history.as_ref().err(), breakdown.as_ref().err()]
            .into_iter()
            .flatten()
        {
            warn!("Quota view query failed: {}", err);
        }

        QuotaView {
            today: QueryState::from_result(today),
            history: QueryState::from_result(history),
            breakdown: QueryState::from_result(breakdown),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.today.is_loading() || self.history.is_loading() || self.breakdown.is_loading()
    }

    pub fn stats(&self) -> Option<QuotaStats> {
        self.today.data().map(QuotaStats::from)
    }

    pub fn survey_rows(&self) -> Vec<[String; 3]> {
        self.breakdown
            .data()
            .map(|b| breakdown_rows(&b.by_survey))
            .unwrap_or_default()
    }

    pub fn script_rows(&self) -> Vec<[String; 3]> {
        self.breakdown
            .data()
            .map(|b| breakdown_rows(&b.by_script))
            .unwrap_or_default()
    }

    pub fn render(&self) -> String {
        if self.is_loading() {
            return "Loading quota usage...".to_string();
        }

        let mut sections = vec!["== API Quota ==".to_string()];

        sections.push(self.today.render_with("today's usage", |snapshot| {
            let stats = QuotaStats::from(snapshot);
            let marker = match stats.remaining_tone {
                Tone::Success => "ok",
                _ => "LOW",
            };
            format!(
                "Used: {}  Limit: {}  Remaining: {} [{}]  Usage: {}",
                stats.used, stats.limit, stats.remaining, marker, stats.percentage_used
            )
        }));

        sections.push("-- Daily usage --".to_string());
        sections.push(self.history.render_with("usage history", |points| render_bars(points)));

        sections.push(self.breakdown.render_with("quota breakdown", |breakdown| {
            format!(
                "Total series: {}\n\n-- By Survey --\n{}\n\n-- By Script --\n{}",
                format_count(breakdown.total_series),
                render_breakdown_table("Survey", &breakdown.by_survey),
                render_breakdown_table("Script", &breakdown.by_script)
            )
        }));

        sections.join("\n\n")
    }
}

/// Rows in response order: label, requests, series.
pub fn breakdown_rows(entries: &[QuotaBreakdownEntry]) -> Vec<[String; 3]> {
    entries
        .iter()
        .map(|e| [e.label.clone(), e.requests.to_string(), e.series.to_string()])
        .collect()
}

fn render_breakdown_table(label_header: &str, entries: &[QuotaBreakdownEntry]) -> String {
    let mut table = Table::new(&[label_header, "Requests", "Series"]);
    for row in breakdown_rows(entries) {
        table.add_row(row.to_vec());
    }
    if table.is_empty() {
        return "No entries.".to_string();
    }
    table.render()
}

fn render_bars(points: &[QuotaHistoryPoint]) -> String {
    let max = points.iter().map(|p| p.used).max().unwrap_or(0);
    let date_width = points.iter().map(|p| p.date.len()).max().unwrap_or(0);

    points
        .iter()
        .map(|p| {
            let len = if max == 0 {
                0
            } else {
                ((p.used as f64 / max as f64) * BAR_WIDTH as f64).round() as usize
            };
            format!(
                "{:<width$} | {} {}",
                p.date,
                "█".repeat(len),
                format_count(p.used),
                width = date_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
