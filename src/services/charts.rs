// src/services/charts.rs
//! SVG renderings of the quota history bars and the dual-axis yield chart.

use crate::models::{ChartPoint, Period, QuotaHistoryPoint, SecurityTerm};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::{debug, warn};
use plotters::prelude::*;
use std::fmt;

pub const CHART_SIZE: (u32, u32) = (960, 480);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartError {
    pub message: String,
}

impl ChartError {
    pub fn new(message: impl Into<String>) -> Self {
        ChartError {
            message: message.into(),
        }
    }
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ChartError {}

fn draw_err<E: std::error::Error + Send + Sync>(stage: &str, e: DrawingAreaErrorKind<E>) -> ChartError {
    ChartError::new(format!("Failed to {}: {}", stage, e))
}

/// Pads a value range by 10% and keeps it non-degenerate.
fn padded_range(min: f64, max: f64, floor: Option<f64>) -> (f64, f64) {
    let span = (max - min).max(1e-8);
    let padding = span * 0.1;
    let low = min - padding;
    let low = match floor {
        Some(f) => low.max(f),
        None => low,
    };
    (low, max + padding)
}

pub fn quota_history_svg(points: &[QuotaHistoryPoint]) -> Result<String, ChartError> {
    if points.is_empty() {
        return Err(ChartError::new("No quota history to chart"));
    }

    let max_used = points.iter().map(|p| p.used).max().unwrap_or(0) as f64;
    let y_max = if max_used > 0.0 { max_used * 1.1 } else { 1.0 };
    let labels: Vec<String> = points.iter().map(|p| p.date.clone()).collect();
    let days = points.len() as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err("fill canvas", e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("API requests per day", ("sans-serif", 24.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..days).into_segmented(), 0f64..y_max)
            .map_err(|e| draw_err("build chart", e))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(points.len())
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_desc("Requests")
            .draw()
            .map_err(|e| draw_err("draw mesh", e))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BLUE.filled())
                    .margin(10)
                    .data(points.iter().enumerate().map(|(i, p)| (i as u32, p.used as f64))),
            )
            .map_err(|e| draw_err("draw bars", e))?;

        root.present().map_err(|e| draw_err("render chart", e))?;
    }

    debug!("Rendered quota history chart ({} bytes)", svg.len());
    Ok(svg)
}

struct DatedPoint {
    at: DateTime<Utc>,
    yield_pct: f64,
    bid_to_cover: Option<f64>,
}

fn parse_auction_date(raw: &str) -> Option<DateTime<Utc>> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .map(|d| DateTime::<Utc>::from_naive_utc_and_offset(d.and_time(NaiveTime::MIN), Utc))
}

/// Yield on the left axis, bid-to-cover on the right.
pub fn yield_history_svg(
    term: SecurityTerm,
    period: Period,
    points: &[ChartPoint],
) -> Result<String, ChartError> {
    let mut dated: Vec<DatedPoint> = points
        .iter()
        .filter_map(|p| {
            let at = parse_auction_date(&p.date);
            if at.is_none() {
                warn!("Skipping chart point with unparseable date '{}'", p.date);
            }
            Some(DatedPoint {
                at: at?,
                yield_pct: p.yield_pct?,
                bid_to_cover: p.bid_to_cover,
            })
        })
        .collect();
    dated.sort_by_key(|p| p.at);

    if dated.len() < 2 {
        return Err(ChartError::new(
            "Not enough yield data to generate chart (minimum 2 points required)",
        ));
    }

    let x_min = dated[0].at;
    let x_max = dated[dated.len() - 1].at;

    let min_yield = dated.iter().map(|p| p.yield_pct).fold(f64::INFINITY, f64::min);
    let max_yield = dated.iter().map(|p| p.yield_pct).fold(f64::NEG_INFINITY, f64::max);
    let (y_min, y_max) = padded_range(min_yield, max_yield, Some(0.0));

    let ratios: Vec<f64> = dated.iter().filter_map(|p| p.bid_to_cover).collect();
    let (b_min, b_max) = if ratios.is_empty() {
        (0.0, 1.0)
    } else {
        let lo = ratios.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = ratios.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        padded_range(lo, hi, Some(0.0))
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_err("fill canvas", e))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} auction yields ({})", term, period),
                ("sans-serif", 24.0).into_font(),
            )
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .right_y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| draw_err("build chart", e))?
            .set_secondary_coord(x_min..x_max, b_min..b_max);

        chart
            .configure_mesh()
            .x_labels(8)
            .x_label_formatter(&|d: &DateTime<Utc>| d.format("%Y-%m").to_string())
            .y_desc("High yield (%)")
            .draw()
            .map_err(|e| draw_err("draw mesh", e))?;

        chart
            .configure_secondary_axes()
            .y_desc("Bid-to-cover")
            .draw()
            .map_err(|e| draw_err("draw secondary axis", e))?;

        chart
            .draw_series(LineSeries::new(
                dated.iter().map(|p| (p.at, p.yield_pct)),
                &BLUE,
            ))
            .map_err(|e| draw_err("draw yield line", e))?
            .label("High yield")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

        chart
            .draw_secondary_series(LineSeries::new(
                dated.iter().filter_map(|p| p.bid_to_cover.map(|b| (p.at, b))),
                &RED,
            ))
            .map_err(|e| draw_err("draw bid-to-cover line", e))?
            .label("Bid-to-cover")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| draw_err("draw legend", e))?;

        root.present().map_err(|e| draw_err("render chart", e))?;
    }

    debug!("Rendered {} yield chart ({} bytes)", term, svg.len());
    Ok(svg)
}
