// Fake dashboard backend served by warp on an ephemeral port.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use macro_dashboard_views::{ApiClient, DashboardConfig};

pub fn quota_today() -> Value {
    json!({"used": 380, "limit": 500, "remaining": 120, "percentage_used": 76.0})
}

pub fn quota_breakdown() -> Value {
    json!({
        "total_series": 46,
        "by_survey": [{"label": "CES", "requests": 120, "series": 45}],
        "by_script": [{"label": "weekly_claims", "requests": 260, "series": 1}]
    })
}

pub fn snapshot() -> Value {
    json!([
        {"security_term": "2-Year", "high_yield": 4.469, "yield_change": -0.05, "bid_to_cover_ratio": 2.64, "auction_date": "2024-02-27"},
        {"security_term": "10-Year", "high_yield": 4.166, "yield_change": 0.002, "bid_to_cover_ratio": 2.51, "auction_date": "2024-02-13"},
        {"security_term": "30-Year", "high_yield": 4.36, "yield_change": 0.0005, "bid_to_cover_ratio": null, "auction_date": "2024-02-08"}
    ])
}

fn yield_history(term: &str, years: &str) -> Value {
    json!([
        {"auction_date": "2024-01-15", "high_yield": 4.123, "bid_to_cover_ratio": 2.45, "offering_amount": 58000000000.0},
        {"auction_date": format!("{}/{}", term, years), "high_yield": null, "bid_to_cover_ratio": null, "offering_amount": null}
    ])
}

fn auctions(term: &str, limit: &str) -> Value {
    json!([{
        "auction_id": 101,
        "auction_date": "2024-02-13",
        "cusip": "91282CJZ5",
        "high_yield": 4.166,
        "coupon_rate": 4.0,
        "bid_to_cover_ratio": 2.51,
        "offering_amount": 42000000000.0,
        "security_term": term,
        "limit_seen": limit
    }])
}

fn auction_detail(id: Value) -> Value {
    json!({
        "auction_id": id,
        "auction_date": "2024-02-13",
        "cusip": "91282CJZ5",
        "high_yield": 4.166,
        "coupon_rate": 4.0,
        "bid_to_cover_ratio": 2.51,
        "offering_amount": 42000000000.0,
        "security_term": "10-Year",
        "security_type": "Note",
        "issue_date": "2024-02-15",
        "maturity_date": "2034-02-15",
        "low_yield": 4.05,
        "median_yield": 4.12,
        "price_per_100": 98.661,
        "total_tendered": 105400000000.0,
        "total_accepted": 42000000000.0,
        "primary_dealer_accepted": 5200000000.0,
        "direct_bidder_accepted": 7300000000.0,
        "indirect_bidder_accepted": 29500000000.0
    })
}

/// Percent-decodes a raw path segment; already-decoded text passes through.
fn decode_segment(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let hex = raw.get(i + 1..i + 3).and_then(|h| u8::from_str_radix(h, 16).ok());
        match (bytes[i], hex) {
            (b'%', Some(byte)) => {
                out.push(byte);
                i += 3;
            }
            (b, _) => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn param(query: &HashMap<String, String>, key: &str) -> String {
    query.get(key).cloned().unwrap_or_default()
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({"error": code.as_str()})),
        code,
    ))
}

pub fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let today = warp::path!("api" / "v1" / "quota" / "today")
        .and(warp::get())
        .map(|| warp::reply::json(&quota_today()));

    let history = warp::path!("api" / "v1" / "quota" / "history")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|q: HashMap<String, String>| {
            let days: u32 = param(&q, "days").parse().unwrap_or(0);
            let points: Vec<Value> = (1..=days)
                .map(|d| json!({"date": format!("2024-03-{:02}", d), "used": d * 10}))
                .collect();
            warp::reply::json(&points)
        });

    let breakdown = warp::path!("api" / "v1" / "quota" / "breakdown")
        .and(warp::get())
        .map(|| warp::reply::json(&quota_breakdown()));

    let snapshot_route = warp::path!("api" / "v1" / "treasury" / "snapshot")
        .and(warp::get())
        .map(|| warp::reply::json(&snapshot()));

    let history_route = warp::path!("api" / "v1" / "treasury" / "yield-history")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|q: HashMap<String, String>| {
            warp::reply::json(&yield_history(&param(&q, "term"), &param(&q, "years")))
        });

    let auctions_route = warp::path!("api" / "v1" / "treasury" / "auctions")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .map(|q: HashMap<String, String>| {
            warp::reply::json(&auctions(&param(&q, "security_term"), &param(&q, "limit")))
        });

    let detail_route = warp::path!("api" / "v1" / "treasury" / "auctions" / u64)
        .and(warp::get())
        .map(|id: u64| {
            if id == 500 {
                warp::reply::with_status(
                    warp::reply::json(&json!({"error": "upstream failure"})),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            } else {
                warp::reply::with_status(warp::reply::json(&auction_detail(json!(id))), StatusCode::OK)
            }
        });

    // Non-numeric ids are echoed back so tests can see exactly what arrived.
    let text_detail_route = warp::path!("api" / "v1" / "treasury" / "auctions" / String)
        .and(warp::get())
        .map(|raw: String| {
            let id = decode_segment(&raw);
            if id == "missing" {
                warp::reply::with_status(
                    warp::reply::json(&json!({"error": "auction not found"})),
                    StatusCode::NOT_FOUND,
                )
            } else {
                warp::reply::with_status(warp::reply::json(&auction_detail(json!(id))), StatusCode::OK)
            }
        });

    let upcoming_route = warp::path!("api" / "v1" / "treasury" / "upcoming")
        .and(warp::get())
        .map(|| warp::reply::json(&json!([])));

    let garbage_route = warp::path!("api" / "v1" / "garbage" / "quota" / "today")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({"used": "lots"})));

    today
        .or(history)
        .or(breakdown)
        .or(snapshot_route)
        .or(history_route)
        .or(auctions_route)
        .or(detail_route)
        .or(text_detail_route)
        .or(upcoming_route)
        .or(garbage_route)
        .recover(handle_rejection)
}

/// Starts the fake backend and returns its `/api/v1` base URL.
pub async fn spawn_backend() -> String {
    let _ = env_logger::builder().is_test(true).try_init();
    let (addr, server): (SocketAddr, _) = warp::serve(routes()).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{}/api/v1", addr)
}

pub fn client_for(base_url: &str) -> ApiClient {
    let config = DashboardConfig {
        api_base_url: base_url.to_string(),
        ..DashboardConfig::default()
    };
    ApiClient::new(&config).expect("client builds")
}
