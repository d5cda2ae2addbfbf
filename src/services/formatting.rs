// src/services/formatting.rs
//! Display formatting shared by the quota and treasury views.
//!
//! Decimal output matches JavaScript's `Number.prototype.toFixed`: the result
//! is correctly rounded, exact ties round away from zero and negative zero
//! prints without a sign. Rust's `{:.N}` rounds exact ties to even, so ties
//! are detected and rounded here.

pub const NOT_AVAILABLE: &str = "N/A";

/// Yield changes inside this band are treated as unchanged.
pub const TREND_DEAD_ZONE: f64 = 0.001;

/// Remaining quota above this count renders as healthy.
pub const REMAINING_QUOTA_THRESHOLD: i64 = 100;

// Enough digits that any f64 tie is visible exactly at the kept precision.
const EXACT_DIGITS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Rising yields render as unfavorable.
    pub fn tone(&self) -> Tone {
        match self {
            Trend::Up => Tone::Error,
            Trend::Down => Tone::Success,
            Trend::Flat => Tone::Neutral,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "▬",
        }
    }
}

pub fn classify_trend(yield_change: Option<f64>) -> Trend {
    match yield_change {
        Some(change) if change > TREND_DEAD_ZONE => Trend::Up,
        Some(change) if change < -TREND_DEAD_ZONE => Trend::Down,
        _ => Trend::Flat,
    }
}

pub fn remaining_tone(remaining: i64) -> Tone {
    if remaining > REMAINING_QUOTA_THRESHOLD {
        Tone::Success
    } else {
        Tone::Error
    }
}

pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // JavaScript switches to shortest exponent form at this magnitude.
    if magnitude >= 1e21 {
        return format!("{}{}", sign, format!("{:e}", magnitude).replacen('e', "e+", 1));
    }

    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, rest) = frac_part.split_at(digits.min(frac_part.len()));
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');

    let body = if is_tie {
        round_half_up(int_part, kept)
    } else {
        format!("{:.*}", digits, magnitude)
    };
    format!("{}{}", sign, body)
}

fn round_half_up(int_part: &str, kept: &str) -> String {
    let mut digits: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for d in digits.iter_mut().rev() {
        if !carry {
            break;
        }
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
        }
    }
    if carry {
        digits.insert(0, b'1');
    }

    let split = digits.len() - kept.len();
    let (whole, frac) = digits.split_at(split);
    let whole = String::from_utf8_lossy(whole);
    if frac.is_empty() {
        whole.into_owned()
    } else {
        format!("{}.{}", whole, String::from_utf8_lossy(frac))
    }
}

pub fn format_yield(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}%", to_fixed(v, 3)),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_amount(value: Option<f64>) -> String {
    format_billions(value.map(|v| v / 1e9))
}

/// Amount already scaled to billions, as carried by chart points.
pub fn format_billions(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${}B", to_fixed(v, 1)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Yield change in basis points with an explicit sign when positive.
pub fn format_bps(yield_change: Option<f64>) -> String {
    match yield_change {
        Some(change) => {
            let bps = change * 100.0;
            let sign = if bps > 0.0 { "+" } else { "" };
            format!("{}{}", sign, to_fixed(bps, 1))
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{}%", to_fixed(value, 1))
}

pub fn format_ratio(value: Option<f64>) -> String {
    value.map(|v| to_fixed(v, 2)).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_price(value: Option<f64>) -> String {
    value.map(|v| to_fixed(v, 6)).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn format_count<N: Into<i128>>(value: N) -> String {
    let value: i128 = value.into();
    let raw = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn text_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
