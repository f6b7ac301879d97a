//! Server-side HTML for the three pages.

pub mod product_detail;
pub mod products;
pub mod suppliers;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Price with exactly two decimals, e.g. `22.00`.
pub fn format_price(price: Decimal) -> String {
    let mut p = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    p.rescale(2);
    p.to_string()
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Links only for http(s) targets; anything else renders as plain text.
pub fn is_linkable(url: &str) -> bool {
    let url = url.trim_start().to_ascii_lowercase();
    url.starts_with("http://") || url.starts_with("https://")
}

pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · pricewatch</title>
</head>
<body>
<nav><a href="/suppliers">Suppliers</a> · <a href="/products">Products</a></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!("<h1>{}</h1>\n<p>{}</p>", escape(&heading), escape(message));
    layout(&heading, &body)
}
