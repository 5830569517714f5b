//! Order notice contents.

use rust_decimal::Decimal;
use serde::Serialize;

/// An email recipient or sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub email: String,
    pub name: String,
}

/// One ordered line as shown in a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeLine {
    pub designer: String,
    pub product: String,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Everything a placed-order notification reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNotice {
    pub serial_number: String,
    pub buyer: Contact,
    pub lines: Vec<NoticeLine>,
    pub total_amount: Decimal,
}

impl OrderNotice {
    /// Total units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// HTML table rows, one per line.
    pub(crate) fn lines_html(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&line.designer),
                    escape_html(&line.product),
                    escape_html(&line.color),
                    escape_html(&line.size),
                    line.quantity,
                    line.price,
                )
            })
            .collect()
    }
}

pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
