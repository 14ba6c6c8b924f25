//! Plain-text rendering of amounts, summaries, lists, and the distribution chart.
//!
//! Everything here returns strings so the shell decides how to colour and print them.

use chrono::Local;

use crate::core::services::{Aggregates, Distribution};
use crate::domain::Transaction;

const LABEL_WIDTH: usize = 16;
const BAR_WIDTH: usize = 20;

/// Formats an amount with two decimals and thousands separators, e.g. `-$1,234.50`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{whole}.{:02}", cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The three summary cards, one per line.
pub fn render_summary(aggregates: &Aggregates, symbol: &str) -> String {
    [
        ("Total Income", aggregates.total_income),
        ("Total Expenses", aggregates.total_expenses),
        ("Savings", aggregates.savings),
    ]
    .iter()
    .map(|(label, value)| format!("{label:<LABEL_WIDTH$}{}", format_currency(*value, symbol)))
    .collect::<Vec<_>>()
    .join("\n")
}

/// One list row: local date, description, and the signed amount.
pub fn render_row(txn: &Transaction, symbol: &str) -> String {
    let date = txn.date().with_timezone(&Local).format("%Y-%m-%d");
    format!(
        "{date}  {}  {}{}",
        txn.description(),
        txn.kind().sign(),
        format_currency(txn.amount(), symbol)
    )
}

pub fn render_list(transactions: &[&Transaction], symbol: &str) -> Vec<String> {
    if transactions.is_empty() {
        return vec!["No transactions yet.".to_string()];
    }
    transactions
        .iter()
        .map(|txn| render_row(txn, symbol))
        .collect()
}

/// Text version of the income distribution chart.
pub fn render_distribution(distribution: &Distribution, symbol: &str) -> String {
    if !distribution.has_data {
        return "Add income to see your financial distribution.".to_string();
    }
    distribution
        .slices()
        .iter()
        .map(|slice| {
            let filled = (slice.share * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<10}{:>4}  [{}{}]  {}",
                slice.label,
                format!("{:.0}%", slice.share * 100.0),
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH.saturating_sub(filled)),
                format_currency(slice.value, symbol)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
