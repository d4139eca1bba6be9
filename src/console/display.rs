//! Row presentation helpers for the token listing.

use crate::console::pagination::row_ordinal;
use crate::models::token::TokenRecord;

/// Longest token rendered without truncation.
const DISPLAY_LIMIT: usize = 50;
/// Characters kept at each end of a truncated token.
const EDGE: usize = 20;

/// Truncate long tokens to `first 20 + "..." + last 20` characters.
/// The full value stays available on the row for the copy action.
pub fn display_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= DISPLAY_LIMIT {
        return token.to_string();
    }
    let head: String = chars[..EDGE].iter().collect();
    let tail: String = chars[chars.len() - EDGE..].iter().collect();
    format!("{head}...{tail}")
}

/// Expiry badge text. Two states only, driven entirely by the server flag.
pub fn expiry_badge(is_expired: bool) -> &'static str {
    if is_expired {
        "expiring"
    } else {
        "valid"
    }
}

/// A fully prepared listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRow {
    pub ordinal: u64,
    pub id: u64,
    /// Possibly truncated token for display.
    pub display: String,
    /// Full token value, for the copy action.
    pub token: String,
    pub expires: String,
    pub badge: &'static str,
}

/// Prepare the rows for one page of the listing.
pub fn prepare_rows(page: u32, per_page: u32, tokens: &[TokenRecord]) -> Vec<TokenRow> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, record)| TokenRow {
            ordinal: row_ordinal(page, per_page, index),
            id: record.id,
            display: display_token(&record.token),
            token: record.token.clone(),
            expires: record.exp_time_display.clone(),
            badge: expiry_badge(record.is_expired),
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────
