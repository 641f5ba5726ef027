//! Balance ranking and amount formatting.

use bsn_core::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tokens offered in the balance picker even when the document lists none.
pub const DEFAULT_TOKENS: &[&str] = &[
    "EURMTL", "MTLAP", "MTLRECT", "SATSMTL", "USDM", "XLM", "BTCMTL", "USDC",
];

/// An account ranked by holdings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceEntry<'a> {
    pub address: &'a str,
    pub name: Option<&'a str>,
    pub balances: &'a BTreeMap<String, String>,
    /// Sort key: the selected token's amount, or the sum of all amounts.
    pub score: f64,
}

/// Parse an amount; unparsable or non-finite text counts as zero.
pub fn parse_amount(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Accounts holding at least one balance, richest first.
///
/// With a `token` the key is that token's amount (missing = 0), otherwise
/// the sum of every amount. Ties are broken by address.
pub fn rank_balances<'a, A: Annotations + ?Sized>(
    directory: &'a Directory,
    token: Option<&str>,
    favorites_only: bool,
    annotations: &A,
) -> Vec<BalanceEntry<'a>> {
    let token = token.filter(|t| !t.is_empty());

    let mut entries: Vec<BalanceEntry<'a>> = directory
        .iter()
        .filter(|(_, account)| account.has_balances())
        .filter(|(address, _)| !favorites_only || annotations.is_favorite(address))
        .map(|(address, account)| {
            let score = match token {
                Some(token) => account.balances.get(token).map_or(0.0, |a| parse_amount(a)),
                None => account.balances.values().map(|a| parse_amount(a)).sum(),
            };
            BalanceEntry {
                address,
                name: account.display_name(),
                balances: &account.balances,
                score,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.address.cmp(b.address))
    });
    entries
}

/// Compact amount: `1.50B`, `2.00M`, `3.25K`, or two decimals.
pub fn format_amount(text: &str) -> String {
    let value = parse_amount(text);
    let (scaled, suffix) = if value >= 1e9 {
        (value / 1e9, "B")
    } else if value >= 1e6 {
        (value / 1e6, "M")
    } else if value >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("{scaled:.2}{suffix}")
}

/// Tokens to offer for ranking: the document's `knownTokens` when present,
/// otherwise [`DEFAULT_TOKENS`], plus every asset actually held.
pub fn token_choices(directory: &Directory) -> Vec<String> {
    let mut tokens: BTreeSet<String> = if directory.known_tokens.is_empty() {
        DEFAULT_TOKENS.iter().map(|t| t.to_string()).collect()
    } else {
        directory.known_tokens.iter().cloned().collect()
    };
    for (_, account) in directory.iter() {
        tokens.extend(account.balances.keys().cloned());
    }
    tokens.into_iter().collect()
}
