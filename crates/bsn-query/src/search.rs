//! Account search, filtering and ordering.
//!
//! Filtering keeps directory order; [`sort_accounts`] then imposes a strict
//! total order (rating desc, tag types desc, address asc) so results are
//! deterministic and sorting twice changes nothing.

use crate::rating::RatingTable;
use bsn_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeSet;

/// Minimum query length for address prefix/suffix matching.
pub const ADDRESS_AFFIX_LEN: usize = 4;

/// Whether tag details are rendered next to each account.
///
/// Display only; it never removes accounts from a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagMode {
    WithTags,
    #[default]
    WithoutTags,
}

/// Parameters of an account search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tag_mode: TagMode,
    #[serde(default)]
    pub favorites_only: bool,
}

impl AccountFilter {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }

    pub fn with_tags(mut self) -> Self {
        self.tag_mode = TagMode::WithTags;
        self
    }
}

/// An account selected by a search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccountEntry<'a> {
    pub address: &'a str,
    pub account: &'a Account,
}

/// Whether an account matches an already trimmed, lowercased query.
pub fn matches_query(address: &str, account: &Account, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let name = account
        .profile
        .as_ref()
        .and_then(|p| p.name.first())
        .map(|n| n.to_lowercase())
        .unwrap_or_default();
    let about = account.about().map(str::to_lowercase).unwrap_or_default();

    name.contains(query) || about.contains(query) || address_affix_match(address, query)
}

/// Match the first four query characters against the address head, or the
/// last four against the address tail. Queries shorter than four never match.
pub fn address_affix_match(address: &str, query: &str) -> bool {
    let query: Vec<char> = query.chars().collect();
    if query.len() < ADDRESS_AFFIX_LEN {
        return false;
    }
    let address: Vec<char> = address.to_lowercase().chars().collect();

    let head: String = address.iter().take(ADDRESS_AFFIX_LEN).collect();
    let tail: String = address[address.len().saturating_sub(ADDRESS_AFFIX_LEN)..]
        .iter()
        .collect();
    let query_head: String = query[..ADDRESS_AFFIX_LEN].iter().collect();
    let query_tail: String = query[query.len() - ADDRESS_AFFIX_LEN..].iter().collect();

    head.contains(&query_head) || tail.contains(&query_tail)
}

/// Select accounts by favorites membership and free-text query.
///
/// `filter.tag_mode` is ignored here.
pub fn filter_accounts<'a>(
    directory: &'a Directory,
    filter: &AccountFilter,
    favorites: &BTreeSet<Address>,
) -> Vec<AccountEntry<'a>> {
    let query = filter.query.trim().to_lowercase();

    directory
        .iter()
        .filter(|(address, _)| !filter.favorites_only || favorites.contains(*address))
        .filter(|(address, account)| matches_query(address, account, &query))
        .map(|(address, account)| AccountEntry { address, account })
        .collect()
}

/// Order by rating desc, then distinct tag types desc, then address asc.
pub fn sort_accounts<'a>(
    entries: Vec<AccountEntry<'a>>,
    ratings: &RatingTable,
) -> Vec<AccountEntry<'a>> {
    let mut entries = entries;
    entries.sort_by_cached_key(|entry| {
        (
            Reverse(ratings.rating(entry.address)),
            Reverse(entry.account.tag_type_count()),
            entry.address,
        )
    });
    entries
}

/// Filter then sort in one call.
pub fn search<'a>(
    directory: &'a Directory,
    filter: &AccountFilter,
    favorites: &BTreeSet<Address>,
    ratings: &RatingTable,
) -> Vec<AccountEntry<'a>> {
    sort_accounts(filter_accounts(directory, filter, favorites), ratings)
}

/// Case-insensitive ordering for names and tag types; exact text breaks ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// An address with a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedAccount {
    pub address: Address,
    pub name: String,
}

/// Accounts that have a profile name or nickname, sorted by name.
///
/// Used to pick a graph center.
pub fn named_accounts<A: Annotations + ?Sized>(
    directory: &Directory,
    annotations: &A,
) -> Vec<NamedAccount> {
    let mut named: Vec<NamedAccount> = directory
        .iter()
        .filter_map(|(address, _)| {
            directory
                .known_name(address, annotations)
                .map(|name| NamedAccount {
                    address: address.to_string(),
                    name: name.to_string(),
                })
        })
        .collect();
    named.sort_by(|a, b| compare_names(&a.name, &b.name).then_with(|| a.address.cmp(&b.address)));
    named
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "GABCD1234EFGH5678WXYZ";

    fn directory() -> Directory {
        Directory::from_json_str(&format!(
            r#"{{
            "accounts": {{
                "{ADDRESS}": {{ "profile": {{ "Name": ["Zed"], "About": ["Runs a Node"] }} }},
                "GBOB00000000000000QQQQ": {{ "profile": {{ "Name": ["Bob Builder"] }},
                    "tags": {{ "Friend": ["{ADDRESS}"] }} }},
                "GCAROL0000000000000RRRR": {{ "tags": {{ "Friend": ["{ADDRESS}"], "Partner": ["GBOB00000000000000QQQQ"] }} }},
                "GDAVE00000000000000SSSS": {{}}
            }}
        }}"#
        ))
        .unwrap()
    }

    fn addresses(entries: &[AccountEntry<'_>]) -> Vec<String> {
        entries.iter().map(|e| e.address.to_string()).collect()
    }

    #[test]
    fn empty_query_keeps_everything() {
        let dir = directory();
        let all = filter_accounts(&dir, &AccountFilter::default(), &BTreeSet::new());
        assert_eq!(all.len(), dir.len());

        let blank = filter_accounts(&dir, &AccountFilter::query("   "), &BTreeSet::new());
        assert_eq!(blank.len(), dir.len());
    }

    #[test]
    fn tag_mode_never_filters() {
        let dir = directory();
        let with = filter_accounts(&dir, &AccountFilter::default().with_tags(), &BTreeSet::new());
        let without = filter_accounts(&dir, &AccountFilter::default(), &BTreeSet::new());
        assert_eq!(addresses(&with), addresses(&without));
    }

    #[test]
    fn name_and_about_substring_match() {
        let dir = directory();
        let hits = filter_accounts(&dir, &AccountFilter::query("  BUILDER "), &BTreeSet::new());
        assert_eq!(addresses(&hits), vec!["GBOB00000000000000QQQQ"]);

        let hits = filter_accounts(&dir, &AccountFilter::query("node"), &BTreeSet::new());
        assert_eq!(addresses(&hits), vec![ADDRESS]);
    }

    #[test]
    fn address_prefix_and_suffix_match() {
        assert!(address_affix_match(ADDRESS, "gabc"));
        assert!(address_affix_match(ADDRESS, "wxyz"));
        assert!(address_affix_match(ADDRESS, "gabc-anything-wxyz"));
        assert!(!address_affix_match(ADDRESS, "abcd"));
        assert!(!address_affix_match(ADDRESS, "gab"));
        assert!(!address_affix_match("GA", "gabc"));
    }

    #[test]
    fn middle_of_address_does_not_match() {
        let dir = directory();
        let hits = filter_accounts(&dir, &AccountFilter::query("abcd"), &BTreeSet::new());
        assert!(hits.is_empty());
    }

    #[test]
    fn favorites_only_restricts_membership() {
        let dir = directory();
        let favorites: BTreeSet<Address> = ["GDAVE00000000000000SSSS".to_string()].into();
        let hits = filter_accounts(&dir, &AccountFilter::default().favorites_only(), &favorites);
        assert_eq!(addresses(&hits), vec!["GDAVE00000000000000SSSS"]);

        let none = filter_accounts(&dir, &AccountFilter::default().favorites_only(), &BTreeSet::new());
        assert!(none.is_empty());
    }

    #[test]
    fn sort_is_total_and_idempotent() {
        let dir = directory();
        let ratings = RatingTable::build(&dir);
        let sorted = search(&dir, &AccountFilter::default(), &BTreeSet::new(), &ratings);

        // Zed: profile 30 + recognition 20 = 50; Bob: 20 + 5 + 10 = 35;
        // Carol: activity 10; Dave: 0.
        assert_eq!(
            addresses(&sorted),
            vec![
                ADDRESS,
                "GBOB00000000000000QQQQ",
                "GCAROL0000000000000RRRR",
                "GDAVE00000000000000SSSS"
            ]
        );

        let again = sort_accounts(sorted.clone(), &ratings);
        assert_eq!(addresses(&again), addresses(&sorted));
    }

    #[test]
    fn ties_broken_by_tag_count_then_address() {
        let dir = Directory::from_json_str(
            r#"{"accounts": {
                "GZ": {}, "GY": {}, "GX": { "tags": { "A": [] } }
            }}"#,
        )
        .unwrap();
        let ratings = RatingTable::build(&dir);
        let sorted = search(&dir, &AccountFilter::default(), &BTreeSet::new(), &ratings);
        // GX has 5 points of activity; GY and GZ tie at zero.
        assert_eq!(addresses(&sorted), vec!["GX", "GY", "GZ"]);
    }

    #[test]
    fn named_accounts_use_nicknames() {
        let dir = directory();
        let mut state = ClientState::default();
        state.set_nickname("GDAVE00000000000000SSSS", "Dave");

        let named = named_accounts(&dir, &state);
        let names: Vec<_> = named.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Bob Builder", "Dave", "Zed"]);
    }

    #[test]
    fn names_sort_ignoring_case() {
        let dir = Directory::from_json_str(
            r#"{"accounts": {
                "GA": { "profile": { "Name": ["carol"] } },
                "GB": { "profile": { "Name": ["Bob"] } },
                "GC": { "profile": { "Name": ["alice"] } },
                "GD": { "profile": { "Name": ["Alice"] } }
            }}"#,
        )
        .unwrap();
        let named = named_accounts(&dir, &NoAnnotations);
        let names: Vec<_> = named.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "alice", "Bob", "carol"]);
    }
}
