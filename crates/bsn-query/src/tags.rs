//! Tag aggregation over the directory.
//!
//! Tags are stored on the account that asserts them, so everything about
//! tags *received* by an address needs a reverse scan. [`ReceivedIndex`]
//! does that scan once for the whole directory; the free functions here
//! scan on demand for a single address or tag.

use crate::search::compare_names;
use bsn_core::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Tag type whose targets are counted by [`volunteers`].
pub const VOLUNTEER_TAG: &str = "IAmVolunteerFor";

/// One incoming tag: `from` asserted `tag_type` about the indexed address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceivedTag {
    pub tag_type: String,
    pub from: Address,
}

/// Addresses grouped under one tag type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagGroup {
    pub tag_type: String,
    pub addresses: Vec<Address>,
}

/// Reverse tag index: target address -> incoming tags.
///
/// A tagger contributes one entry per tag type whose list contains the
/// target, no matter how often the target repeats in that list. Self-tags
/// are not indexed.
#[derive(Debug, Clone, Default)]
pub struct ReceivedIndex {
    received: HashMap<Address, Vec<ReceivedTag>>,
}

impl ReceivedIndex {
    pub fn build(directory: &Directory) -> Self {
        let mut received: HashMap<Address, Vec<ReceivedTag>> = HashMap::new();

        for (from, account) in directory.iter() {
            for (tag_type, targets) in &account.tags {
                let mut seen = HashSet::new();
                for target in targets {
                    if target == from || !seen.insert(target.as_str()) {
                        continue;
                    }
                    received.entry(target.clone()).or_default().push(ReceivedTag {
                        tag_type: tag_type.clone(),
                        from: from.to_string(),
                    });
                }
            }
        }

        Self { received }
    }

    /// Incoming tags in document order.
    pub fn received(&self, address: &str) -> &[ReceivedTag] {
        self.received
            .get(address)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of (tagger, tag type) pairs naming `address`.
    pub fn recognition_count(&self, address: &str) -> usize {
        self.received(address).len()
    }

    /// Incoming tags grouped by tag type, groups ordered by type.
    pub fn groups(&self, address: &str) -> Vec<TagGroup> {
        group_received(self.received(address).iter().cloned())
    }
}

/// Incoming tags of one address, grouped by tag type.
///
/// Groups are ordered by tag type; members keep document order.
pub fn received_tag_groups(directory: &Directory, address: &str) -> Vec<TagGroup> {
    let incoming = directory
        .iter()
        .filter(|(from, _)| *from != address)
        .flat_map(move |(from, account)| {
            account
                .tags
                .iter()
                .filter(move |(_, targets)| targets.iter().any(|t| t == address))
                .map(move |(tag_type, _)| ReceivedTag {
                    tag_type: tag_type.clone(),
                    from: from.to_string(),
                })
        });
    group_received(incoming)
}

fn group_received(tags: impl Iterator<Item = ReceivedTag>) -> Vec<TagGroup> {
    let mut groups: BTreeMap<String, Vec<Address>> = BTreeMap::new();
    for tag in tags {
        groups.entry(tag.tag_type).or_default().push(tag.from);
    }
    let mut groups: Vec<TagGroup> = groups
        .into_iter()
        .map(|(tag_type, addresses)| TagGroup {
            tag_type,
            addresses,
        })
        .collect();
    groups.sort_by(|a, b| compare_names(&a.tag_type, &b.tag_type));
    groups
}

/// The account's own tags as groups, in document order.
pub fn given_tag_groups(account: &Account) -> Vec<TagGroup> {
    account
        .tags
        .iter()
        .map(|(tag_type, targets)| TagGroup {
            tag_type: tag_type.clone(),
            addresses: targets.clone(),
        })
        .collect()
}

/// Every tag type used anywhere in the directory, sorted.
pub fn unique_tags(directory: &Directory) -> Vec<String> {
    let mut tags: Vec<String> = directory
        .iter()
        .flat_map(|(_, account)| account.tags.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    tags.sort_by(|a, b| compare_names(a, b));
    tags
}

/// How many accounts use a tag type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    pub tag_type: String,
    pub accounts: usize,
}

/// Usage count per tag type, most used first (ties by name).
pub fn tag_usage(directory: &Directory) -> Vec<TagUsage> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (_, account) in directory.iter() {
        for tag_type in account.tags.keys() {
            *counts.entry(tag_type.as_str()).or_insert(0) += 1;
        }
    }

    let mut usage: Vec<TagUsage> = counts
        .into_iter()
        .map(|(tag_type, accounts)| TagUsage {
            tag_type: tag_type.to_string(),
            accounts,
        })
        .collect();
    usage.sort_by(|a, b| {
        b.accounts
            .cmp(&a.accounts)
            .then_with(|| compare_names(&a.tag_type, &b.tag_type))
    });
    usage
}

/// An address taking part in a tag, with its profile name if known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagParty {
    pub address: Address,
    pub name: Option<String>,
}

/// Who gives and who receives a tag type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDetails {
    pub tag_type: String,
    pub givers: Vec<TagParty>,
    /// Distinct targets; may include addresses missing from the directory.
    pub receivers: Vec<TagParty>,
}

pub fn tag_details(directory: &Directory, tag_type: &str) -> TagDetails {
    let party = |address: &str| TagParty {
        address: address.to_string(),
        name: directory
            .get(address)
            .and_then(Account::display_name)
            .map(str::to_string),
    };

    let mut givers = Vec::new();
    let mut receivers: BTreeSet<&str> = BTreeSet::new();
    for (address, account) in directory.iter() {
        if let Some(targets) = account.tags.get(tag_type) {
            givers.push(party(address));
            receivers.extend(targets.iter().map(String::as_str));
        }
    }
    givers.sort_by(|a, b| a.address.cmp(&b.address));

    TagDetails {
        tag_type: tag_type.to_string(),
        givers,
        receivers: receivers.into_iter().map(party).collect(),
    }
}

/// A volunteering target and how many times it was named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volunteer {
    pub address: Address,
    pub name: Option<String>,
    pub count: usize,
}

/// Targets of [`VOLUNTEER_TAG`], most named first (ties by address).
pub fn volunteers(directory: &Directory) -> Vec<Volunteer> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, account) in directory.iter() {
        for target in account.tags.get(VOLUNTEER_TAG).into_iter().flatten() {
            *counts.entry(target.as_str()).or_insert(0) += 1;
        }
    }

    let mut list: Vec<Volunteer> = counts
        .into_iter()
        .map(|(address, count)| Volunteer {
            address: address.to_string(),
            name: directory
                .get(address)
                .and_then(Account::display_name)
                .map(str::to_string),
            count,
        })
        .collect();
    // BTreeMap order makes the stable sort break ties by address.
    list.sort_by(|a, b| b.count.cmp(&a.count));
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Directory {
        Directory::from_json_str(
            r#"{
            "accounts": {
                "GA": { "profile": { "Name": ["Alice"] },
                        "tags": { "Friend": ["GB", "GB"], "Partner": ["GB"], "IAmVolunteerFor": ["GC"] } },
                "GB": { "tags": { "Friend": ["GA", "GB"], "IAmVolunteerFor": ["GC", "GZ"] } },
                "GC": { "profile": { "Name": ["Club"] }, "tags": { "Friend": ["GA"] } }
            }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn index_counts_pairs_not_repeats() {
        let dir = directory();
        let index = ReceivedIndex::build(&dir);

        // GA names GB twice under Friend and once under Partner: two pairs.
        assert_eq!(index.recognition_count("GB"), 2);
        // GB's self-tag is not indexed.
        assert!(index.received("GB").iter().all(|t| t.from != "GB"));
        assert_eq!(index.recognition_count("GA"), 2);
        assert_eq!(index.recognition_count("GZ"), 1);
        assert_eq!(index.recognition_count("GNOBODY"), 0);
    }

    #[test]
    fn received_groups_match_index() {
        let dir = directory();
        let index = ReceivedIndex::build(&dir);
        for address in ["GA", "GB", "GC", "GZ"] {
            assert_eq!(received_tag_groups(&dir, address), index.groups(address));
        }

        let groups = received_tag_groups(&dir, "GA");
        assert_eq!(
            groups,
            vec![TagGroup {
                tag_type: "Friend".into(),
                addresses: vec!["GB".into(), "GC".into()],
            }]
        );
    }

    #[test]
    fn given_groups_keep_document_order() {
        let dir = directory();
        let groups = given_tag_groups(dir.get("GA").unwrap());
        let types: Vec<_> = groups.iter().map(|g| g.tag_type.as_str()).collect();
        assert_eq!(types, vec!["Friend", "Partner", "IAmVolunteerFor"]);
    }

    #[test]
    fn received_members_follow_document_order() {
        let dir = Directory::from_json_str(
            r#"{"accounts": {
                "GZ": { "tags": { "Trust": ["GA"] } },
                "GY": { "tags": { "trusted": ["GA"], "Trust": ["GA"] } },
                "GA": {}
            }}"#,
        )
        .unwrap();
        let groups = ReceivedIndex::build(&dir).groups("GA");
        assert_eq!(
            groups,
            vec![
                TagGroup {
                    tag_type: "Trust".into(),
                    addresses: vec!["GZ".into(), "GY".into()],
                },
                TagGroup {
                    tag_type: "trusted".into(),
                    addresses: vec!["GY".into()],
                },
            ]
        );
        assert_eq!(received_tag_groups(&dir, "GA"), groups);
    }

    #[test]
    fn tag_names_sort_ignoring_case() {
        let dir = Directory::from_json_str(
            r#"{"accounts": {
                "GA": { "tags": { "banana": [], "Cherry": [], "apple": [] } }
            }}"#,
        )
        .unwrap();
        assert_eq!(unique_tags(&dir), vec!["apple", "banana", "Cherry"]);
        let usage: Vec<_> = tag_usage(&dir).into_iter().map(|u| u.tag_type).collect();
        assert_eq!(usage, vec!["apple", "banana", "Cherry"]);
    }

    #[test]
    fn unique_tags_and_usage() {
        let dir = directory();
        assert_eq!(unique_tags(&dir), vec!["Friend", "IAmVolunteerFor", "Partner"]);

        let usage = tag_usage(&dir);
        assert_eq!(usage[0], TagUsage { tag_type: "Friend".into(), accounts: 3 });
        assert_eq!(usage[1], TagUsage { tag_type: "IAmVolunteerFor".into(), accounts: 2 });
        assert_eq!(usage[2], TagUsage { tag_type: "Partner".into(), accounts: 1 });
    }

    #[test]
    fn tag_details_lists_givers_and_receivers() {
        let dir = directory();
        let details = tag_details(&dir, "IAmVolunteerFor");
        let givers: Vec<_> = details.givers.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(givers, vec!["GA", "GB"]);
        assert_eq!(details.givers[0].name.as_deref(), Some("Alice"));

        let receivers: Vec<_> = details.receivers.iter().map(|p| p.address.as_str()).collect();
        assert_eq!(receivers, vec!["GC", "GZ"]);
        assert_eq!(details.receivers[0].name.as_deref(), Some("Club"));
        assert_eq!(details.receivers[1].name, None);

        let empty = tag_details(&dir, "Unknown");
        assert!(empty.givers.is_empty() && empty.receivers.is_empty());
    }

    #[test]
    fn volunteers_ranked_by_count() {
        let dir = directory();
        let list = volunteers(&dir);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].address, "GC");
        assert_eq!(list[0].count, 2);
        assert_eq!(list[0].name.as_deref(), Some("Club"));
        assert_eq!(list[1].address, "GZ");
        assert_eq!(list[1].count, 1);
    }
}
