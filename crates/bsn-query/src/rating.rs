//! Reputation rating of an account, 0-100.
//!
//! | Component | Points |
//! |-----------|--------|
//! | Profile present | 10 |
//! | `Name`, `About`, `Website` each non-empty | 10 each |
//! | Activity: distinct outgoing tag types | 5 each, max 30 |
//! | Recognition: (tagger, tag type) pairs naming the account | 10 each, max 30 |

use crate::tags::ReceivedIndex;
use bsn_core::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

pub const PROFILE_POINTS: u32 = 10;
pub const PROFILE_FIELD_POINTS: u32 = 10;
pub const ACTIVITY_POINTS_PER_TYPE: u32 = 5;
pub const ACTIVITY_CAP: u32 = 30;
pub const RECOGNITION_POINTS_PER_TAGGER: u32 = 10;
pub const RECOGNITION_CAP: u32 = 30;
pub const MAX_RATING: u32 = 100;

/// A rating split into its components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingBreakdown {
    pub profile: u32,
    pub activity: u32,
    pub recognition: u32,
    pub total: u32,
}

impl RatingBreakdown {
    /// Score an account given how many (tagger, tag type) pairs name it.
    ///
    /// An absent account scores zero regardless of recognition.
    pub fn compute(account: Option<&Account>, recognitions: usize) -> Self {
        let Some(account) = account else {
            return Self::default();
        };

        let profile = account.profile.as_ref().map_or(0, |p| {
            let filled = [&p.name, &p.about, &p.website]
                .iter()
                .filter(|field| !field.is_empty())
                .count() as u32;
            PROFILE_POINTS + filled * PROFILE_FIELD_POINTS
        });

        let activity = saturating_points(account.tag_type_count(), ACTIVITY_POINTS_PER_TYPE)
            .min(ACTIVITY_CAP);
        let recognition =
            saturating_points(recognitions, RECOGNITION_POINTS_PER_TAGGER).min(RECOGNITION_CAP);

        Self {
            profile,
            activity,
            recognition,
            total: (profile + activity + recognition).min(MAX_RATING),
        }
    }
}

fn saturating_points(count: usize, per_item: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(per_item)
}

/// Number of (tagger, tag type) pairs, taggers other than `address`,
/// whose target list contains `address`.
pub fn recognition_count(directory: &Directory, address: &str) -> usize {
    directory
        .iter()
        .filter(|(from, _)| *from != address)
        .map(|(_, account)| {
            account
                .tags
                .values()
                .filter(|targets| targets.iter().any(|t| t == address))
                .count()
        })
        .sum()
}

pub fn rating_breakdown(directory: &Directory, address: &str) -> RatingBreakdown {
    let account = directory.get(address);
    let recognitions = if account.is_some() {
        recognition_count(directory, address)
    } else {
        0
    };
    RatingBreakdown::compute(account, recognitions)
}

/// Rating of one account; 0 when the address is not in the directory.
pub fn calculate_rating(directory: &Directory, address: &str) -> u32 {
    rating_breakdown(directory, address).total
}

/// Ratings of every account, computed from a single reverse index.
#[derive(Debug, Clone, Default)]
pub struct RatingTable {
    ratings: HashMap<Address, RatingBreakdown>,
}

impl RatingTable {
    pub fn build(directory: &Directory) -> Self {
        let index = ReceivedIndex::build(directory);
        Self::with_index(directory, &index)
    }

    pub fn with_index(directory: &Directory, index: &ReceivedIndex) -> Self {
        let ratings = directory
            .iter()
            .map(|(address, account)| {
                (
                    address.to_string(),
                    RatingBreakdown::compute(Some(account), index.recognition_count(address)),
                )
            })
            .collect();
        Self { ratings }
    }

    pub fn rating(&self, address: &str) -> u32 {
        self.breakdown(address).total
    }

    pub fn breakdown(&self, address: &str) -> RatingBreakdown {
        self.ratings.get(address).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &[&str], about: &[&str], website: &[&str], tags: Vec<(&str, Vec<&str>)>) -> Account {
        Account {
            profile: Some(Profile {
                name: name.iter().map(|s| s.to_string()).collect(),
                about: about.iter().map(|s| s.to_string()).collect(),
                website: website.iter().map(|s| s.to_string()).collect(),
            }),
            balances: Default::default(),
            tags: tags
                .into_iter()
                .map(|(t, targets)| (t.to_string(), targets.into_iter().map(String::from).collect()))
                .collect(),
        }
    }

    #[test]
    fn absent_or_bare_accounts_score_zero() {
        let mut dir = Directory::default();
        assert_eq!(calculate_rating(&dir, "GMISSING"), 0);

        dir.accounts.insert("GBARE".into(), Account::default());
        assert_eq!(calculate_rating(&dir, "GBARE"), 0);
    }

    #[test]
    fn full_profile_scores_forty() {
        let mut dir = Directory::default();
        dir.accounts
            .insert("GA".into(), account(&["Alice"], &["About"], &["https://a.example"], vec![]));
        let b = rating_breakdown(&dir, "GA");
        assert_eq!(b.profile, 40);
        assert_eq!(b.total, 40);
    }

    #[test]
    fn empty_profile_still_earns_base_points() {
        let mut dir = Directory::default();
        dir.accounts.insert("GA".into(), account(&[], &[], &[], vec![]));
        assert_eq!(calculate_rating(&dir, "GA"), PROFILE_POINTS);
    }

    #[test]
    fn activity_and_recognition_are_capped() {
        let mut dir = Directory::default();
        let types: Vec<String> = (0..10).map(|i| format!("T{i}")).collect();
        let tags = types.iter().map(|t| (t.as_str(), vec!["GTARGET"])).collect();
        dir.accounts
            .insert("GBUSY".into(), account(&["Busy"], &["x"], &["y"], tags));
        dir.accounts.insert("GTARGET".into(), account(&["T"], &["x"], &["y"], vec![]));

        let busy = rating_breakdown(&dir, "GBUSY");
        assert_eq!(busy.activity, ACTIVITY_CAP);
        assert_eq!(busy.total, 70);

        // Ten tag types from one tagger are ten (tagger, type) pairs.
        let target = rating_breakdown(&dir, "GTARGET");
        assert_eq!(recognition_count(&dir, "GTARGET"), 10);
        assert_eq!(target.recognition, RECOGNITION_CAP);
        assert_eq!(target.total, 70);
    }

    #[test]
    fn rating_never_exceeds_maximum() {
        let mut dir = Directory::default();
        let tag_types = ["A", "B", "C", "D", "E", "F", "G"];
        let tags = tag_types.iter().map(|t| (*t, vec!["GSTAR"])).collect();
        dir.accounts.insert("GSTAR".into(), account(&["S"], &["a"], &["w"], tags));
        for fan in ["GF1", "GF2", "GF3", "GF4"] {
            dir.accounts.insert(fan.into(), account(&[], &[], &[], vec![("Fan", vec!["GSTAR"])]));
        }
        let b = rating_breakdown(&dir, "GSTAR");
        assert_eq!(b.profile + b.activity + b.recognition, 100);
        assert_eq!(b.total, MAX_RATING);
    }

    #[test]
    fn self_tags_do_not_count_as_recognition() {
        let mut dir = Directory::default();
        dir.accounts
            .insert("GSELF".into(), account(&[], &[], &[], vec![("Me", vec!["GSELF"])]));
        let b = rating_breakdown(&dir, "GSELF");
        assert_eq!(b.recognition, 0);
        assert_eq!(b.activity, ACTIVITY_POINTS_PER_TYPE);
    }

    #[test]
    fn adding_a_name_never_lowers_rating() {
        let mut dir = Directory::default();
        dir.accounts
            .insert("GA".into(), account(&[], &["about"], &[], vec![("Friend", vec!["GB"])]));
        let before = calculate_rating(&dir, "GA");
        dir.accounts
            .insert("GA".into(), account(&["Alice"], &["about"], &[], vec![("Friend", vec!["GB"])]));
        assert!(calculate_rating(&dir, "GA") >= before);
    }

    #[test]
    fn table_agrees_with_direct_computation() {
        let mut dir = Directory::default();
        dir.accounts.insert("GA".into(), account(&["A"], &[], &[], vec![("Friend", vec!["GB", "GC"])]));
        dir.accounts.insert("GB".into(), account(&[], &[], &[], vec![("Friend", vec!["GA", "GA"])]));
        dir.accounts.insert("GC".into(), Account::default());

        let table = RatingTable::build(&dir);
        assert_eq!(table.len(), 3);
        for (address, _) in dir.iter() {
            assert_eq!(table.breakdown(address), rating_breakdown(&dir, address));
        }
        assert_eq!(table.rating("GNOPE"), 0);
    }
}
