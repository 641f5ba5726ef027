//! Client-local annotations on addresses.
//!
//! Favorites, nicknames and the "me" account live outside the shared
//! directory. They are owned by the user, persisted locally, and passed
//! explicitly into the computations that consult them.

use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Read access to user annotations, injected into directory computations.
pub trait Annotations {
    /// Nickname given to an address, if any.
    fn nickname(&self, address: &str) -> Option<&str>;

    /// Whether the address is in the favorites set.
    fn is_favorite(&self, address: &str) -> bool;
}

/// Annotations source with nothing in it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnnotations;

impl Annotations for NoAnnotations {
    fn nickname(&self, _address: &str) -> Option<&str> {
        None
    }

    fn is_favorite(&self, _address: &str) -> bool {
        false
    }
}

/// All user-local state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientState {
    #[serde(default)]
    pub favorites: BTreeSet<Address>,
    #[serde(default)]
    pub nicknames: BTreeMap<Address, String>,
    /// The account the user identifies as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub me: Option<Address>,
    #[serde(default)]
    pub show_favorites_only: bool,
    #[serde(default)]
    pub balances_favorites_only: bool,
}

impl ClientState {
    /// Add or remove a favorite. Returns whether the address is now a favorite.
    pub fn toggle_favorite(&mut self, address: &str) -> bool {
        if address.is_empty() {
            return false;
        }
        if self.favorites.remove(address) {
            false
        } else {
            self.favorites.insert(address.to_string());
            true
        }
    }

    pub fn set_nickname(&mut self, address: impl Into<Address>, nickname: impl Into<String>) {
        self.nicknames.insert(address.into(), nickname.into());
    }

    /// Remove a nickname, returning the old one.
    pub fn remove_nickname(&mut self, address: &str) -> Option<String> {
        self.nicknames.remove(address)
    }

    pub fn set_me(&mut self, address: impl Into<Address>) {
        self.me = Some(address.into());
    }

    pub fn clear_me(&mut self) {
        self.me = None;
    }

    pub fn is_me(&self, address: &str) -> bool {
        self.me.as_deref() == Some(address)
    }

    /// The favorites as a plain set, for filter calls.
    pub fn favorite_set(&self) -> &BTreeSet<Address> {
        &self.favorites
    }
}

impl Annotations for ClientState {
    fn nickname(&self, address: &str) -> Option<&str> {
        self.nicknames
            .get(address)
            .map(String::as_str)
            .filter(|nick| !nick.is_empty())
    }

    fn is_favorite(&self, address: &str) -> bool {
        !address.is_empty() && self.favorites.contains(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_favorite_round_trip() {
        let mut state = ClientState::default();
        assert!(state.toggle_favorite("GA"));
        assert!(state.is_favorite("GA"));
        assert!(!state.toggle_favorite("GA"));
        assert!(!state.is_favorite("GA"));
    }

    #[test]
    fn empty_address_is_never_a_favorite() {
        let mut state = ClientState::default();
        assert!(!state.toggle_favorite(""));
        assert!(state.favorites.is_empty());
        assert!(!state.is_favorite(""));
    }

    #[test]
    fn nicknames_and_me() {
        let mut state = ClientState::default();
        state.set_nickname("GA", "Alpha");
        state.set_nickname("GB", "");
        assert_eq!(state.nickname("GA"), Some("Alpha"));
        assert_eq!(state.nickname("GB"), None);
        assert_eq!(state.remove_nickname("GA").as_deref(), Some("Alpha"));
        assert_eq!(state.nickname("GA"), None);

        state.set_me("GA");
        assert!(state.is_me("GA"));
        assert!(!state.is_me("GB"));
        state.clear_me();
        assert!(!state.is_me("GA"));
    }

    #[test]
    fn deserializes_partial_state() {
        let state: ClientState = serde_json::from_str(r#"{"favorites":["GA"]}"#).unwrap();
        assert!(state.is_favorite("GA"));
        assert!(state.nicknames.is_empty());
        assert!(state.me.is_none());
        assert!(!state.show_favorites_only);
    }
}
