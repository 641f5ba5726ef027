//! Shared types for the account directory.
//!
//! The directory document comes from an external producer and is treated
//! as untrusted: every field may be missing or have the wrong shape. The
//! deserializers here degrade such values to empty defaults instead of
//! rejecting the whole document.
//!
//! Accounts and tag maps keep the order they have in the document. That
//! order decides graph discovery order, layout angles and the order of
//! received-tag members.

use crate::annotations::Annotations;
use crate::error::{BsnError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// An account address. Opaque; equality is exact string equality.
pub type Address = String;

/// Number of address characters used when an account has no other name.
pub const FALLBACK_NAME_CHARS: usize = 8;

/// Self-declared profile fields of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display names; the first entry is canonical.
    #[serde(rename = "Name", default, deserialize_with = "string_list")]
    pub name: Vec<String>,
    #[serde(rename = "About", default, deserialize_with = "string_list")]
    pub about: Vec<String>,
    #[serde(rename = "Website", default, deserialize_with = "string_list")]
    pub website: Vec<String>,
}

/// One entry of the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// `None` means the account never set a profile.
    #[serde(default, deserialize_with = "lenient_profile", skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    /// Asset code -> decimal amount text.
    #[serde(default, deserialize_with = "lenient_balances")]
    pub balances: BTreeMap<String, String>,
    /// Tag type -> target addresses asserted by this account.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: IndexMap<String, Vec<Address>>,
}

impl Account {
    /// First non-empty `Name` entry.
    pub fn display_name(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.name.first())
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// First `About` entry.
    pub fn about(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|p| p.about.first())
            .map(String::as_str)
    }

    /// Number of distinct outgoing tag types (keys of the tag map).
    pub fn tag_type_count(&self) -> usize {
        self.tags.len()
    }

    pub fn has_balances(&self) -> bool {
        !self.balances.is_empty()
    }
}

/// The full account directory, immutable for a rendering session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    #[serde(deserialize_with = "lenient_accounts")]
    pub accounts: IndexMap<Address, Account>,
    #[serde(rename = "knownTokens", default, deserialize_with = "string_list")]
    pub known_tokens: Vec<String>,
}

impl Directory {
    /// Parse a directory document.
    ///
    /// Fails only when the text is not JSON or has no `accounts` object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a directory from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("accounts") {
            Some(Value::Object(_)) => Ok(serde_json::from_value(value)?),
            Some(other) => Err(BsnError::invalid_document(format!(
                "`accounts` must be an object, found {}",
                json_kind(other)
            ))),
            None => Err(BsnError::invalid_document("missing `accounts` object")),
        }
    }

    pub fn get(&self, address: &str) -> Option<&Account> {
        self.accounts.get(address)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.accounts.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Account)> {
        self.accounts.iter().map(|(a, acc)| (a.as_str(), acc))
    }

    /// Resolve a display name: profile name, then nickname, then the
    /// first eight characters of the address.
    pub fn display_name<A: Annotations + ?Sized>(&self, address: &str, annotations: &A) -> String {
        self.get(address)
            .and_then(Account::display_name)
            .or_else(|| annotations.nickname(address))
            .map(str::to_string)
            .unwrap_or_else(|| address.chars().take(FALLBACK_NAME_CHARS).collect())
    }

    /// Profile name or nickname, without the address fallback.
    pub fn known_name<'a, A: Annotations + ?Sized>(
        &'a self,
        address: &str,
        annotations: &'a A,
    ) -> Option<&'a str> {
        self.get(address)
            .and_then(Account::display_name)
            .or_else(|| annotations.nickname(address))
    }
}

/// A position on the layout canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shorten an address for display: `GABC...WXYZ`.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= FALLBACK_NAME_CHARS {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn strings_of(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(strings_of(Value::deserialize(deserializer)?))
}

fn lenient_profile<'de, D>(deserializer: D) -> std::result::Result<Option<Profile>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(Some(
            serde_json::from_value(value).unwrap_or_default(),
        )),
        _ => Ok(None),
    }
}

fn lenient_balances<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(BTreeMap::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(asset, amount)| match amount {
            Value::String(s) => Some((asset, s)),
            Value::Number(n) => Some((asset, n.to_string())),
            _ => None,
        })
        .collect())
}

fn lenient_tags<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<String, Vec<Address>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(IndexMap::new());
    };
    Ok(map
        .into_iter()
        .map(|(tag_type, targets)| (tag_type, strings_of(targets)))
        .collect())
}

fn lenient_accounts<'de, D>(
    deserializer: D,
) -> std::result::Result<IndexMap<Address, Account>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(IndexMap::new());
    };
    Ok(map
        .into_iter()
        .map(|(address, value)| {
            let account = match value {
                Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
                _ => Account::default(),
            };
            (address, account)
        })
        .collect())
}
