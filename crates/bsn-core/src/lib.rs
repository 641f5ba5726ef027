//! # bsn Core
//!
//! Core data model for the bsn account directory.
//!
//! A directory maps account addresses to profiles, balances and outgoing
//! tags. A tag `tags["Friend"] = [B, C]` on account A means "A asserts
//! Friend about B and about C". The directory is parsed once and then
//! treated as immutable; user-local annotations (favorites, nicknames,
//! the "me" account) are kept separately in [`annotations::ClientState`].
//!
//! ## Quick Start
//!
//! ```rust
//! use bsn_core::prelude::*;
//!
//! let dir = Directory::from_json_str(r#"{
//!     "accounts": {
//!         "GALICE": { "profile": { "Name": ["Alice"] }, "tags": { "Friend": ["GBOB"] } },
//!         "GBOB": {}
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(dir.display_name("GALICE", &NoAnnotations), "Alice");
//! assert_eq!(dir.display_name("GBOB", &NoAnnotations), "GBOB");
//! ```

pub mod annotations;
pub mod error;
pub mod prelude;
pub mod types;
