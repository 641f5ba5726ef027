//! # bsn Query
//!
//! Derived views over an immutable [`Directory`](bsn_core::types::Directory).
//!
//! Every function here is pure: it reads the directory (and optionally the
//! user's annotations) and returns a fresh result. Callers recompute on every
//! input change.
//!
//! - [`rating`] - reputation score 0-100 and its breakdown
//! - [`tags`] - given/received tag groups, tag catalogue, volunteers
//! - [`search`] - free-text filter and deterministic ordering
//! - [`balances`] - balance ranking and compact amount formatting
//!
//! ```rust
//! use bsn_core::prelude::*;
//! use bsn_query::prelude::*;
//! use std::collections::BTreeSet;
//!
//! let dir = Directory::from_json_str(r#"{
//!     "accounts": {
//!         "GALICE": { "profile": { "Name": ["Alice"] } },
//!         "GBOB": { "tags": { "Friend": ["GALICE"] } }
//!     }
//! }"#).unwrap();
//!
//! let ratings = RatingTable::build(&dir);
//! let hits = search(&dir, &AccountFilter::query("ali"), &BTreeSet::new(), &ratings);
//! assert_eq!(hits[0].address, "GALICE");
//! assert_eq!(ratings.rating("GALICE"), 30);
//! ```

pub mod balances;
pub mod prelude;
pub mod rating;
pub mod search;
pub mod tags;
