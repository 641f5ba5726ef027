//! # bsn
//!
//! Explore a directory of blockchain accounts and the tags they assert
//! about each other.
//!
//! ## Quick Start
//!
//! ```rust
//! use bsn::prelude::*;
//! use std::collections::BTreeSet;
//!
//! let dir = Directory::from_json_str(r#"{
//!     "accounts": {
//!         "GALICE": { "profile": { "Name": ["Alice"] }, "tags": { "Trust": ["GBOB"] } },
//!         "GBOB": { "tags": { "Trust": ["GALICE"] } }
//!     }
//! }"#).unwrap();
//!
//! // Rank and search accounts
//! let ratings = RatingTable::build(&dir);
//! let ranked = search(&dir, &AccountFilter::default(), &BTreeSet::new(), &ratings);
//! assert_eq!(ranked[0].address, "GALICE");
//!
//! // Build and lay out the relationship graph
//! let mut graph = build_graph(&dir, &GraphRequest::new("GALICE"), &NoAnnotations);
//! layout(&mut graph, "GALICE", 1200.0, 800.0);
//! assert_eq!(graph.edge_count(), 1);
//! assert!(graph.edges().all(|e| e.bidirectional));
//! ```
//!
//! ## Architecture
//!
//! - [`bsn_core`] - Directory model, client annotations, errors
//! - [`bsn_query`] - Ratings, tag views, search, balances
//! - [`bsn_runtime`] - Relationship graph, layout, loader, state store
//!
//! ## Rating
//!
//! | Component | Points |
//! |-----------|--------|
//! | Profile present | 10 |
//! | Name, About, Website | 10 each |
//! | Distinct tag types given | 5 each, max 30 |
//! | Tagged by others (tagger, type) | 10 each, max 30 |
//!
//! The total is capped at 100.

// Re-export all subcrates
pub use bsn_core as core;
pub use bsn_query as query;
pub use bsn_runtime as runtime;

/// Crate version, as reported by the binaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
///
/// ```rust
/// use bsn::prelude::*;
/// ```
pub mod prelude {
    pub use bsn_core::prelude::*;
    pub use bsn_query::prelude::*;
    pub use bsn_runtime::prelude::*;
}
