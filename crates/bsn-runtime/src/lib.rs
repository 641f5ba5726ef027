//! # bsn Runtime
//!
//! The relationship explorer and everything that touches the filesystem.
//!
//! - [`relationship`] - bounded BFS over tags into a petgraph-backed graph
//! - [`layout`] - circular placement and connection tallies
//! - [`loader`] - directory document loading with a last-good cache
//! - [`store`] - client state persistence

pub mod layout;
pub mod loader;
pub mod prelude;
pub mod relationship;
pub mod store;
