//! bsn Runtime Prelude: convenient imports for common usage.
//!
//! ```rust
//! use bsn_runtime::prelude::*;
//! ```

// Re-export graph building
pub use crate::relationship::{
    build_graph, GraphRequest, RelationshipEdge, RelationshipGraph, RelationshipNode,
    DEFAULT_DEPTH,
};

// Re-export layout
pub use crate::layout::{layout, CircularLayout, DEFAULT_HEIGHT, DEFAULT_WIDTH};

// Re-export persistence
pub use crate::loader::{load_directory, DirectorySource, CACHE_FILE};
pub use crate::store::{StateStore, STATE_FILE};

// Re-export from core
pub use bsn_core::prelude::*;
