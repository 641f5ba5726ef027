//! Application state for the web server.
//!
//! The directory is immutable for the life of the process, so the state is
//! a set of read-only indices behind `Arc`s and needs no locking.

use bsn::prelude::*;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    /// Ratings of every account, for sorting.
    pub ratings: Arc<RatingTable>,
    /// Incoming tags of every address.
    pub received: Arc<ReceivedIndex>,
}

impl AppState {
    pub fn new(directory: Directory) -> Self {
        let received = ReceivedIndex::build(&directory);
        let ratings = RatingTable::with_index(&directory, &received);
        Self {
            directory: Arc::new(directory),
            ratings: Arc::new(ratings),
            received: Arc::new(received),
        }
    }
}
