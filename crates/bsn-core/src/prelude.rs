//! bsn Core Prelude: convenient imports for common usage.
//!
//! ```rust
//! use bsn_core::prelude::*;
//! ```

pub use crate::types::{shorten_address, Account, Address, Directory, Position, Profile};

pub use crate::annotations::{Annotations, ClientState, NoAnnotations};

pub use crate::error::{BsnError, Result};
