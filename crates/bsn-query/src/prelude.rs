//! bsn Query Prelude: convenient imports for common usage.
//!
//! ```rust
//! use bsn_query::prelude::*;
//! ```

pub use crate::rating::{calculate_rating, rating_breakdown, RatingBreakdown, RatingTable};

pub use crate::tags::{
    given_tag_groups, received_tag_groups, tag_details, tag_usage, unique_tags, volunteers,
    ReceivedIndex, ReceivedTag, TagDetails, TagGroup, TagParty, TagUsage, Volunteer,
    VOLUNTEER_TAG,
};

pub use crate::search::{
    filter_accounts, named_accounts, search, sort_accounts, AccountEntry, AccountFilter,
    NamedAccount, TagMode,
};

pub use crate::balances::{
    format_amount, parse_amount, rank_balances, token_choices, BalanceEntry, DEFAULT_TOKENS,
};
