//! # bsn Web API
//!
//! Read-only JSON API over one account directory. The directory is loaded
//! once at startup and shared by every request.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -p bsn-web -- --data bsn.json --port 3000
//! curl 'http://localhost:3000/api/accounts?q=alice'
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/accounts` | Search and rank (`q`, `favorites`, `favorites_only`, `limit`) |
//! | GET | `/api/accounts/:address` | One account with rating and tags |
//! | GET | `/api/tags` | Tag types by usage |
//! | GET | `/api/tags/:name` | Givers and receivers of a tag |
//! | GET | `/api/volunteers` | Volunteering targets |
//! | GET | `/api/balances` | Balance ranking (`token`, `favorites`, `favorites_only`) |
//! | GET | `/api/tokens` | Tokens available for ranking |
//! | GET | `/api/graph` | Laid-out relationship graph (`center`, `depth`, `tag`, `width`, `height`) |

pub mod routes;
pub mod state;

pub use state::AppState;
