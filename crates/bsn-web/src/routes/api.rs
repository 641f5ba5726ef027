//! REST API endpoints over the account directory.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bsn::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::result::Result;

/// Comma-separated favorites sent by the client, which owns them.
fn favorite_set(favorites: Option<&str>) -> BTreeSet<Address> {
    favorites
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// Account search query string.
#[derive(Debug, Default, Deserialize)]
pub struct AccountsQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub favorites: Option<String>,
    #[serde(default)]
    pub favorites_only: bool,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// One row of the account list.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub address: Address,
    pub name: String,
    pub rating: u32,
    pub tag_types: usize,
    pub favorite: bool,
}

/// Account list response.
#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    /// Matches before `limit` was applied.
    pub total: usize,
    pub accounts: Vec<AccountSummary>,
}

/// Search and rank accounts.
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(params): Query<AccountsQuery>,
) -> Json<AccountsResponse> {
    let favorites = favorite_set(params.favorites.as_deref());
    let filter = AccountFilter {
        query: params.q,
        favorites_only: params.favorites_only,
        ..AccountFilter::default()
    };

    let results = search(&state.directory, &filter, &favorites, &state.ratings);
    let accounts = results
        .iter()
        .take(params.limit)
        .map(|entry| AccountSummary {
            address: entry.address.to_string(),
            name: state.directory.display_name(entry.address, &NoAnnotations),
            rating: state.ratings.rating(entry.address),
            tag_types: entry.account.tag_type_count(),
            favorite: favorites.contains(entry.address),
        })
        .collect();

    Json(AccountsResponse {
        total: results.len(),
        accounts,
    })
}

/// Full account view.
#[derive(Debug, Serialize)]
pub struct AccountDetail {
    pub address: Address,
    pub name: String,
    pub account: Account,
    pub rating: RatingBreakdown,
    pub given: Vec<TagGroup>,
    pub received: Vec<TagGroup>,
}

/// One account with rating and tags; 404 when unknown.
pub async fn get_account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<AccountDetail>, StatusCode> {
    let account = state.directory.get(&address).ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(AccountDetail {
        name: state.directory.display_name(&address, &NoAnnotations),
        account: account.clone(),
        rating: state.ratings.breakdown(&address),
        given: given_tag_groups(account),
        received: state.received.groups(&address),
        address,
    }))
}

/// Tag types by usage.
pub async fn list_tags(State(state): State<AppState>) -> Json<Vec<TagUsage>> {
    Json(tag_usage(&state.directory))
}

/// Givers and receivers of one tag type.
pub async fn get_tag(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<TagDetails> {
    Json(tag_details(&state.directory, &name))
}

/// Volunteering targets.
pub async fn list_volunteers(State(state): State<AppState>) -> Json<Vec<Volunteer>> {
    Json(volunteers(&state.directory))
}

/// Balance ranking query string.
#[derive(Debug, Default, Deserialize)]
pub struct BalancesQuery {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub favorites: Option<String>,
    #[serde(default)]
    pub favorites_only: bool,
}

/// One row of the balance ranking.
#[derive(Debug, Serialize)]
pub struct BalanceRow {
    pub address: Address,
    pub name: Option<String>,
    pub score: f64,
    pub balances: BTreeMap<String, String>,
    /// Same amounts as `balances`, compacted for display.
    pub formatted: BTreeMap<String, String>,
}

/// Accounts ranked by a token or by total holdings.
pub async fn list_balances(
    State(state): State<AppState>,
    Query(params): Query<BalancesQuery>,
) -> Json<Vec<BalanceRow>> {
    let annotations = ClientState {
        favorites: favorite_set(params.favorites.as_deref()),
        ..ClientState::default()
    };
    let ranked = rank_balances(
        &state.directory,
        params.token.as_deref(),
        params.favorites_only,
        &annotations,
    );

    Json(
        ranked
            .into_iter()
            .map(|entry| BalanceRow {
                address: entry.address.to_string(),
                name: entry.name.map(str::to_string),
                score: entry.score,
                balances: entry.balances.clone(),
                formatted: entry
                    .balances
                    .iter()
                    .map(|(asset, amount)| (asset.clone(), format_amount(amount)))
                    .collect(),
            })
            .collect(),
    )
}

/// Tokens available for ranking.
pub async fn list_tokens(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(token_choices(&state.directory))
}

/// Graph query string.
#[derive(Debug, Deserialize)]
pub struct GraphQuery {
    pub center: String,
    #[serde(default = "default_depth")]
    pub depth: usize,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}
fn default_width() -> f64 {
    DEFAULT_WIDTH
}
fn default_height() -> f64 {
    DEFAULT_HEIGHT
}

/// Laid-out relationship graph around `center`.
pub async fn get_graph(
    State(state): State<AppState>,
    Query(params): Query<GraphQuery>,
) -> Result<Json<RelationshipGraph>, (StatusCode, String)> {
    if params.center.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "center must not be empty".to_string()));
    }
    if !(params.width > 0.0 && params.height > 0.0) {
        return Err((
            StatusCode::BAD_REQUEST,
            "width and height must be positive".to_string(),
        ));
    }

    let mut request = GraphRequest::new(params.center.as_str()).with_depth(params.depth);
    if let Some(tag) = params.tag {
        request = request.with_tag(tag);
    }

    let mut graph = build_graph(&state.directory, &request, &NoAnnotations);
    layout(&mut graph, &params.center, params.width, params.height);
    Ok(Json(graph))
}
