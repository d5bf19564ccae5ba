//! Search endpoints
//!
//! - `GET /api/search`: paginated single-type search
//! - `GET /api/search/all`: first results of every type at once

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use metamusic_common::db::{
    load_setting_i64, SETTING_SEARCH_ALL_LIMIT, SETTING_SEARCH_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::cards::Card;
use crate::db::search::{search_all, search_metadata, SearchAllResults, SearchParams, SearchType};
use crate::error::{ApiError, ApiResult};
use crate::pagination::{calculate_pagination, parse_page};
use crate::AppState;

const DEFAULT_PAGE_SIZE: i64 = 12;
const DEFAULT_SEARCH_ALL_LIMIT: i64 = 24;

/// Query parameters for paginated search
///
/// Kept as raw strings so malformed values fall back to defaults instead
/// of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub page: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
}

/// Paginated search response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub count: i64,
    pub items: Vec<Card>,
}

/// GET /api/search?q=&type=&page=&genre=&country=
///
/// An empty `q` returns an empty first page without querying.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let query = params.q.unwrap_or_default();
    let search_type = match params.search_type.as_deref() {
        None | Some("") => SearchType::default(),
        Some(raw) => raw.parse::<SearchType>().map_err(ApiError::BadRequest)?,
    };
    let page = parse_page(params.page.as_deref());
    let page_size =
        load_setting_i64(&state.db, SETTING_SEARCH_PAGE_SIZE, DEFAULT_PAGE_SIZE).await?;

    if query.is_empty() {
        return Ok(Json(SearchResponse {
            query,
            search_type,
            page,
            page_size,
            total_pages: 1,
            count: 0,
            items: Vec::new(),
        }));
    }

    let results = search_metadata(
        &state.db,
        &SearchParams {
            query: query.clone(),
            search_type,
            genre: params.genre,
            country: params.country,
            page,
            page_size,
        },
    )
    .await?;
    debug!("search {:?} ({}) page {}: {} matches", query, search_type, page, results.count);

    let pagination = calculate_pagination(results.count, page, page_size);
    Ok(Json(SearchResponse {
        query,
        search_type,
        page: pagination.page,
        page_size: pagination.page_size,
        total_pages: pagination.total_pages,
        count: results.count,
        items: results.items,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchAllQuery {
    pub q: Option<String>,
}

/// GET /api/search/all?q=
pub async fn search_everything(
    State(state): State<AppState>,
    Query(params): Query<SearchAllQuery>,
) -> ApiResult<Json<SearchAllResults>> {
    let limit = load_setting_i64(&state.db, SETTING_SEARCH_ALL_LIMIT, DEFAULT_SEARCH_ALL_LIMIT).await?;
    let results = search_all(&state.db, params.q.as_deref().unwrap_or_default(), limit).await?;
    Ok(Json(results))
}

pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search))
        .route("/api/search/all", get(search_everything))
}
