//! The query-time pipeline: expansion, category steering, filters, scoring
//! and tie-break ordering over the current snapshot. Pure CPU work — every
//! search reads one immutable snapshot `Arc` and never touches the network.

pub mod expand;
pub mod filter;
pub mod score;
pub mod sort;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use souq_domain::{
	geo::{Coordinate, haversine_miles},
	listing::{Listing, SourceKind},
	price,
};

use crate::{Engine, EngineError, EngineResult, cache, lock_unpoisoned};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
	PriceAsc,
	PriceDesc,
	Newest,
}

/// One search state. Price bounds arrive in display form ("$1,500" is fine)
/// and are parsed the same way listing prices are.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchRequest {
	pub query: Option<String>,
	pub min_price: Option<String>,
	pub max_price: Option<String>,
	pub center: Option<Coordinate>,
	pub radius_miles: Option<f64>,
	pub sort: Option<SortMode>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SearchItem {
	pub listing: Listing,
	pub score: i64,
	pub distance_miles: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SearchResponse {
	pub items: Vec<SearchItem>,
	/// Set when category steering narrowed the result set to one source kind.
	pub narrowed_to: Option<SourceKind>,
}
impl SearchResponse {
	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}
}

impl Engine {
	/// Runs the search pipeline for one request, serving a cached response for
	/// an identical request within the cache TTL.
	pub fn search(&self, request: &SearchRequest) -> EngineResult<Arc<SearchResponse>> {
		if let Some(radius) = request.radius_miles
			&& !(radius.is_finite() && radius > 0.)
		{
			return Err(EngineError::InvalidRequest {
				message: format!("Search radius must be a positive number of miles, got {radius}."),
			});
		}

		let now = OffsetDateTime::now_utc();
		let key = cache::search_cache_key(request)?;

		if let Some(hit) = lock_unpoisoned(&self.search_cache).get(&key, now) {
			return Ok(hit.clone());
		}

		let response = Arc::new(self.run_pipeline(request));
		let ttl = Duration::seconds(self.cfg.cache.snapshot_ttl_seconds);

		lock_unpoisoned(&self.search_cache).insert(&key, response.clone(), ttl, now);

		Ok(response)
	}

	fn run_pipeline(&self, request: &SearchRequest) -> SearchResponse {
		let cfg = &self.cfg;
		let snapshot = self.snapshot();
		let tokens = request.query.as_deref().map(expand::tokenize).unwrap_or_default();
		let groups = expand::expand(&tokens, &cfg.search.synonyms);
		let mut candidates = snapshot
			.listings
			.iter()
			.filter(|listing| {
				groups.is_empty() || expand::matches(&listing.searchable_text(), &groups)
			})
			.collect::<Vec<_>>();

		// Never narrow to an empty set.
		let mut narrowed_to = None;

		if let Some(kind) = expand::steer_category(
			&groups,
			&cfg.search.vehicle_vocabulary,
			&cfg.search.retail_vocabulary,
		) {
			let narrowed = candidates
				.iter()
				.copied()
				.filter(|listing| listing.source == kind)
				.collect::<Vec<_>>();

			if !narrowed.is_empty() {
				candidates = narrowed;
				narrowed_to = Some(kind);
			}
		}

		let min = request.min_price.as_deref().and_then(price::parse_amount);
		let max = request.max_price.as_deref().and_then(price::parse_amount);

		candidates.retain(|listing| filter::price_in_bounds(listing, min, max));

		if let (Some(center), Some(radius)) = (request.center, request.radius_miles) {
			candidates.retain(|listing| filter::within_radius(listing, center, radius));
		}

		// An untouched request is a plain feed browse; it keeps the snapshot's
		// tier-presorted, fairness-shuffled order instead of re-ranking.
		let browsing = tokens.is_empty() && request.sort.is_none() && request.center.is_none();
		let history_tokens =
			lock_unpoisoned(&self.history).tokens(cfg.ranking.min_history_token_len);
		let mut items = candidates
			.into_iter()
			.map(|listing| SearchItem {
				score: score::relevance(
					&listing.searchable_text(),
					&tokens,
					&history_tokens,
					cfg.ranking.current_term_weight,
					cfg.ranking.history_term_weight,
				),
				distance_miles: request.center.and_then(|center| {
					filter::listing_coordinate(listing)
						.map(|position| haversine_miles(center, position))
				}),
				listing: listing.clone(),
			})
			.collect::<Vec<_>>();

		if !browsing {
			sort::order_results(&mut items, request.sort, request.center.is_some());
		}

		SearchResponse { items, narrowed_to }
	}

	pub(crate) fn invalidate_search_cache(&self) {
		lock_unpoisoned(&self.search_cache).clear();
	}
}
