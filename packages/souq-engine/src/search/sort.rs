//! Ordering. Query-time results sort by relevance with layered tie-breaks;
//! the refresh-time tier presort establishes the coarse ordering the fairness
//! shuffle operates on.

use std::cmp::Ordering;

use time::OffsetDateTime;

use souq_domain::{listing::Listing, price::Price, tier};

use crate::search::{SearchItem, SortMode};

/// Score descending, then the explicit sort mode; without a mode, distance
/// ascending when a center is active (coordinate-less listings after all
/// coordinate-bearing ones), otherwise newest first.
pub fn order_results(items: &mut [SearchItem], mode: Option<SortMode>, center_active: bool) {
	items.sort_by(|a, b| {
		b.score.cmp(&a.score).then_with(|| tie_break(a, b, mode, center_active))
	});
}

fn tie_break(a: &SearchItem, b: &SearchItem, mode: Option<SortMode>, center_active: bool) -> Ordering {
	match mode {
		Some(SortMode::PriceAsc) => by_amount(a, b, true),
		Some(SortMode::PriceDesc) => by_amount(a, b, false),
		Some(SortMode::Newest) => newest_first(a.listing.created_at, b.listing.created_at),
		None if center_active => by_distance(a, b),
		None => newest_first(a.listing.created_at, b.listing.created_at),
	}
}

fn by_amount(a: &SearchItem, b: &SearchItem, ascending: bool) -> Ordering {
	let amount = |item: &SearchItem| item.listing.price.as_ref().and_then(Price::amount);

	// Unpriced listings sort last in either direction.
	match (amount(a), amount(b)) {
		(Some(a), Some(b)) if ascending => a.total_cmp(&b),
		(Some(a), Some(b)) => b.total_cmp(&a),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

fn by_distance(a: &SearchItem, b: &SearchItem) -> Ordering {
	match (a.distance_miles, b.distance_miles) {
		(Some(a), Some(b)) => a.total_cmp(&b),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => newest_first(a.listing.created_at, b.listing.created_at),
	}
}

fn newest_first(a: Option<OffsetDateTime>, b: Option<OffsetDateTime>) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => b.cmp(&a),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

/// Refresh-time coarse ordering: subscription tier rank descending, recency
/// breaking ties. Runs once per refresh, before the fairness shuffle.
pub fn tier_presort(listings: &mut [Listing]) {
	listings.sort_by(|a, b| {
		let rank_a = tier::plan_rank(a.business_plan.as_deref());
		let rank_b = tier::plan_rank(b.business_plan.as_deref());

		rank_b.cmp(&rank_a).then_with(|| newest_first(a.created_at, b.created_at))
	});
}
