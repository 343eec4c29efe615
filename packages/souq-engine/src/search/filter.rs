//! Price-range and geo-radius predicates over the matched set.

use souq_domain::{
	geo::{Coordinate, haversine_miles},
	listing::Listing,
	price,
};

/// Price filter. While any bound is active, a listing whose price cannot be
/// parsed to a number is excluded; otherwise the parsed amount must fall
/// inside `[min, max]`, each bound independently optional.
pub fn price_in_bounds(listing: &Listing, min: Option<f64>, max: Option<f64>) -> bool {
	if min.is_none() && max.is_none() {
		return true;
	}

	let Some(amount) = listing.price.as_ref().and_then(price::Price::amount) else { return false };

	if let Some(min) = min
		&& amount < min
	{
		return false;
	}
	if let Some(max) = max
		&& amount > max
	{
		return false;
	}

	true
}

/// Geo filter. A listing without coordinates is retained; the radius only
/// excludes listings that are known to be too far away.
pub fn within_radius(listing: &Listing, center: Coordinate, radius_miles: f64) -> bool {
	let Some(position) = listing_coordinate(listing) else { return true };

	haversine_miles(center, position) <= radius_miles
}

pub fn listing_coordinate(listing: &Listing) -> Option<Coordinate> {
	match (listing.lat, listing.lon) {
		(Some(lat), Some(lon)) => Some(Coordinate { lat, lon }),
		_ => None,
	}
}
