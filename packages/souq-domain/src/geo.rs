use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3_958.8;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Coordinate {
	pub lat: f64,
	pub lon: f64,
}

/// Haversine great-circle distance between two lat/lon points in miles.
pub fn haversine_miles(from: Coordinate, to: Coordinate) -> f64 {
	let d_lat = (to.lat - from.lat).to_radians();
	let d_lon = (to.lon - from.lon).to_radians();
	let from_lat = from.lat.to_radians();
	let to_lat = to.lat.to_radians();

	let a = (d_lat / 2.0).sin().powi(2)
		+ from_lat.cos() * to_lat.cos() * (d_lon / 2.0).sin().powi(2);
	let c = 2.0 * a.sqrt().asin();

	EARTH_RADIUS_MILES * c
}
