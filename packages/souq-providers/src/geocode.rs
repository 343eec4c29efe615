use serde_json::Value;

use souq_config::Geocoder;
use souq_domain::geo::Coordinate;

use crate::Result;

/// Resolves a free-text place name (ZIP, city) into a coordinate. No
/// candidates is a normal outcome and yields `None`, leaving the geo filter
/// inactive.
pub async fn resolve(cfg: &Geocoder, place: &str) -> Result<Option<Coordinate>> {
	let trimmed = place.trim();

	if trimmed.is_empty() {
		return Ok(None);
	}

	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let json: Value =
		client.get(url).query(&[("q", trimmed)]).send().await?.error_for_status()?.json().await?;

	Ok(parse_geocode_response(json))
}

fn parse_geocode_response(json: Value) -> Option<Coordinate> {
	let candidates = match &json {
		Value::Array(rows) => rows.as_slice(),
		_ => json
			.get("candidates")
			.or_else(|| json.get("results"))
			.and_then(|v| v.as_array())
			.map(|rows| rows.as_slice())?,
	};
	let first = candidates.first()?;
	let lat = number_field(first, &["lat", "latitude"])?;
	let lon = number_field(first, &["lon", "lng", "longitude"])?;

	Some(Coordinate { lat, lon })
}

fn number_field(row: &Value, aliases: &[&str]) -> Option<f64> {
	for alias in aliases {
		let Some(value) = row.get(*alias) else { continue };

		if let Some(number) = value.as_f64() {
			return Some(number);
		}
		if let Some(number) = value.as_str().and_then(|raw| raw.parse().ok()) {
			return Some(number);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn picks_first_candidate() {
		let json = serde_json::json!({
			"candidates": [
				{ "lat": 40.0, "lng": -74.0 },
				{ "lat": 41.0, "lng": -75.0 }
			]
		});
		let coordinate = parse_geocode_response(json).expect("candidate expected");

		assert_eq!(coordinate, Coordinate { lat: 40.0, lon: -74.0 });
	}

	#[test]
	fn parses_stringly_typed_coordinates() {
		let json = serde_json::json!([{ "latitude": "40.5", "longitude": "-73.9" }]);
		let coordinate = parse_geocode_response(json).expect("candidate expected");

		assert_eq!(coordinate, Coordinate { lat: 40.5, lon: -73.9 });
	}

	#[test]
	fn empty_candidates_is_a_miss() {
		let json = serde_json::json!({ "candidates": [] });

		assert!(parse_geocode_response(json).is_none());
	}
}
