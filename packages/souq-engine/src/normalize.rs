//! Maps the four heterogeneous source record shapes into the canonical
//! `Listing`. Normalization is total: missing or malformed optional fields
//! default, never error, and running it twice over the same row yields the
//! same value.

use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use souq_config::Sources;
use souq_domain::{
	listing::{Listing, SourceKind},
	price::Price,
};

/// First-matching-alias-wins field table, one per source shape.
pub struct AliasTable {
	pub title: &'static [&'static str],
	pub fallback_title: &'static str,
	pub category: &'static [&'static str],
	pub condition: &'static [&'static str],
	pub description: &'static [&'static str],
	pub price: &'static [&'static str],
	pub location: &'static [&'static str],
	pub image_list: &'static [&'static str],
	pub image_single: &'static [&'static str],
	pub business_id: &'static [&'static str],
	pub user_id: &'static [&'static str],
}

const RETAIL: AliasTable = AliasTable {
	title: &["title", "name", "item_name"],
	fallback_title: "Retail item",
	category: &["category", "category_name"],
	condition: &["condition", "item_condition"],
	description: &["description", "details"],
	price: &["price", "amount"],
	location: &["location", "city"],
	image_list: &["images", "image_urls", "photos"],
	image_single: &["image", "image_path", "photo"],
	business_id: &["business_id"],
	user_id: &["user_id", "owner_id", "seller_id"],
};

const VEHICLE: AliasTable = AliasTable {
	title: &["title", "name", "model_name"],
	fallback_title: "Vehicle listing",
	category: &["category", "body_type"],
	condition: &["condition"],
	description: &["description", "details"],
	price: &["price", "asking_price"],
	location: &["location", "city"],
	image_list: &["images", "image_urls", "photos"],
	image_single: &["image", "image_path", "photo"],
	business_id: &["business_id", "dealership_id"],
	user_id: &["user_id", "seller_id"],
};

const REAL_ESTATE: AliasTable = AliasTable {
	title: &["title", "name", "property_name"],
	fallback_title: "Property listing",
	category: &["category", "property_type"],
	condition: &["condition"],
	description: &["description", "details"],
	price: &["price", "asking_price", "rent"],
	location: &["location", "address", "city"],
	image_list: &["images", "image_urls", "photos"],
	image_single: &["image", "image_path", "photo"],
	business_id: &["business_id", "agency_id"],
	user_id: &["user_id", "agent_id"],
};

const INDIVIDUAL: AliasTable = AliasTable {
	title: &["title", "name", "item_name"],
	fallback_title: "Individual listing",
	category: &["category"],
	condition: &["condition"],
	description: &["description", "details"],
	price: &["price", "amount"],
	location: &["location", "city"],
	image_list: &["images", "image_urls", "photos"],
	image_single: &["image", "image_path", "photo"],
	business_id: &["business_id"],
	user_id: &["user_id", "seller_id"],
};

pub fn alias_table(kind: SourceKind) -> &'static AliasTable {
	match kind {
		SourceKind::Retail => &RETAIL,
		SourceKind::Vehicle => &VEHICLE,
		SourceKind::RealEstate => &REAL_ESTATE,
		SourceKind::Individual => &INDIVIDUAL,
	}
}

pub fn normalize_rows(kind: SourceKind, rows: &[Value], cfg: &Sources) -> Vec<Listing> {
	rows.iter().map(|row| normalize_row(kind, row, cfg)).collect()
}

pub fn normalize_row(kind: SourceKind, row: &Value, cfg: &Sources) -> Listing {
	let table = alias_table(kind);
	let namespace = &souq_providers::listings::endpoint(cfg, kind).storage_namespace;
	let id = string_field(row, &["id", "listing_id", "uuid"])
		.or_else(|| row.get("id").map(|v| v.to_string()))
		.unwrap_or_default();
	let title =
		string_field(row, table.title).unwrap_or_else(|| table.fallback_title.to_string());

	Listing {
		id,
		source: kind,
		title,
		category: string_field(row, table.category),
		condition: string_field(row, table.condition),
		description: string_field(row, table.description),
		price: price_field(row, table.price),
		location: string_field(row, table.location),
		image_urls: image_urls(row, table, &cfg.asset_base, namespace),
		lat: number_field(row, &["lat", "latitude"]),
		lon: number_field(row, &["lon", "lng", "longitude"]),
		created_at: timestamp_field(row, &["created_at", "inserted_at", "listed_at"]),
		business_id: string_field(row, table.business_id),
		user_id: string_field(row, table.user_id),
		business_verified: false,
		business_plan: None,
	}
}

fn string_field(row: &Value, aliases: &[&str]) -> Option<String> {
	for alias in aliases {
		if let Some(value) = row.get(*alias).and_then(Value::as_str) {
			let trimmed = value.trim();

			if !trimmed.is_empty() {
				return Some(trimmed.to_string());
			}
		}
	}

	None
}

fn number_field(row: &Value, aliases: &[&str]) -> Option<f64> {
	for alias in aliases {
		let Some(value) = row.get(*alias) else { continue };

		if let Some(number) = value.as_f64() {
			return Some(number);
		}
		if let Some(number) = value.as_str().and_then(|raw| raw.trim().parse().ok()) {
			return Some(number);
		}
	}

	None
}

fn price_field(row: &Value, aliases: &[&str]) -> Option<Price> {
	for alias in aliases {
		match row.get(*alias) {
			Some(Value::Number(number)) => return number.as_f64().map(Price::Number),
			Some(Value::String(raw)) => {
				let trimmed = raw.trim();

				if !trimmed.is_empty() {
					return Some(Price::Text(trimmed.to_string()));
				}
			},
			_ => {},
		}
	}

	None
}

fn timestamp_field(row: &Value, aliases: &[&str]) -> Option<OffsetDateTime> {
	for alias in aliases {
		let Some(value) = row.get(*alias) else { continue };

		if let Some(raw) = value.as_str()
			&& let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339)
		{
			return Some(ts);
		}
		if let Some(seconds) = value.as_i64()
			&& let Ok(ts) = OffsetDateTime::from_unix_timestamp(seconds)
		{
			return Some(ts);
		}
	}

	None
}

/// Image payloads arrive as a JSON array, a JSON-encoded string, or a single
/// path. All three decode to the same ordered URL list; the first element is
/// the cover image.
fn image_urls(row: &Value, table: &AliasTable, asset_base: &str, namespace: &str) -> Vec<String> {
	for alias in table.image_list {
		match row.get(*alias) {
			Some(Value::Array(items)) => return resolve_paths(collect_strings(items), asset_base, namespace),
			Some(Value::String(raw)) => {
				if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
					return resolve_paths(collect_strings(&items), asset_base, namespace);
				}

				let trimmed = raw.trim();

				if !trimmed.is_empty() {
					return resolve_paths(vec![trimmed.to_string()], asset_base, namespace);
				}
			},
			_ => {},
		}
	}

	for alias in table.image_single {
		if let Some(raw) = row.get(*alias).and_then(Value::as_str) {
			let trimmed = raw.trim();

			if !trimmed.is_empty() {
				return resolve_paths(vec![trimmed.to_string()], asset_base, namespace);
			}
		}
	}

	Vec::new()
}

fn collect_strings(items: &[Value]) -> Vec<String> {
	items
		.iter()
		.filter_map(Value::as_str)
		.map(str::trim)
		.filter(|path| !path.is_empty())
		.map(str::to_string)
		.collect()
}

fn resolve_paths(paths: Vec<String>, asset_base: &str, namespace: &str) -> Vec<String> {
	paths.into_iter().map(|path| resolve_url(&path, asset_base, namespace)).collect()
}

pub fn resolve_url(path: &str, asset_base: &str, namespace: &str) -> String {
	if path.starts_with("http://") || path.starts_with("https://") {
		return path.to_string();
	}

	let base = asset_base.trim_end_matches('/');
	let relative = path.trim_start_matches('/');

	format!("{base}/{namespace}/{relative}")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sources() -> Sources {
		let toml = r#"
api_base      = "http://127.0.0.1:9000"
asset_base    = "https://cdn.souq.test/storage"
business_path = "/v1/businesses/lookup"
timeout_ms    = 5000

[retail]
path              = "/v1/items"
storage_namespace = "items"

[vehicle]
path              = "/v1/vehicles"
storage_namespace = "vehicles"

[real_estate]
path              = "/v1/properties"
storage_namespace = "properties"

[individual]
path              = "/v1/classifieds"
storage_namespace = "classifieds"
"#;

		toml::from_str(toml).expect("sources config")
	}

	#[test]
	fn first_matching_alias_wins() {
		let row = serde_json::json!({
			"id": "v9",
			"name": "Fallback Name",
			"title": "2020 Sedan",
			"asking_price": "15000"
		});
		let listing = normalize_row(SourceKind::Vehicle, &row, &sources());

		assert_eq!(listing.title, "2020 Sedan");
		assert_eq!(listing.price, Some(Price::Text("15000".to_string())));
	}

	#[test]
	fn missing_title_falls_back_per_source() {
		let row = serde_json::json!({ "id": "1" });

		assert_eq!(normalize_row(SourceKind::Retail, &row, &sources()).title, "Retail item");
		assert_eq!(
			normalize_row(SourceKind::RealEstate, &row, &sources()).title,
			"Property listing"
		);
	}

	#[test]
	fn decodes_json_encoded_image_string() {
		let row = serde_json::json!({ "id": "1", "images": "[\"a.jpg\", \"b.jpg\"]" });
		let listing = normalize_row(SourceKind::Retail, &row, &sources());

		assert_eq!(
			listing.image_urls,
			vec![
				"https://cdn.souq.test/storage/items/a.jpg".to_string(),
				"https://cdn.souq.test/storage/items/b.jpg".to_string(),
			]
		);
	}

	#[test]
	fn single_path_and_absolute_urls_resolve() {
		let row = serde_json::json!({ "id": "1", "image": "/cover.png" });
		let listing = normalize_row(SourceKind::Vehicle, &row, &sources());

		assert_eq!(listing.image_urls, vec![
			"https://cdn.souq.test/storage/vehicles/cover.png".to_string()
		]);
		assert_eq!(
			resolve_url("https://elsewhere.test/x.jpg", "https://cdn.souq.test", "items"),
			"https://elsewhere.test/x.jpg"
		);
	}

	#[test]
	fn normalization_is_idempotent() {
		let row = serde_json::json!({
			"id": "7",
			"item_name": "Winter Coat",
			"price": 40,
			"photos": ["coat.jpg"],
			"created_at": "2026-01-15T12:00:00Z"
		});
		let first = normalize_row(SourceKind::Retail, &row, &sources());
		let second = normalize_row(SourceKind::Retail, &row, &sources());

		assert_eq!(first, second);
		assert_eq!(first.key(), "retail:7");
		assert_eq!(first.price, Some(Price::Number(40.0)));
		assert!(first.created_at.is_some());
	}

	#[test]
	fn stringly_typed_coordinates_parse() {
		let row = serde_json::json!({ "id": "1", "latitude": "40.7", "lng": -74.0 });
		let listing = normalize_row(SourceKind::Individual, &row, &sources());

		assert_eq!(listing.lat, Some(40.7));
		assert_eq!(listing.lon, Some(-74.0));
	}
}
