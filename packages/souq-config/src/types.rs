use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub sources: Sources,
	pub geocoder: Geocoder,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub fairness: Fairness,
	#[serde(default)]
	pub pagination: Pagination,
	#[serde(default)]
	pub history: History,
	#[serde(default)]
	pub cache: Cache,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Sources {
	pub api_base: String,
	/// Base URL relative image paths resolve against, per-source namespace
	/// appended.
	pub asset_base: String,
	pub timeout_ms: u64,
	pub business_path: String,
	pub retail: SourceEndpoint,
	pub vehicle: SourceEndpoint,
	pub real_estate: SourceEndpoint,
	pub individual: SourceEndpoint,
}

#[derive(Debug, Deserialize)]
pub struct SourceEndpoint {
	pub path: String,
	pub storage_namespace: String,
}

#[derive(Debug, Deserialize)]
pub struct Geocoder {
	pub api_base: String,
	pub path: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub debounce_ms: u64,
	/// Static synonym table: token -> expansion members. Keys and members are
	/// lowercased during config normalization.
	pub synonyms: HashMap<String, Vec<String>>,
	pub vehicle_vocabulary: Vec<String>,
	pub retail_vocabulary: Vec<String>,
	pub history_api_path: String,
	pub analytics_api_path: String,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			debounce_ms: 275,
			synonyms: default_synonyms(),
			vehicle_vocabulary: default_vehicle_vocabulary(),
			retail_vocabulary: default_retail_vocabulary(),
			history_api_path: "/v1/search_history".to_string(),
			analytics_api_path: "/v1/search_logs".to_string(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub current_term_weight: i64,
	pub history_term_weight: i64,
	pub min_history_token_len: usize,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { current_term_weight: 2, history_term_weight: 1, min_history_token_len: 2 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Fairness {
	pub window_size: usize,
}
impl Default for Fairness {
	fn default() -> Self {
		Self { window_size: 8 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
	pub initial_visible: usize,
	pub increment: usize,
}
impl Default for Pagination {
	fn default() -> Self {
		Self { initial_visible: 6, increment: 6 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct History {
	pub max_entries: usize,
}
impl Default for History {
	fn default() -> Self {
		Self { max_entries: 10 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub snapshot_ttl_seconds: i64,
}
impl Default for Cache {
	fn default() -> Self {
		Self { snapshot_ttl_seconds: 300 }
	}
}

fn default_synonyms() -> HashMap<String, Vec<String>> {
	let entries: [(&str, &[&str]); 6] = [
		("car", &["cars", "vehicle", "auto", "dealership", "dealer", "sedan"]),
		("truck", &["trucks", "pickup", "vehicle"]),
		("home", &["house", "apartment", "property", "real estate"]),
		("apartment", &["apartments", "flat", "rental", "property"]),
		("phone", &["phones", "smartphone", "mobile"]),
		("furniture", &["couch", "sofa", "table", "chair"]),
	];

	entries
		.into_iter()
		.map(|(token, synonyms)| {
			(token.to_string(), synonyms.iter().map(|s| s.to_string()).collect())
		})
		.collect()
}

fn default_vehicle_vocabulary() -> Vec<String> {
	["car", "cars", "vehicle", "auto", "dealership", "dealer", "sedan", "truck", "trucks", "pickup"]
		.into_iter()
		.map(str::to_string)
		.collect()
}

fn default_retail_vocabulary() -> Vec<String> {
	["phone", "phones", "smartphone", "mobile", "furniture", "couch", "sofa", "table", "chair"]
		.into_iter()
		.map(str::to_string)
		.collect()
}
