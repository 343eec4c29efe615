//! In-memory provider implementations and fixtures for engine and API tests.
//! Nothing here touches the network.

mod error;

pub use error::{Error, Result};

use std::{
	collections::{HashMap, HashSet},
	sync::{Arc, Mutex},
};

use serde_json::Value;

use souq_config::{
	Cache, Config, Fairness, Geocoder as GeocoderConfig, History, Pagination, Ranking, Search,
	Service, SourceEndpoint, Sources,
};
use souq_domain::{geo::Coordinate, listing::SourceKind};
use souq_engine::{
	AnalyticsSink, BoxFuture, BusinessDirectory, Geocoder, HistoryStore, ListingSource, Providers,
};
use souq_providers::{business::BusinessRecord, history::SearchLogEntry};

/// Parses a JSON fixture into the raw-row form the sources return.
pub fn fixture_rows(raw: &str) -> Result<Vec<Value>> {
	let value: Value = serde_json::from_str(raw)?;

	match value {
		Value::Array(rows) => Ok(rows),
		other => Err(Error::Message(format!("Fixture is not a JSON array: {other}."))),
	}
}

/// A complete configuration with test endpoints and default tuning. The hosts
/// are unroutable on purpose; tests pair this with the static providers below.
pub fn test_config() -> Config {
	let endpoint = |path: &str, namespace: &str| SourceEndpoint {
		path: path.to_string(),
		storage_namespace: namespace.to_string(),
	};

	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		sources: Sources {
			api_base: "http://sources.invalid".to_string(),
			asset_base: "http://assets.invalid".to_string(),
			timeout_ms: 1_000,
			business_path: "/v1/businesses".to_string(),
			retail: endpoint("/v1/items", "items"),
			vehicle: endpoint("/v1/vehicles", "vehicles"),
			real_estate: endpoint("/v1/properties", "properties"),
			individual: endpoint("/v1/individual_items", "individual"),
		},
		geocoder: GeocoderConfig {
			api_base: "http://geocoder.invalid".to_string(),
			path: "/v1/geocode".to_string(),
			timeout_ms: 1_000,
		},
		search: Search::default(),
		ranking: Ranking::default(),
		fairness: Fairness::default(),
		pagination: Pagination::default(),
		history: History::default(),
		cache: Cache::default(),
	}
}

/// Serves canned raw rows per source kind; kinds marked as failing return an
/// invalid-response error instead.
#[derive(Default)]
pub struct StaticListingSource {
	rows: HashMap<SourceKind, Vec<Value>>,
	failing: HashSet<SourceKind>,
}
impl StaticListingSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_rows(mut self, kind: SourceKind, rows: Vec<Value>) -> Self {
		self.rows.insert(kind, rows);

		self
	}

	pub fn failing(mut self, kind: SourceKind) -> Self {
		self.failing.insert(kind);

		self
	}
}
impl ListingSource for StaticListingSource {
	fn fetch_rows<'a>(
		&'a self,
		_: &'a Sources,
		kind: SourceKind,
	) -> BoxFuture<'a, souq_providers::Result<Vec<Value>>> {
		Box::pin(async move {
			if self.failing.contains(&kind) {
				return Err(souq_providers::Error::InvalidResponse {
					message: format!("Injected failure for source {}.", kind.as_str()),
				});
			}

			Ok(self.rows.get(&kind).cloned().unwrap_or_default())
		})
	}
}

#[derive(Default)]
pub struct StaticBusinessDirectory {
	records: HashMap<String, BusinessRecord>,
	fail: bool,
}
impl StaticBusinessDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_record(mut self, record: BusinessRecord) -> Self {
		self.records.insert(record.id.clone(), record);

		self
	}

	pub fn failing(mut self) -> Self {
		self.fail = true;

		self
	}
}
impl BusinessDirectory for StaticBusinessDirectory {
	fn lookup<'a>(
		&'a self,
		_: &'a Sources,
		ids: &'a [String],
	) -> BoxFuture<'a, souq_providers::Result<HashMap<String, BusinessRecord>>> {
		Box::pin(async move {
			if self.fail {
				return Err(souq_providers::Error::InvalidResponse {
					message: "Injected business lookup failure.".to_string(),
				});
			}

			Ok(ids
				.iter()
				.filter_map(|id| self.records.get(id).map(|record| (id.clone(), record.clone())))
				.collect())
		})
	}
}

/// Resolves place names from a fixed table, lowercased.
#[derive(Default)]
pub struct StaticGeocoder {
	places: HashMap<String, Coordinate>,
}
impl StaticGeocoder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_place(mut self, place: &str, coordinate: Coordinate) -> Self {
		self.places.insert(place.to_lowercase(), coordinate);

		self
	}
}
impl Geocoder for StaticGeocoder {
	fn resolve<'a>(
		&'a self,
		_: &'a GeocoderConfig,
		place: &'a str,
	) -> BoxFuture<'a, souq_providers::Result<Option<Coordinate>>> {
		Box::pin(async move { Ok(self.places.get(&place.to_lowercase()).copied()) })
	}
}

/// Records every persisted history write for assertion.
#[derive(Default)]
pub struct MemoryHistoryStore {
	writes: Mutex<Vec<(Option<String>, Vec<String>)>>,
}
impl MemoryHistoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn writes(&self) -> Vec<(Option<String>, Vec<String>)> {
		self.writes.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl HistoryStore for MemoryHistoryStore {
	fn persist<'a>(
		&'a self,
		_: &'a Sources,
		_: &'a str,
		identity: Option<&'a str>,
		terms: &'a [String],
	) -> BoxFuture<'a, souq_providers::Result<()>> {
		Box::pin(async move {
			self.writes
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.push((identity.map(str::to_string), terms.to_vec()));

			Ok(())
		})
	}
}

/// Records every analytics entry for assertion.
#[derive(Default)]
pub struct RecordingAnalytics {
	entries: Mutex<Vec<SearchLogEntry>>,
}
impl RecordingAnalytics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn entries(&self) -> Vec<SearchLogEntry> {
		self.entries.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}
}
impl AnalyticsSink for RecordingAnalytics {
	fn log<'a>(
		&'a self,
		_: &'a Sources,
		_: &'a str,
		entry: &'a SearchLogEntry,
	) -> BoxFuture<'a, souq_providers::Result<()>> {
		Box::pin(async move {
			self.entries.lock().unwrap_or_else(|err| err.into_inner()).push(entry.clone());

			Ok(())
		})
	}
}

/// Bundles static providers, defaulting any collaborator a test does not care
/// about.
pub struct ProvidersBuilder {
	listings: Arc<StaticListingSource>,
	businesses: Arc<StaticBusinessDirectory>,
	geocoder: Arc<StaticGeocoder>,
	history: Arc<MemoryHistoryStore>,
	analytics: Arc<RecordingAnalytics>,
}
impl ProvidersBuilder {
	pub fn new() -> Self {
		Self {
			listings: Arc::new(StaticListingSource::new()),
			businesses: Arc::new(StaticBusinessDirectory::new()),
			geocoder: Arc::new(StaticGeocoder::new()),
			history: Arc::new(MemoryHistoryStore::new()),
			analytics: Arc::new(RecordingAnalytics::new()),
		}
	}

	pub fn listings(mut self, listings: StaticListingSource) -> Self {
		self.listings = Arc::new(listings);

		self
	}

	pub fn businesses(mut self, businesses: StaticBusinessDirectory) -> Self {
		self.businesses = Arc::new(businesses);

		self
	}

	pub fn geocoder(mut self, geocoder: StaticGeocoder) -> Self {
		self.geocoder = Arc::new(geocoder);

		self
	}

	pub fn history_store(&self) -> Arc<MemoryHistoryStore> {
		self.history.clone()
	}

	pub fn analytics_sink(&self) -> Arc<RecordingAnalytics> {
		self.analytics.clone()
	}

	pub fn build(self) -> Providers {
		Providers::new(self.listings, self.businesses, self.geocoder, self.history, self.analytics)
	}
}
impl Default for ProvidersBuilder {
	fn default() -> Self {
		Self::new()
	}
}
