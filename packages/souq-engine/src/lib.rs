pub mod cache;
pub mod debounce;
pub mod enrich;
pub mod favorites;
pub mod history;
pub mod normalize;
pub mod pagination;
pub mod refresh;
pub mod search;
pub mod shuffle;
pub mod snapshot;

use std::{
	collections::HashMap,
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex, RwLock},
};

use serde_json::Value;

use souq_config::{Config, Geocoder as GeocoderConfig, Sources};
use souq_domain::{geo::Coordinate, listing::SourceKind};
use souq_providers::{business::BusinessRecord, history::SearchLogEntry};

pub use pagination::FeedCursor;
pub use refresh::RefreshReport;
pub use search::{SearchItem, SearchRequest, SearchResponse, SortMode};

use cache::TtlCache;
use history::SearchHistory;
use snapshot::Snapshot;

pub type EngineResult<T> = Result<T, EngineError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug)]
pub enum EngineError {
	InvalidRequest { message: String },
	Source { message: String },
}
impl std::fmt::Display for EngineError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::Source { message } => write!(f, "Source error: {message}"),
		}
	}
}
impl std::error::Error for EngineError {}
impl From<souq_providers::Error> for EngineError {
	fn from(err: souq_providers::Error) -> Self {
		Self::Source { message: err.to_string() }
	}
}

pub trait ListingSource
where
	Self: Send + Sync,
{
	fn fetch_rows<'a>(
		&'a self,
		cfg: &'a Sources,
		kind: SourceKind,
	) -> BoxFuture<'a, souq_providers::Result<Vec<Value>>>;
}

pub trait BusinessDirectory
where
	Self: Send + Sync,
{
	fn lookup<'a>(
		&'a self,
		cfg: &'a Sources,
		ids: &'a [String],
	) -> BoxFuture<'a, souq_providers::Result<HashMap<String, BusinessRecord>>>;
}

pub trait Geocoder
where
	Self: Send + Sync,
{
	fn resolve<'a>(
		&'a self,
		cfg: &'a GeocoderConfig,
		place: &'a str,
	) -> BoxFuture<'a, souq_providers::Result<Option<Coordinate>>>;
}

pub trait HistoryStore
where
	Self: Send + Sync,
{
	fn persist<'a>(
		&'a self,
		cfg: &'a Sources,
		path: &'a str,
		identity: Option<&'a str>,
		terms: &'a [String],
	) -> BoxFuture<'a, souq_providers::Result<()>>;
}

pub trait AnalyticsSink
where
	Self: Send + Sync,
{
	fn log<'a>(
		&'a self,
		cfg: &'a Sources,
		path: &'a str,
		entry: &'a SearchLogEntry,
	) -> BoxFuture<'a, souq_providers::Result<()>>;
}

#[derive(Clone)]
pub struct Providers {
	pub listings: Arc<dyn ListingSource>,
	pub businesses: Arc<dyn BusinessDirectory>,
	pub geocoder: Arc<dyn Geocoder>,
	pub history: Arc<dyn HistoryStore>,
	pub analytics: Arc<dyn AnalyticsSink>,
}
impl Providers {
	pub fn new(
		listings: Arc<dyn ListingSource>,
		businesses: Arc<dyn BusinessDirectory>,
		geocoder: Arc<dyn Geocoder>,
		history: Arc<dyn HistoryStore>,
		analytics: Arc<dyn AnalyticsSink>,
	) -> Self {
		Self { listings, businesses, geocoder, history, analytics }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self {
			listings: provider.clone(),
			businesses: provider.clone(),
			geocoder: provider.clone(),
			history: provider.clone(),
			analytics: provider,
		}
	}
}

struct DefaultProviders;

impl ListingSource for DefaultProviders {
	fn fetch_rows<'a>(
		&'a self,
		cfg: &'a Sources,
		kind: SourceKind,
	) -> BoxFuture<'a, souq_providers::Result<Vec<Value>>> {
		Box::pin(souq_providers::listings::fetch_rows(cfg, kind))
	}
}

impl BusinessDirectory for DefaultProviders {
	fn lookup<'a>(
		&'a self,
		cfg: &'a Sources,
		ids: &'a [String],
	) -> BoxFuture<'a, souq_providers::Result<HashMap<String, BusinessRecord>>> {
		Box::pin(souq_providers::business::fetch_businesses(cfg, ids))
	}
}

impl Geocoder for DefaultProviders {
	fn resolve<'a>(
		&'a self,
		cfg: &'a GeocoderConfig,
		place: &'a str,
	) -> BoxFuture<'a, souq_providers::Result<Option<Coordinate>>> {
		Box::pin(souq_providers::geocode::resolve(cfg, place))
	}
}

impl HistoryStore for DefaultProviders {
	fn persist<'a>(
		&'a self,
		cfg: &'a Sources,
		path: &'a str,
		identity: Option<&'a str>,
		terms: &'a [String],
	) -> BoxFuture<'a, souq_providers::Result<()>> {
		Box::pin(async move {
			// Unauthenticated history stays in the consumer's local storage;
			// only signed-in identities round-trip to the backend.
			let Some(identity) = identity else { return Ok(()) };

			souq_providers::history::persist_history(cfg, path, identity, terms).await
		})
	}
}

impl AnalyticsSink for DefaultProviders {
	fn log<'a>(
		&'a self,
		cfg: &'a Sources,
		path: &'a str,
		entry: &'a SearchLogEntry,
	) -> BoxFuture<'a, souq_providers::Result<()>> {
		Box::pin(souq_providers::history::log_search(cfg, path, entry))
	}
}

/// The aggregation and ranking engine. The in-memory snapshot is single-writer
/// (a refresh swaps it) and multi-reader (search reads an immutable `Arc`).
pub struct Engine {
	pub cfg: Config,
	pub providers: Providers,
	snapshot: RwLock<Arc<Snapshot>>,
	snapshot_cache: Mutex<TtlCache<Arc<Snapshot>>>,
	search_cache: Mutex<TtlCache<Arc<SearchResponse>>>,
	history: Mutex<SearchHistory>,
}
impl Engine {
	pub fn new(cfg: Config) -> Self {
		Self::with_providers(cfg, Providers::default())
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		let history_cap = cfg.history.max_entries;

		Self {
			cfg,
			providers,
			snapshot: RwLock::new(Arc::new(Snapshot::empty())),
			snapshot_cache: Mutex::new(TtlCache::new()),
			search_cache: Mutex::new(TtlCache::new()),
			history: Mutex::new(SearchHistory::new(history_cap)),
		}
	}

	pub fn snapshot(&self) -> Arc<Snapshot> {
		match self.snapshot.read() {
			Ok(guard) => guard.clone(),
			Err(poisoned) => poisoned.into_inner().clone(),
		}
	}

	pub(crate) fn install_snapshot(&self, snapshot: Arc<Snapshot>) {
		match self.snapshot.write() {
			Ok(mut guard) => *guard = snapshot,
			Err(poisoned) => *poisoned.into_inner() = snapshot,
		}
	}

	pub fn history_terms(&self) -> Vec<String> {
		lock_unpoisoned(&self.history).entries().to_vec()
	}

	/// Resolves a user-supplied place string to a filter center. Both a
	/// no-candidate lookup and a transport failure leave the geo filter
	/// inactive.
	pub async fn resolve_center(&self, place: &str) -> Option<Coordinate> {
		match self.providers.geocoder.resolve(&self.cfg.geocoder, place).await {
			Ok(center) => center,
			Err(err) => {
				tracing::warn!(error = %err, %place, "Geocode lookup failed.");

				None
			},
		}
	}
}

pub(crate) fn lock_unpoisoned<'a, T>(mutex: &'a Mutex<T>) -> std::sync::MutexGuard<'a, T> {
	match mutex.lock() {
		Ok(guard) => guard,
		Err(poisoned) => poisoned.into_inner(),
	}
}
