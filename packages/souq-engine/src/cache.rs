//! Time-boxed key/value caches. Created empty per engine instance and passed
//! explicitly, invalidated on refresh or TTL expiry.

use std::collections::HashMap;

use time::{Duration, OffsetDateTime};

use crate::{EngineError, EngineResult};

pub const FEED_CACHE_KEY: &str = "feed_snapshot";

const SEARCH_CACHE_SCHEMA_VERSION: i32 = 1;

#[derive(Debug)]
struct CacheSlot<T> {
	value: T,
	expires_at: OffsetDateTime,
}

#[derive(Debug)]
pub struct TtlCache<T> {
	slots: HashMap<String, CacheSlot<T>>,
}
impl<T> TtlCache<T> {
	pub fn new() -> Self {
		Self { slots: HashMap::new() }
	}

	pub fn get(&self, key: &str, now: OffsetDateTime) -> Option<&T> {
		let slot = self.slots.get(key)?;

		if slot.expires_at <= now {
			return None;
		}

		Some(&slot.value)
	}

	pub fn insert(&mut self, key: &str, value: T, ttl: Duration, now: OffsetDateTime) {
		self.slots.insert(key.to_string(), CacheSlot { value, expires_at: now + ttl });
	}

	pub fn invalidate(&mut self, key: &str) {
		self.slots.remove(key);
	}

	pub fn clear(&mut self) {
		self.slots.clear();
	}

	/// Drops every expired slot. Callers run this opportunistically; `get`
	/// never serves an expired value either way.
	pub fn purge_expired(&mut self, now: OffsetDateTime) {
		self.slots.retain(|_, slot| slot.expires_at > now);
	}
}
impl<T> Default for TtlCache<T> {
	fn default() -> Self {
		Self::new()
	}
}

/// Cache key for one search state: a blake3 hash over the canonical JSON form
/// of the request, so any filter/sort/query change maps to a distinct key.
pub fn search_cache_key(request: &crate::SearchRequest) -> EngineResult<String> {
	let payload = serde_json::json!({
		"kind": "search",
		"schema_version": SEARCH_CACHE_SCHEMA_VERSION,
		"request": request,
	});
	let raw = serde_json::to_vec(&payload).map_err(|err| EngineError::InvalidRequest {
		message: format!("Failed to encode search cache key: {err}"),
	})?;

	Ok(blake3::hash(&raw).to_hex().to_string())
}
