//! Full feed refresh. Four concurrent source fetches, one business lookup
//! over the referenced ids, then normalize, enrich, tier-presort and shuffle
//! into a fresh snapshot that is swapped in atomically. A failure anywhere
//! installs an empty snapshot — a refresh is never partial.

use std::sync::Arc;

use rand::thread_rng;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

use souq_domain::listing::SourceKind;

use crate::{
	Engine, EngineResult, cache, enrich, lock_unpoisoned, search::sort, shuffle,
	snapshot::Snapshot,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
	pub listing_count: usize,
	pub sources_failed: bool,
	pub served_from_cache: bool,
}

impl Engine {
	/// Rebuilds the snapshot. Within the cache TTL a non-forced refresh
	/// reinstalls the cached snapshot without touching the sources.
	pub async fn refresh(&self, force: bool) -> EngineResult<RefreshReport> {
		let now = OffsetDateTime::now_utc();

		if !force {
			let cached =
				lock_unpoisoned(&self.snapshot_cache).get(cache::FEED_CACHE_KEY, now).cloned();

			if let Some(snapshot) = cached {
				self.install_snapshot(snapshot.clone());

				return Ok(RefreshReport {
					listing_count: snapshot.len(),
					sources_failed: false,
					served_from_cache: true,
				});
			}
		}

		let snapshot = match self.build_snapshot(now).await {
			Ok(snapshot) => snapshot,
			Err(err) => {
				tracing::error!(error = %err, "Feed refresh failed, installing an empty snapshot.");

				let empty = Arc::new(Snapshot::empty());

				lock_unpoisoned(&self.snapshot_cache).invalidate(cache::FEED_CACHE_KEY);
				self.invalidate_search_cache();
				self.install_snapshot(empty);

				return Ok(RefreshReport {
					listing_count: 0,
					sources_failed: true,
					served_from_cache: false,
				});
			},
		};
		let snapshot = Arc::new(snapshot);
		let ttl = Duration::seconds(self.cfg.cache.snapshot_ttl_seconds);

		lock_unpoisoned(&self.snapshot_cache).insert(
			cache::FEED_CACHE_KEY,
			snapshot.clone(),
			ttl,
			now,
		);
		self.invalidate_search_cache();
		self.install_snapshot(snapshot.clone());
		tracing::info!(listings = snapshot.len(), "Feed refresh complete.");

		Ok(RefreshReport {
			listing_count: snapshot.len(),
			sources_failed: false,
			served_from_cache: false,
		})
	}

	async fn build_snapshot(&self, now: OffsetDateTime) -> EngineResult<Snapshot> {
		let sources = &self.cfg.sources;
		let listings = &self.providers.listings;
		let (retail, vehicle, real_estate, individual) = tokio::join!(
			listings.fetch_rows(sources, SourceKind::Retail),
			listings.fetch_rows(sources, SourceKind::Vehicle),
			listings.fetch_rows(sources, SourceKind::RealEstate),
			listings.fetch_rows(sources, SourceKind::Individual),
		);
		let batches = [
			(SourceKind::Retail, retail?),
			(SourceKind::Vehicle, vehicle?),
			(SourceKind::RealEstate, real_estate?),
			(SourceKind::Individual, individual?),
		];
		let mut listings = Vec::new();

		for (kind, rows) in &batches {
			listings.extend(crate::normalize::normalize_rows(*kind, rows, sources));
		}

		let business_ids = enrich::referenced_business_ids(&listings);
		let businesses = self.providers.businesses.lookup(sources, &business_ids).await?;
		let mut listings = enrich::enrich(listings, &businesses);

		sort::tier_presort(&mut listings);
		shuffle::windowed_shuffle(&mut listings, self.cfg.fairness.window_size, &mut thread_rng());

		Ok(Snapshot::new(listings, now))
	}
}
