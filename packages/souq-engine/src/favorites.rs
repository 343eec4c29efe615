//! Saved listings. Favorites survive feed refreshes because each entry keeps a
//! display snapshot of the listing alongside its composite key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use souq_domain::listing::{FavoriteRecord, Listing};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FavoriteSet {
	records: HashMap<String, FavoriteRecord>,
}
impl FavoriteSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.records.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Flips the saved state of a listing. Returns `true` when the listing is
	/// saved after the call.
	pub fn toggle(&mut self, listing: &Listing) -> bool {
		let key = listing.key();

		if self.records.remove(&key).is_some() {
			false
		} else {
			self.records.insert(key, FavoriteRecord::of(listing));

			true
		}
	}

	pub fn remove(&mut self, key: &str) -> Option<FavoriteRecord> {
		self.records.remove(key)
	}

	pub fn records(&self) -> impl Iterator<Item = &FavoriteRecord> {
		self.records.values()
	}
}
