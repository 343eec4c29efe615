use time::OffsetDateTime;

use souq_domain::listing::Listing;

/// An immutable projection of the full listing set, rebuilt wholesale by each
/// refresh. Readers hold an `Arc` to the snapshot current at read time; a
/// concurrent refresh never mutates a snapshot in place.
#[derive(Clone, Debug)]
pub struct Snapshot {
	pub listings: Vec<Listing>,
	pub built_at: OffsetDateTime,
}
impl Snapshot {
	pub fn empty() -> Self {
		Self { listings: Vec::new(), built_at: OffsetDateTime::UNIX_EPOCH }
	}

	pub fn new(listings: Vec<Listing>, built_at: OffsetDateTime) -> Self {
		Self { listings, built_at }
	}

	pub fn len(&self) -> usize {
		self.listings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.listings.is_empty()
	}
}
