use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::price::Price;

/// Origin category of a listing. Combined with the source-local id it forms
/// the globally unique key `"{source}:{id}"`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
	Retail,
	Vehicle,
	RealEstate,
	Individual,
}
impl SourceKind {
	pub const ALL: [Self; 4] = [Self::Retail, Self::Vehicle, Self::RealEstate, Self::Individual];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Retail => "retail",
			Self::Vehicle => "vehicle",
			Self::RealEstate => "real_estate",
			Self::Individual => "individual",
		}
	}
}

/// One canonical marketplace entry after normalization, regardless of origin
/// source. Listings are read-only projections; a refresh replaces the whole
/// set rather than mutating entries in place.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Listing {
	pub id: String,
	pub source: SourceKind,
	pub title: String,
	pub category: Option<String>,
	pub condition: Option<String>,
	pub description: Option<String>,
	pub price: Option<Price>,
	pub location: Option<String>,
	pub image_urls: Vec<String>,
	pub lat: Option<f64>,
	pub lon: Option<f64>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub created_at: Option<OffsetDateTime>,
	pub business_id: Option<String>,
	pub user_id: Option<String>,
	pub business_verified: bool,
	pub business_plan: Option<String>,
}
impl Listing {
	/// Stable composite identity, the sole key used for favoriting and
	/// de-duplication.
	pub fn key(&self) -> String {
		format!("{}:{}", self.source.as_str(), self.id)
	}

	/// Cover image, when any image resolved.
	pub fn cover_image(&self) -> Option<&str> {
		self.image_urls.first().map(String::as_str)
	}

	/// Lowercased concatenation of the fields keyword matching runs against.
	pub fn searchable_text(&self) -> String {
		let mut out = self.title.to_lowercase();

		for field in [&self.category, &self.location, &self.description] {
			if let Some(value) = field {
				out.push(' ');
				out.push_str(&value.to_lowercase());
			}
		}

		out
	}
}

/// Denormalized favorite cache entry, keyed identically to `Listing::key` so
/// favorite-state lookups stay O(1) against the rendered set.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FavoriteRecord {
	pub key: String,
	pub title: String,
	pub price: Option<Price>,
	pub cover_image: Option<String>,
	pub location: Option<String>,
}
impl FavoriteRecord {
	pub fn of(listing: &Listing) -> Self {
		Self {
			key: listing.key(),
			title: listing.title.clone(),
			price: listing.price.clone(),
			cover_image: listing.cover_image().map(str::to_string),
			location: listing.location.clone(),
		}
	}
}
