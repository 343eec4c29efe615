//! Joins normalized listings to their owning business profile. Pure function
//! of the two inputs; identity and price fields are never touched.

use std::collections::{HashMap, HashSet};

use souq_domain::listing::Listing;
use souq_providers::business::BusinessRecord;

/// The business ids actually referenced by a batch, deduplicated. The lookup
/// query is restricted to this set.
pub fn referenced_business_ids(listings: &[Listing]) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut out = Vec::new();

	for listing in listings {
		if let Some(id) = listing.business_id.as_deref()
			&& seen.insert(id.to_string())
		{
			out.push(id.to_string());
		}
	}

	out
}

/// Attaches `business_verified` and `business_plan`, and overrides `location`
/// with the business city/state when the profile supplies one. A missing
/// profile leaves the listing at its defaults.
pub fn enrich(mut listings: Vec<Listing>, businesses: &HashMap<String, BusinessRecord>) -> Vec<Listing> {
	for listing in &mut listings {
		let Some(record) = listing.business_id.as_deref().and_then(|id| businesses.get(id)) else {
			continue;
		};

		listing.business_verified = record.verified;
		listing.business_plan = record.plan.clone();

		if let Some(city_state) = record.city_state() {
			listing.location = Some(city_state);
		}
	}

	listings
}

#[cfg(test)]
mod tests {
	use super::*;
	use souq_domain::listing::SourceKind;

	fn listing(id: &str, business_id: Option<&str>) -> Listing {
		Listing {
			id: id.to_string(),
			source: SourceKind::Retail,
			title: "Item".to_string(),
			category: None,
			condition: None,
			description: None,
			price: None,
			location: Some("Somewhere".to_string()),
			image_urls: Vec::new(),
			lat: None,
			lon: None,
			created_at: None,
			business_id: business_id.map(str::to_string),
			user_id: None,
			business_verified: false,
			business_plan: None,
		}
	}

	#[test]
	fn collects_referenced_ids_once() {
		let listings =
			vec![listing("1", Some("b1")), listing("2", Some("b1")), listing("3", None)];

		assert_eq!(referenced_business_ids(&listings), vec!["b1".to_string()]);
	}

	#[test]
	fn join_sets_verification_and_location() {
		let mut businesses = HashMap::new();

		businesses.insert("b1".to_string(), BusinessRecord {
			id: "b1".to_string(),
			verified: true,
			plan: Some("premium".to_string()),
			city: Some("Austin".to_string()),
			state: Some("TX".to_string()),
		});

		let enriched = enrich(vec![listing("1", Some("b1")), listing("2", Some("b2"))], &businesses);

		assert!(enriched[0].business_verified);
		assert_eq!(enriched[0].business_plan.as_deref(), Some("premium"));
		assert_eq!(enriched[0].location.as_deref(), Some("Austin, TX"));
		// Unmatched id keeps its defaults.
		assert!(!enriched[1].business_verified);
		assert_eq!(enriched[1].location.as_deref(), Some("Somewhere"));
	}
}
