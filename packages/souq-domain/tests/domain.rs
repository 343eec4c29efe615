use souq_domain::{
	geo::{Coordinate, haversine_miles},
	listing::{FavoriteRecord, Listing, SourceKind},
	price::{Price, parse_amount},
	tier::{Tier, plan_rank},
};

fn listing(source: SourceKind, id: &str) -> Listing {
	Listing {
		id: id.to_string(),
		source,
		title: "Winter Coat".to_string(),
		category: Some("Clothing".to_string()),
		condition: None,
		description: Some("Warm down coat".to_string()),
		price: Some(Price::Text("$40".to_string())),
		location: Some("Nashville, TN".to_string()),
		image_urls: vec!["https://cdn.example.com/retail/coat.jpg".to_string()],
		lat: None,
		lon: None,
		created_at: None,
		business_id: None,
		user_id: Some("u1".to_string()),
		business_verified: false,
		business_plan: None,
	}
}

#[test]
fn haversine_nyc_to_la() {
	let nyc = Coordinate { lat: 40.7128, lon: -74.0060 };
	let la = Coordinate { lat: 34.0522, lon: -118.2437 };
	let distance = haversine_miles(nyc, la);

	// Known great-circle distance is ~2445 miles; allow 1%.
	assert!((distance - 2_445.0).abs() < 24.45, "NYC to LA should be ~2445mi, got {distance}");
}

#[test]
fn haversine_same_point_is_zero() {
	let point = Coordinate { lat: 44.9778, lon: -93.265 };

	assert!(haversine_miles(point, point) < 0.001);
}

#[test]
fn composite_key_is_source_prefixed() {
	assert_eq!(listing(SourceKind::Retail, "42").key(), "retail:42");
	assert_eq!(listing(SourceKind::RealEstate, "42").key(), "real_estate:42");
}

#[test]
fn searchable_text_concatenates_lowercased_fields() {
	let text = listing(SourceKind::Retail, "1").searchable_text();

	assert_eq!(text, "winter coat clothing nashville, tn warm down coat");
}

#[test]
fn parses_currency_strings() {
	assert_eq!(parse_amount("$1,200"), Some(1_200.0));
	assert_eq!(parse_amount("15000"), Some(15_000.0));
	assert_eq!(parse_amount("12.50 USD"), Some(12.5));
	assert_eq!(parse_amount("Contact seller"), None);
}

#[test]
fn price_amount_falls_back_to_none_on_text() {
	assert_eq!(Price::Number(40.0).amount(), Some(40.0));
	assert_eq!(Price::Text("$40".to_string()).amount(), Some(40.0));
	assert_eq!(Price::Text("negotiable".to_string()).amount(), None);
	assert_eq!(Price::Text("negotiable".to_string()).display(), "negotiable");
}

#[test]
fn price_deserializes_both_forms() {
	let number: Price = serde_json::from_value(serde_json::json!(15_000)).expect("number form");
	let text: Price = serde_json::from_value(serde_json::json!("$40")).expect("text form");

	assert_eq!(number, Price::Number(15_000.0));
	assert_eq!(text, Price::Text("$40".to_string()));
}

#[test]
fn tier_ordering_matches_plan_ladder() {
	assert!(Tier::Premium.rank() > Tier::Growth.rank());
	assert!(Tier::Growth.rank() > Tier::Starter.rank());
	assert!(Tier::Starter.rank() > Tier::Free.rank());
	assert!(Tier::Free.rank() > plan_rank(None));
	assert_eq!(plan_rank(Some("PREMIUM")), 4);
	assert_eq!(plan_rank(Some("unknown")), 0);
}

#[test]
fn favorite_record_snapshots_the_cover_image() {
	let listing = listing(SourceKind::Retail, "7");
	let record = FavoriteRecord::of(&listing);

	assert_eq!(record.key, "retail:7");
	assert_eq!(record.cover_image.as_deref(), Some("https://cdn.example.com/retail/coat.jpg"));
}
