use std::collections::HashMap;

use serde_json::Value;

use souq_config::Sources;

use crate::{Error, Result};

/// Business profile fields the enricher joins onto listings.
#[derive(Clone, Debug, PartialEq)]
pub struct BusinessRecord {
	pub id: String,
	pub verified: bool,
	pub plan: Option<String>,
	pub city: Option<String>,
	pub state: Option<String>,
}
impl BusinessRecord {
	/// "City, ST" when the profile carries a city; the listing's own location
	/// stands otherwise.
	pub fn city_state(&self) -> Option<String> {
		let city = self.city.as_deref()?.trim();

		if city.is_empty() {
			return None;
		}

		match self.state.as_deref().map(str::trim).filter(|state| !state.is_empty()) {
			Some(state) => Some(format!("{city}, {state}")),
			None => Some(city.to_string()),
		}
	}
}

/// Looks up the business profiles for the given id set. The request carries
/// only the ids actually referenced by the current batch, never a full-table
/// fetch.
pub async fn fetch_businesses(
	cfg: &Sources,
	ids: &[String],
) -> Result<HashMap<String, BusinessRecord>> {
	if ids.is_empty() {
		return Ok(HashMap::new());
	}

	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.business_path);
	let body = serde_json::json!({ "ids": ids });
	let json: Value = client.post(url).json(&body).send().await?.error_for_status()?.json().await?;

	parse_business_response(json)
}

fn parse_business_response(json: Value) -> Result<HashMap<String, BusinessRecord>> {
	let rows = match &json {
		Value::Array(rows) => rows.as_slice(),
		_ => json
			.get("data")
			.or_else(|| json.get("businesses"))
			.and_then(|v| v.as_array())
			.map(|rows| rows.as_slice())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Business response is missing a rows array.".to_string(),
			})?,
	};
	let mut out = HashMap::new();

	for row in rows {
		let Some(id) = string_field(row, &["id", "business_id"]) else {
			continue;
		};
		let verified = row
			.get("verified")
			.or_else(|| row.get("is_verified"))
			.and_then(Value::as_bool)
			.unwrap_or(false);
		let plan = string_field(row, &["plan", "subscription_plan", "tier"]);
		let city = string_field(row, &["city"]);
		let state = string_field(row, &["state", "province"]);

		out.insert(id.clone(), BusinessRecord { id, verified, plan, city, state });
	}

	Ok(out)
}

fn string_field(row: &Value, aliases: &[&str]) -> Option<String> {
	for alias in aliases {
		if let Some(value) = row.get(*alias).and_then(Value::as_str) {
			let trimmed = value.trim();

			if !trimmed.is_empty() {
				return Some(trimmed.to_string());
			}
		}
	}

	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_aliased_fields() {
		let json = serde_json::json!({
			"data": [
				{ "business_id": "b1", "is_verified": true, "tier": "premium", "city": "Austin", "state": "TX" },
				{ "id": "b2", "plan": "free" }
			]
		});
		let records = parse_business_response(json).expect("parse failed");

		assert_eq!(records.len(), 2);
		assert!(records["b1"].verified);
		assert_eq!(records["b1"].plan.as_deref(), Some("premium"));
		assert_eq!(records["b1"].city_state().as_deref(), Some("Austin, TX"));
		assert!(!records["b2"].verified);
		assert_eq!(records["b2"].city_state(), None);
	}

	#[test]
	fn skips_rows_without_an_id() {
		let json = serde_json::json!([{ "verified": true }]);
		let records = parse_business_response(json).expect("parse failed");

		assert!(records.is_empty());
	}
}
