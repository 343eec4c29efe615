use serde_json::Value;

use souq_config::{SourceEndpoint, Sources};
use souq_domain::listing::SourceKind;

use crate::{Error, Result};

pub fn endpoint(cfg: &Sources, kind: SourceKind) -> &SourceEndpoint {
	match kind {
		SourceKind::Retail => &cfg.retail,
		SourceKind::Vehicle => &cfg.vehicle,
		SourceKind::RealEstate => &cfg.real_estate,
		SourceKind::Individual => &cfg.individual,
	}
}

/// Fetches the raw rows of one listing collection. Rows stay untyped until the
/// engine's normalization boundary.
pub async fn fetch_rows(cfg: &Sources, kind: SourceKind) -> Result<Vec<Value>> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, endpoint(cfg, kind).path);
	let json: Value = client.get(url).send().await?.error_for_status()?.json().await?;

	parse_rows_response(json)
}

fn parse_rows_response(json: Value) -> Result<Vec<Value>> {
	if let Value::Array(rows) = json {
		return Ok(rows);
	}

	let rows = json
		.get("data")
		.or_else(|| json.get("rows"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Listing response is missing a rows array.".to_string(),
		})?;

	Ok(rows.clone())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_bare_array() {
		let json = serde_json::json!([{ "id": "1" }, { "id": "2" }]);
		let rows = parse_rows_response(json).expect("parse failed");

		assert_eq!(rows.len(), 2);
	}

	#[test]
	fn accepts_data_envelope() {
		let json = serde_json::json!({ "data": [{ "id": "1" }] });
		let rows = parse_rows_response(json).expect("parse failed");

		assert_eq!(rows.len(), 1);
	}

	#[test]
	fn rejects_missing_rows() {
		let json = serde_json::json!({ "count": 3 });

		assert!(parse_rows_response(json).is_err());
	}
}
