use serde::Serialize;
use uuid::Uuid;

use souq_config::Sources;

use crate::Result;

/// Analytics record for one confirmed search submission.
#[derive(Clone, Debug, Serialize)]
pub struct SearchLogEntry {
	pub log_id: Uuid,
	pub term: String,
	/// Active search radius in miles, or "unlimited" when no geo filter is
	/// active.
	pub radius: String,
}
impl SearchLogEntry {
	pub fn new(term: &str, radius_miles: Option<f64>) -> Self {
		Self {
			log_id: Uuid::new_v4(),
			term: term.to_string(),
			radius: radius_miles.map(|miles| miles.to_string()).unwrap_or_else(|| {
				"unlimited".to_string()
			}),
		}
	}
}

/// Writes the search-history list to the authenticated user's record.
pub async fn persist_history(
	cfg: &Sources,
	path: &str,
	identity: &str,
	terms: &[String],
) -> Result<()> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, path);
	let body = serde_json::json!({ "identity": identity, "terms": terms });

	client.post(url).json(&body).send().await?.error_for_status()?;

	Ok(())
}

/// Appends one analytics log entry.
pub async fn log_search(cfg: &Sources, path: &str, entry: &SearchLogEntry) -> Result<()> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, path);

	client.post(url).json(entry).send().await?.error_for_status()?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn log_entry_records_unlimited_radius() {
		let entry = SearchLogEntry::new("winter coat", None);

		assert_eq!(entry.radius, "unlimited");
		assert_eq!(entry.term, "winter coat");
	}

	#[test]
	fn log_entry_records_active_radius() {
		let entry = SearchLogEntry::new("car", Some(25.0));

		assert_eq!(entry.radius, "25");
	}
}
