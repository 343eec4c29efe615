//! Recent-search tracking. The engine keeps a short, newest-first list of
//! submitted terms; scoring reads the list as weak positive signal and the
//! backend copy is written on a fire-and-forget path.

use std::sync::Arc;

use souq_providers::history::SearchLogEntry;

use crate::{Engine, lock_unpoisoned};

#[derive(Debug)]
pub struct SearchHistory {
	entries: Vec<String>,
	cap: usize,
}
impl SearchHistory {
	pub fn new(cap: usize) -> Self {
		Self { entries: Vec::new(), cap }
	}

	/// Newest first.
	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	/// Records a term, canonicalized to trimmed lowercase. A repeated term
	/// moves to the front instead of duplicating; overflow drops the oldest.
	pub fn record(&mut self, term: &str) {
		let term = term.trim().to_lowercase();

		if term.is_empty() {
			return;
		}

		self.entries.retain(|entry| *entry != term);
		self.entries.insert(0, term);
		self.entries.truncate(self.cap);
	}

	pub fn replace(&mut self, terms: Vec<String>) {
		self.entries.clear();

		// Replay oldest first so `record` leaves the newest at the front.
		for term in terms.into_iter().rev() {
			self.record(&term);
		}
	}

	/// Distinct tokens across all remembered terms, short tokens dropped.
	pub fn tokens(&self, min_len: usize) -> Vec<String> {
		let mut tokens = Vec::new();

		for entry in &self.entries {
			for token in entry.split_whitespace() {
				if token.chars().count() >= min_len && !tokens.iter().any(|t| t == token) {
					tokens.push(token.to_string());
				}
			}
		}

		tokens
	}
}

impl Engine {
	/// Records a submitted search term and kicks off the backend history write
	/// and the analytics log entry. Both writes are best-effort: a failure is
	/// traced and dropped, never surfaced to the searcher.
	pub fn submit_search_term(
		self: &Arc<Self>,
		term: &str,
		radius_miles: Option<f64>,
		identity: Option<String>,
	) {
		let term = term.trim().to_lowercase();

		if term.is_empty() {
			return;
		}

		lock_unpoisoned(&self.history).record(&term);

		let engine = self.clone();
		let terms = self.history_terms();
		let entry = SearchLogEntry::new(&term, radius_miles);

		tokio::spawn(async move {
			let cfg = &engine.cfg;
			let persisted = engine
				.providers
				.history
				.persist(&cfg.sources, &cfg.search.history_api_path, identity.as_deref(), &terms)
				.await;

			if let Err(err) = persisted {
				tracing::warn!(error = %err, "Failed to persist search history.");
			}

			let logged = engine
				.providers
				.analytics
				.log(&cfg.sources, &cfg.search.analytics_api_path, &entry)
				.await;

			if let Err(err) = logged {
				tracing::warn!(error = %err, "Failed to log search analytics.");
			}
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dedupes_by_moving_to_front() {
		let mut history = SearchHistory::new(10);

		history.record("car");
		history.record("boat");
		history.record("Car ");

		assert_eq!(history.entries(), ["car", "boat"]);
	}

	#[test]
	fn caps_at_max_entries() {
		let mut history = SearchHistory::new(3);

		for term in ["a1", "b2", "c3", "d4"] {
			history.record(term);
		}

		assert_eq!(history.entries(), ["d4", "c3", "b2"]);
	}

	#[test]
	fn ignores_blank_terms() {
		let mut history = SearchHistory::new(10);

		history.record("   ");

		assert!(history.entries().is_empty());
	}

	#[test]
	fn tokens_drop_short_and_duplicate_words() {
		let mut history = SearchHistory::new(10);

		history.record("red car");
		history.record("car a");

		assert_eq!(history.tokens(2), ["car", "red"]);
	}

	#[test]
	fn replace_keeps_newest_first_order() {
		let mut history = SearchHistory::new(10);

		history.replace(vec!["newest".to_string(), "older".to_string(), "newest".to_string()]);

		assert_eq!(history.entries(), ["newest", "older"]);
	}
}
