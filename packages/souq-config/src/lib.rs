mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Cache, Config, Fairness, Geocoder, History, Pagination, Ranking, Search, Service,
	SourceEndpoint, Sources,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::Parse { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.sources.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "sources.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.sources.asset_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "sources.asset_base must be non-empty.".to_string(),
		});
	}
	if cfg.sources.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "sources.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (label, endpoint) in [
		("sources.retail", &cfg.sources.retail),
		("sources.vehicle", &cfg.sources.vehicle),
		("sources.real_estate", &cfg.sources.real_estate),
		("sources.individual", &cfg.sources.individual),
	] {
		if endpoint.path.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label}.path must be non-empty.") });
		}
		if endpoint.storage_namespace.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("{label}.storage_namespace must be non-empty."),
			});
		}
	}

	if cfg.geocoder.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "geocoder.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.geocoder.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "geocoder.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.search.debounce_ms == 0 {
		return Err(Error::Validation {
			message: "search.debounce_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.history_term_weight <= 0 {
		return Err(Error::Validation {
			message: "ranking.history_term_weight must be greater than zero.".to_string(),
		});
	}
	if cfg.ranking.current_term_weight <= cfg.ranking.history_term_weight {
		return Err(Error::Validation {
			message: "ranking.current_term_weight must exceed ranking.history_term_weight."
				.to_string(),
		});
	}
	if cfg.fairness.window_size == 0 {
		return Err(Error::Validation {
			message: "fairness.window_size must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.initial_visible == 0 {
		return Err(Error::Validation {
			message: "pagination.initial_visible must be greater than zero.".to_string(),
		});
	}
	if cfg.pagination.increment == 0 {
		return Err(Error::Validation {
			message: "pagination.increment must be greater than zero.".to_string(),
		});
	}
	if cfg.history.max_entries == 0 {
		return Err(Error::Validation {
			message: "history.max_entries must be greater than zero.".to_string(),
		});
	}
	if cfg.cache.snapshot_ttl_seconds <= 0 {
		return Err(Error::Validation {
			message: "cache.snapshot_ttl_seconds must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let synonyms = std::mem::take(&mut cfg.search.synonyms);

	cfg.search.synonyms = synonyms
		.into_iter()
		.filter_map(|(token, members)| {
			let token = token.trim().to_lowercase();

			if token.is_empty() {
				return None;
			}

			let members: Vec<String> = members
				.into_iter()
				.map(|member| member.trim().to_lowercase())
				.filter(|member| !member.is_empty())
				.collect();

			Some((token, members))
		})
		.collect();

	normalize_word_list(&mut cfg.search.vehicle_vocabulary);
	normalize_word_list(&mut cfg.search.retail_vocabulary);
}

fn normalize_word_list(words: &mut Vec<String>) {
	let taken = std::mem::take(words);

	*words = taken
		.into_iter()
		.map(|word| word.trim().to_lowercase())
		.filter(|word| !word.is_empty())
		.collect();
}
