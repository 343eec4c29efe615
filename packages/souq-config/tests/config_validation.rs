use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use souq_config::Error;

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

fn set_path(value: &mut Value, path: &[&str], leaf: Value) {
	let mut current = value;

	for segment in &path[..path.len() - 1] {
		current = current
			.as_table_mut()
			.expect("Config node must be a table.")
			.get_mut(*segment)
			.expect("Config path segment must exist.");
	}

	current
		.as_table_mut()
		.expect("Config node must be a table.")
		.insert(path[path.len() - 1].to_string(), leaf);
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("souq_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_mutated(mutate: impl FnOnce(&mut Value)) -> souq_config::Result<souq_config::Config> {
	let mut value = sample_value();

	mutate(&mut value);

	let payload = toml::to_string(&value).expect("Failed to render test config.");
	let path = write_temp_config(payload);
	let result = souq_config::load(&path);

	let _ = fs::remove_file(&path);

	result
}

#[test]
fn missing_file_reports_the_path() {
	let mut path = env::temp_dir();

	path.push("souq_config_test_missing.toml");

	let err = souq_config::load(&path).expect_err("Missing file must be rejected.");

	assert!(matches!(err, Error::Read { .. }));
	assert!(err.to_string().contains("marketplace config"));
}

#[test]
fn malformed_toml_reports_the_path() {
	let path = write_temp_config("service = not-a-table".to_string());
	let result = souq_config::load(&path);

	let _ = fs::remove_file(&path);

	let err = result.expect_err("Malformed TOML must be rejected.");

	assert!(matches!(err, Error::Parse { .. }));
	assert!(err.to_string().contains("not valid TOML"));
}

#[test]
fn loads_sample_config() {
	let cfg = load_mutated(|_| {}).expect("Sample config must load.");

	assert_eq!(cfg.fairness.window_size, 8);
	assert_eq!(cfg.pagination.initial_visible, 6);
	assert_eq!(cfg.history.max_entries, 10);
	assert_eq!(cfg.cache.snapshot_ttl_seconds, 300);
}

#[test]
fn normalizes_word_lists_to_lowercase() {
	let cfg = load_mutated(|value| {
		set_path(
			value,
			&["search", "vehicle_vocabulary"],
			Value::Array(vec![Value::String("  CAR ".to_string()), Value::String("".to_string())]),
		);
		set_path(
			value,
			&["search", "synonyms", "car"],
			Value::Array(vec![Value::String("SEDAN".to_string())]),
		);
	})
	.expect("Config must load.");

	assert_eq!(cfg.search.vehicle_vocabulary, vec!["car".to_string()]);
	assert_eq!(cfg.search.synonyms.get("car"), Some(&vec!["sedan".to_string()]));
}

#[test]
fn rejects_zero_fairness_window() {
	let err = load_mutated(|value| set_path(value, &["fairness", "window_size"], Value::Integer(0)))
		.expect_err("Zero window must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_inverted_scoring_weights() {
	let err = load_mutated(|value| {
		set_path(value, &["ranking", "current_term_weight"], Value::Integer(1));
		set_path(value, &["ranking", "history_term_weight"], Value::Integer(1));
	})
	.expect_err("Equal weights must be rejected.");

	assert!(err.to_string().contains("current_term_weight"));
}

#[test]
fn rejects_zero_pagination_increment() {
	let err =
		load_mutated(|value| set_path(value, &["pagination", "increment"], Value::Integer(0)))
			.expect_err("Zero increment must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn rejects_empty_storage_namespace() {
	let err = load_mutated(|value| {
		set_path(value, &["sources", "retail", "storage_namespace"], Value::String(String::new()))
	})
	.expect_err("Empty namespace must be rejected.");

	assert!(err.to_string().contains("storage_namespace"));
}

#[test]
fn rejects_non_positive_snapshot_ttl() {
	let err =
		load_mutated(|value| set_path(value, &["cache", "snapshot_ttl_seconds"], Value::Integer(0)))
			.expect_err("Zero TTL must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));
}

#[test]
fn defaults_apply_when_sections_missing() {
	let cfg = load_mutated(|value| {
		let root = value.as_table_mut().expect("Config must be a table.");

		root.remove("search");
		root.remove("ranking");
		root.remove("fairness");
		root.remove("pagination");
		root.remove("history");
		root.remove("cache");
	})
	.expect("Config with defaults must load.");

	assert_eq!(cfg.search.debounce_ms, 275);
	assert_eq!(cfg.ranking.current_term_weight, 2);
	assert_eq!(cfg.ranking.history_term_weight, 1);
	assert!(cfg.search.synonyms.contains_key("car"));
}
