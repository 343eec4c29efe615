use serde::{Deserialize, Serialize};

/// A price in its source-native form. Sources disagree on whether prices are
/// numbers or display strings ("$1,200", "Contact seller"), so the raw form is
/// kept and parsed on demand.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Price {
	Number(f64),
	Text(String),
}
impl Price {
	pub fn amount(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			Self::Text(raw) => parse_amount(raw),
		}
	}

	pub fn display(&self) -> String {
		match self {
			Self::Number(value) => value.to_string(),
			Self::Text(raw) => raw.clone(),
		}
	}
}

/// Strips everything that is not a digit or a dot, then parses. Returns `None`
/// when nothing numeric remains, leaving the caller with the display string.
pub fn parse_amount(raw: &str) -> Option<f64> {
	let mut cleaned = String::with_capacity(raw.len());

	for ch in raw.chars() {
		if ch.is_ascii_digit() || ch == '.' {
			cleaned.push(ch);
		}
	}

	if cleaned.is_empty() {
		return None;
	}

	cleaned.parse().ok()
}
