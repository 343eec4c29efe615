//! Relevance scoring. Current-query tokens outweigh remembered history
//! tokens; scoring only ranks, it never drops a candidate.

/// Scores `text` against the distinct union of current and history tokens.
/// A current-token substring hit adds `current_weight`; a token that appears
/// only in history adds `history_weight`. `text` is expected lowercased.
pub fn relevance(
	text: &str,
	current_tokens: &[String],
	history_tokens: &[String],
	current_weight: i64,
	history_weight: i64,
) -> i64 {
	let mut score = 0;

	// Scoring runs over distinct words; a repeated query token counts once.
	for (index, token) in current_tokens.iter().enumerate() {
		if current_tokens[..index].contains(token) {
			continue;
		}
		if text.contains(token.as_str()) {
			score += current_weight;
		}
	}
	for token in history_tokens {
		if !current_tokens.contains(token) && text.contains(token.as_str()) {
			score += history_weight;
		}
	}

	score
}
