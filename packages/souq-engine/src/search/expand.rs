//! Query tokenization and synonym expansion. A query becomes one expansion
//! group per token; matching is AND across groups and OR within a group.

use std::collections::HashMap;

use souq_domain::listing::SourceKind;

/// Lowercases and splits on whitespace, dropping empty tokens.
pub fn tokenize(query: &str) -> Vec<String> {
	query.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// One query token together with its configured synonyms, deduplicated. The
/// original token is always the first member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpansionGroup {
	pub members: Vec<String>,
}
impl ExpansionGroup {
	fn of(token: &str, synonyms: &HashMap<String, Vec<String>>) -> Self {
		let mut members = vec![token.to_string()];

		if let Some(expansion) = synonyms.get(token) {
			for synonym in expansion {
				if !members.contains(synonym) {
					members.push(synonym.clone());
				}
			}
		}

		Self { members }
	}
}

pub fn expand(tokens: &[String], synonyms: &HashMap<String, Vec<String>>) -> Vec<ExpansionGroup> {
	tokens.iter().map(|token| ExpansionGroup::of(token, synonyms)).collect()
}

/// Conjunctive-of-disjunctions match: every group must have at least one
/// member appearing as a substring of `text`. `text` is expected lowercased.
pub fn matches(text: &str, groups: &[ExpansionGroup]) -> bool {
	groups.iter().all(|group| group.members.iter().any(|member| text.contains(member.as_str())))
}

/// Category steering. When every expanded term belongs to exactly one of the
/// two vocabularies, the query is unambiguous about its category and the
/// caller may narrow to the matching source kind. Narrowing to an empty set
/// is the caller's responsibility to reject.
pub fn steer_category(
	groups: &[ExpansionGroup],
	vehicle_vocabulary: &[String],
	retail_vocabulary: &[String],
) -> Option<SourceKind> {
	if groups.is_empty() {
		return None;
	}

	let terms = groups.iter().flat_map(|group| group.members.iter());
	let mut all_vehicle = true;
	let mut all_retail = true;
	let mut any_vehicle = false;
	let mut any_retail = false;

	for term in terms {
		let in_vehicle = vehicle_vocabulary.contains(term);
		let in_retail = retail_vocabulary.contains(term);

		all_vehicle &= in_vehicle;
		all_retail &= in_retail;
		any_vehicle |= in_vehicle;
		any_retail |= in_retail;
	}

	if all_vehicle && !any_retail {
		Some(SourceKind::Vehicle)
	} else if all_retail && !any_vehicle {
		Some(SourceKind::Retail)
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn synonyms() -> HashMap<String, Vec<String>> {
		[("car".to_string(), vec!["cars".to_string(), "vehicle".to_string(), "sedan".to_string()])]
			.into_iter()
			.collect()
	}

	#[test]
	fn tokenize_lowercases_and_drops_empties() {
		assert_eq!(tokenize("  Winter   Coat "), ["winter", "coat"]);
		assert!(tokenize("   ").is_empty());
	}

	#[test]
	fn group_keeps_token_first_and_dedupes() {
		let table =
			[("car".to_string(), vec!["cars".to_string(), "car".to_string()])].into_iter().collect();
		let groups = expand(&tokenize("car"), &table);

		assert_eq!(groups[0].members, ["car", "cars"]);
	}

	#[test]
	fn synonym_hit_satisfies_its_group() {
		let groups = expand(&tokenize("car"), &synonyms());

		assert!(matches("2018 sedan low mileage", &groups));
		assert!(!matches("winter coat", &groups));
	}

	#[test]
	fn two_word_query_needs_both_concepts() {
		let groups = expand(&tokenize("car suit"), &synonyms());

		assert!(!matches("sedan for sale", &groups));
		assert!(matches("sedan with a suit in the trunk", &groups));
	}

	#[test]
	fn steering_picks_the_unambiguous_vocabulary() {
		let vehicle = vec!["car".to_string(), "cars".to_string(), "vehicle".to_string(), "sedan".to_string()];
		let retail = vec!["phone".to_string(), "couch".to_string()];
		let groups = expand(&tokenize("car"), &synonyms());

		assert_eq!(steer_category(&groups, &vehicle, &retail), Some(SourceKind::Vehicle));

		let groups = expand(&tokenize("couch"), &HashMap::new());

		assert_eq!(steer_category(&groups, &vehicle, &retail), Some(SourceKind::Retail));

		let groups = expand(&tokenize("winter coat"), &HashMap::new());

		assert_eq!(steer_category(&groups, &vehicle, &retail), None);
	}
}
