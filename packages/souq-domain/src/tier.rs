use serde::{Deserialize, Serialize};

/// Business subscription tier, used to bias the default feed ordering.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
	Free,
	Starter,
	Growth,
	Premium,
}
impl Tier {
	pub fn from_plan(plan: &str) -> Option<Self> {
		match plan.trim().to_lowercase().as_str() {
			"free" => Some(Self::Free),
			"starter" => Some(Self::Starter),
			"growth" => Some(Self::Growth),
			"premium" => Some(Self::Premium),
			_ => None,
		}
	}

	pub fn rank(self) -> u8 {
		match self {
			Self::Free => 1,
			Self::Starter => 2,
			Self::Growth => 3,
			Self::Premium => 4,
		}
	}
}

/// Rank for an optional plan label. Listings without a recognized plan sort
/// below every paid-or-free tier.
pub fn plan_rank(plan: Option<&str>) -> u8 {
	plan.and_then(Tier::from_plan).map(Tier::rank).unwrap_or(0)
}
