use serde::{Deserialize, Serialize};

/// Structured filter facets attached to a search request. An absent facet is
/// unconstrained; an empty set-valued facet is equivalent to absence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
	#[serde(default)]
	pub queue: Vec<String>,
	#[serde(default)]
	pub status: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created: Option<DateRange>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated: Option<DateRange>,
}

/// An open-ended date range; a single bound is valid. Empty strings count as
/// absent bounds, matching what the search form submits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
	#[serde(default)]
	pub from: Option<String>,
	#[serde(default)]
	pub to: Option<String>,
}
impl DateRange {
	pub fn from_bound(&self) -> Option<&str> {
		self.from.as_deref().map(str::trim).filter(|bound| !bound.is_empty())
	}

	pub fn to_bound(&self) -> Option<&str> {
		self.to.as_deref().map(str::trim).filter(|bound| !bound.is_empty())
	}

	pub fn is_empty(&self) -> bool {
		self.from_bound().is_none() && self.to_bound().is_none()
	}
}
