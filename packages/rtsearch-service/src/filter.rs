use serde_json::Value;

use rtsearch_domain::SearchFilters;
use rtsearch_index::query;

/// Compiles filter facets into engine constraint clauses. A clause is only
/// emitted for a facet with at least one active constraint, and the emission
/// order is fixed (queue, status, created, updated) so logged query bodies
/// stay reproducible.
pub fn compile(filters: Option<&SearchFilters>) -> Vec<Value> {
	let mut clauses = Vec::new();
	let Some(filters) = filters else {
		return clauses;
	};

	if !filters.queue.is_empty() {
		clauses.push(query::terms("queue", filters.queue.iter().map(String::as_str)));
	}
	if !filters.status.is_empty() {
		clauses.push(query::terms("status", filters.status.iter().map(String::as_str)));
	}
	if let Some(created) = filters.created.as_ref().filter(|range| !range.is_empty()) {
		clauses.push(query::range("created", created.from_bound(), created.to_bound()));
	}
	if let Some(updated) = filters.updated.as_ref().filter(|range| !range.is_empty()) {
		clauses.push(query::range("last_updated", updated.from_bound(), updated.to_bound()));
	}

	clauses
}
