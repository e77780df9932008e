//! Narrow query-builder interface over the engine's ranking DSL. The pipeline
//! composes these instead of embedding raw query bodies in its core logic.

use serde_json::{Map, Value, json};

pub fn match_all() -> Value {
	json!({ "match_all": {} })
}

pub fn term(field: &str, value: impl Into<Value>) -> Value {
	let value = value.into();

	json!({ "term": { field: value } })
}

pub fn term_boosted(field: &str, value: impl Into<Value>, boost: f32) -> Value {
	let value = value.into();

	json!({ "term": { field: { "value": value, "boost": boost } } })
}

pub fn terms(field: &str, values: impl IntoIterator<Item = impl Into<Value>>) -> Value {
	let values: Vec<Value> = values.into_iter().map(Into::into).collect();

	json!({ "terms": { field: values } })
}

/// Caller guarantees at least one bound; an emitted range clause is never
/// fully open.
pub fn range(field: &str, gte: Option<&str>, lte: Option<&str>) -> Value {
	let mut bounds = Map::new();

	if let Some(gte) = gte {
		bounds.insert("gte".to_string(), Value::String(gte.to_string()));
	}
	if let Some(lte) = lte {
		bounds.insert("lte".to_string(), Value::String(lte.to_string()));
	}

	json!({ "range": { field: bounds } })
}

pub fn multi_match(query: &str, fields: &[String]) -> Value {
	json!({
		"multi_match": {
			"query": query,
			"fields": fields,
			"fuzziness": "AUTO",
		}
	})
}

/// Match inside a nested collection, scored by averaging over its elements.
pub fn nested_avg(path: &str, field: &str, query: &str, boost: Option<f32>) -> Value {
	let match_clause = match boost {
		Some(boost) => json!({ "match": { field: { "query": query, "boost": boost } } }),
		None => json!({ "match": { field: query } }),
	};

	json!({
		"nested": {
			"path": path,
			"query": match_clause,
			"score_mode": "avg",
		}
	})
}

/// Cosine similarity against the stored embedding, shifted by +1.0 so scores
/// stay in [0, 2].
pub fn cosine_similarity(vector: &[f32]) -> Value {
	json!({
		"script_score": {
			"query": { "exists": { "field": "embedding" } },
			"script": {
				"source": "cosineSimilarity(params.query_vector, doc['embedding']) + 1.0",
				"params": { "query_vector": vector },
			},
		}
	})
}

pub fn bool_query(must: Vec<Value>, should: Vec<Value>, filter: Vec<Value>) -> Value {
	let mut clauses = Map::new();

	if !must.is_empty() {
		clauses.insert("must".to_string(), Value::Array(must));
	}
	if !should.is_empty() {
		clauses.insert("should".to_string(), Value::Array(should));
	}
	if !filter.is_empty() {
		clauses.insert("filter".to_string(), Value::Array(filter));
	}

	json!({ "bool": clauses })
}

/// Builds the top-level search body around a query clause.
#[derive(Debug, Default)]
pub struct SearchBody {
	body: Map<String, Value>,
}
impl SearchBody {
	pub fn new(query: Value) -> Self {
		let mut body = Map::new();

		body.insert("query".to_string(), query);

		Self { body }
	}

	pub fn size(mut self, size: u32) -> Self {
		self.body.insert("size".to_string(), json!(size));

		self
	}

	pub fn min_score(mut self, min_score: f32) -> Self {
		self.body.insert("min_score".to_string(), json!(min_score));

		self
	}

	/// Restrict returned documents to the named source fields.
	pub fn source_fields(mut self, fields: &[&str]) -> Self {
		self.body.insert("_source".to_string(), json!(fields));

		self
	}

	/// Embedding vectors bloat responses and are never needed by callers.
	pub fn exclude_embedding(mut self) -> Self {
		self.body.insert("_source".to_string(), json!({ "excludes": ["embedding"] }));

		self
	}

	/// Engine-side rescoring: blends the primary query score with a secondary
	/// query using the given weights over the top `window_size` hits.
	pub fn rescore(
		mut self,
		window_size: u32,
		rescore_query: Value,
		query_weight: f32,
		rescore_query_weight: f32,
	) -> Self {
		self.body.insert(
			"rescore".to_string(),
			json!({
				"window_size": window_size,
				"query": {
					"rescore_query": rescore_query,
					"query_weight": query_weight,
					"rescore_query_weight": rescore_query_weight,
				},
			}),
		);

		self
	}

	pub fn build(self) -> Value {
		Value::Object(self.body)
	}
}
