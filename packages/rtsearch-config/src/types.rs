use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub elasticsearch: Elasticsearch,
	pub embedding: Embedding,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Elasticsearch {
	pub url: String,
	pub username: String,
	pub password: String,
	pub timeout_ms: u64,
	pub indexes: Indexes,
}

#[derive(Debug, Deserialize)]
pub struct Indexes {
	/// Full ticket records plus their summary embeddings.
	pub summary: String,
	/// Raw-ticket embeddings keyed by ticket_id.
	pub embeddings: String,
}

#[derive(Debug, Deserialize)]
pub struct Embedding {
	pub url: String,
	pub model: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct Search {
	#[serde(default)]
	pub limits: SearchLimits,
	#[serde(default)]
	pub weights: SearchWeights,
	#[serde(default)]
	pub thresholds: SearchThresholds,
	#[serde(default)]
	pub boosts: FieldBoosts,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
	/// Per-index candidate cap for the vector queries.
	pub max_embedding_results: u32,
	/// Candidate cap after score fusion.
	pub max_combined_results: usize,
	/// Cap on the final response.
	pub max_final_results: u32,
	/// Cap on the wildcard match-all response.
	pub wildcard_max_results: u32,
}
impl Default for SearchLimits {
	fn default() -> Self {
		Self {
			max_embedding_results: 300,
			max_combined_results: 500,
			max_final_results: 500,
			wildcard_max_results: 10_000,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchWeights {
	/// Fusion weight of the raw-ticket embedding score.
	pub original_embedding: f32,
	/// Fusion weight of the summary embedding score.
	pub summary_embedding: f32,
	/// Blend weight of the fused vector score during rescoring.
	pub semantic: f32,
	/// Blend weight of the lexical match score during rescoring.
	pub text: f32,
}
impl Default for SearchWeights {
	fn default() -> Self {
		Self { original_embedding: 0.3, summary_embedding: 0.7, semantic: 0.6, text: 0.4 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchThresholds {
	/// Minimum shifted cosine similarity accepted from either vector index.
	pub min_embedding_score: f32,
	/// Minimum score the rescored query itself keeps.
	pub min_final_score: f32,
	/// Significance floor; hits must score strictly above it.
	pub min_significant_score: f32,
}
impl Default for SearchThresholds {
	fn default() -> Self {
		Self { min_embedding_score: 1.0, min_final_score: 1.0, min_significant_score: 1.0 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FieldBoosts {
	pub ticket_id: f32,
	pub title: f32,
	pub summary: f32,
	pub summary_long: f32,
	pub requesting_entity: f32,
	pub queue: f32,
	pub status: f32,
	pub keyword: f32,
}
impl Default for FieldBoosts {
	fn default() -> Self {
		Self {
			ticket_id: 5.0,
			title: 3.0,
			summary: 2.0,
			summary_long: 2.0,
			requesting_entity: 5.0,
			queue: 5.0,
			status: 5.0,
			keyword: 2.0,
		}
	}
}
