use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use rtsearch_config::FieldBoosts;
use rtsearch_domain::{QueryKind, SearchFilters, Ticket, classify, embedded_ticket_id};
use rtsearch_index::{Hit, query, query::SearchBody};

use crate::{
	SearchService, ServiceError, ServiceResult, filter,
	fusion::{self, CandidateScore},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	#[serde(rename = "searchTerm")]
	pub search_term: String,
	#[serde(default)]
	pub filters: Option<SearchFilters>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub hits: Vec<Ticket>,
}

impl SearchService {
	/// Runs one search request through the retrieval state machine:
	/// classification, then the wildcard, identifier, or semantic path, with
	/// the lexical fallback covering embedding failure, vector-search failure,
	/// and an empty fused candidate set.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let term = req.search_term.trim();

		if term.is_empty() {
			return Ok(SearchResponse { hits: Vec::new() });
		}

		let filter_clauses = filter::compile(req.filters.as_ref());

		match classify(term) {
			QueryKind::Wildcard => self.wildcard_search(filter_clauses).await,
			QueryKind::Identifier(ticket_id) => {
				match self.exact_lookup(ticket_id).await {
					Ok(Some(ticket)) => {
						debug!(ticket_id, "Exact identifier match.");

						return Ok(SearchResponse { hits: vec![strip_embedding(ticket)] });
					},
					Ok(None) => {
						debug!(ticket_id, "No exact identifier match, treating term as free text.")
					},
					Err(err) => warn!(
						error = %err,
						ticket_id,
						"Identifier lookup failed, treating term as free text.",
					),
				}

				self.semantic_search(term, &filter_clauses).await
			},
			QueryKind::FreeText => self.semantic_search(term, &filter_clauses).await,
		}
	}

	/// Filtered match-all; returns the corpus subset matching all active
	/// filter facets.
	async fn wildcard_search(&self, filter_clauses: Vec<Value>) -> ServiceResult<SearchResponse> {
		let body =
			SearchBody::new(query::bool_query(vec![query::match_all()], Vec::new(), filter_clauses))
				.exclude_embedding()
				.size(self.cfg.search.limits.wildcard_max_results)
				.build();
		let hits = self
			.backend
			.search(&self.cfg.elasticsearch.indexes.summary, &body)
			.await
			.map_err(|err| ServiceError::Backend { message: err.to_string() })?;

		debug!(total = hits.len(), "Wildcard search completed.");

		let hits = hits
			.into_iter()
			.map(|hit| decode_ticket(hit.source).map(strip_embedding))
			.collect::<ServiceResult<Vec<_>>>()?;

		Ok(SearchResponse { hits })
	}

	async fn semantic_search(
		&self,
		term: &str,
		filter_clauses: &[Value],
	) -> ServiceResult<SearchResponse> {
		let identifier_hint = embedded_ticket_id(term);
		let vector = match self.embed_term(term).await {
			Ok(vector) => vector,
			Err(err) => {
				warn!(error = %err, "Embedding generation failed, falling back to text-only search.");

				return self.lexical_search(term, identifier_hint, filter_clauses).await;
			},
		};

		debug!(dimensions = vector.len(), "Embedding generated.");

		let candidates = match self.retrieve_candidates(&vector).await {
			Ok(candidates) => candidates,
			Err(err) => {
				warn!(error = %err, "Vector retrieval failed, falling back to text-only search.");

				return self.lexical_search(term, identifier_hint, filter_clauses).await;
			},
		};

		if candidates.is_empty() {
			debug!("No fused candidates, falling back to text-only search.");

			return self.lexical_search(term, identifier_hint, filter_clauses).await;
		}

		self.rescore_candidates(term, identifier_hint, candidates, filter_clauses).await
	}

	async fn embed_term(&self, term: &str) -> ServiceResult<Vec<f32>> {
		self.providers
			.embedding
			.embed(&self.cfg.embedding, term)
			.await
			.map_err(|err| ServiceError::Embedding { message: err.to_string() })
	}

	/// Issues the two similarity queries concurrently (raw-ticket embeddings
	/// and summary embeddings) and fuses the score streams. Failure of either
	/// sub-query fails the whole retrieval step.
	async fn retrieve_candidates(&self, vector: &[f32]) -> ServiceResult<Vec<i64>> {
		let limits = &self.cfg.search.limits;
		let body = SearchBody::new(query::cosine_similarity(vector))
			.min_score(self.cfg.search.thresholds.min_embedding_score)
			.size(limits.max_embedding_results)
			.source_fields(&["ticket_id"])
			.build();
		let indexes = &self.cfg.elasticsearch.indexes;
		let (original_hits, summary_hits) = tokio::try_join!(
			self.backend.search(&indexes.embeddings, &body),
			self.backend.search(&indexes.summary, &body),
		)
		.map_err(|err| ServiceError::VectorSearch { message: err.to_string() })?;

		debug!(
			original = original_hits.len(),
			summary = summary_hits.len(),
			"Vector retrieval completed.",
		);

		let original = candidate_scores(original_hits)?;
		let summary = candidate_scores(summary_hits)?;

		Ok(fusion::fuse(original, summary, &self.cfg.search.weights, limits.max_combined_results))
	}

	/// Rescore mode: the query is restricted to the fused candidate set plus
	/// the filter clauses, and the engine blends the fused vector score with
	/// the weighted lexical match.
	async fn rescore_candidates(
		&self,
		term: &str,
		identifier_hint: Option<i64>,
		candidates: Vec<i64>,
		filter_clauses: &[Value],
	) -> ServiceResult<SearchResponse> {
		let boosts = &self.cfg.search.boosts;
		let weights = &self.cfg.search.weights;
		let limits = &self.cfg.search.limits;
		let mut should = Vec::new();

		if let Some(ticket_id) = identifier_hint {
			should.push(query::term_boosted("ticket_id", ticket_id, boosts.ticket_id));
		}

		should.push(query::multi_match(term, &rescore_fields(boosts)));
		should.push(query::nested_avg("keywords", "keywords.word", term, Some(boosts.keyword)));
		should.push(query::nested_avg(
			"key_points_discussed",
			"key_points_discussed.point",
			term,
			None,
		));

		let body = SearchBody::new(query::bool_query(
			vec![query::terms("ticket_id", candidates)],
			Vec::new(),
			filter_clauses.to_vec(),
		))
		.rescore(
			limits.max_final_results,
			query::bool_query(Vec::new(), should, Vec::new()),
			weights.semantic,
			weights.text,
		)
		.min_score(self.cfg.search.thresholds.min_final_score)
		.size(limits.max_final_results)
		.exclude_embedding()
		.build();
		let hits = self
			.backend
			.search(&self.cfg.elasticsearch.indexes.summary, &body)
			.await
			.map_err(|err| ServiceError::LexicalSearch { message: err.to_string() })?;

		self.assemble(hits)
	}

	/// Fallback mode: weighted multi-field match with no candidate
	/// restriction, used when semantic retrieval cannot run or returns
	/// nothing. A soft identifier hint adds an exact-id alternative clause.
	async fn lexical_search(
		&self,
		term: &str,
		identifier_hint: Option<i64>,
		filter_clauses: &[Value],
	) -> ServiceResult<SearchResponse> {
		let boosts = &self.cfg.search.boosts;
		let text_match = query::multi_match(term, &fallback_fields(boosts));
		let query_clause = match identifier_hint {
			Some(ticket_id) => query::bool_query(
				Vec::new(),
				vec![query::term_boosted("ticket_id", ticket_id, boosts.ticket_id), text_match],
				filter_clauses.to_vec(),
			),
			None => query::bool_query(vec![text_match], Vec::new(), filter_clauses.to_vec()),
		};
		let body = SearchBody::new(query_clause)
			.size(self.cfg.search.limits.max_final_results)
			.exclude_embedding()
			.build();
		let hits = self
			.backend
			.search(&self.cfg.elasticsearch.indexes.summary, &body)
			.await
			.map_err(|err| ServiceError::LexicalSearch { message: err.to_string() })?;

		self.assemble(hits)
	}

	/// Result assembly: keep hits strictly above the significance floor,
	/// strip internal-only fields, preserve ranking order.
	fn assemble(&self, hits: Vec<Hit>) -> ServiceResult<SearchResponse> {
		let floor = self.cfg.search.thresholds.min_significant_score;
		let total = hits.len();
		let mut tickets = Vec::with_capacity(total);

		for hit in hits {
			if hit.score > floor {
				tickets.push(strip_embedding(decode_ticket(hit.source)?));
			}
		}

		debug!(total, significant = tickets.len(), "Assembled search results.");

		Ok(SearchResponse { hits: tickets })
	}
}

pub(crate) fn decode_ticket(source: Value) -> ServiceResult<Ticket> {
	serde_json::from_value(source).map_err(|err| ServiceError::Backend {
		message: format!("Failed to decode ticket record: {err}."),
	})
}

fn strip_embedding(mut ticket: Ticket) -> Ticket {
	ticket.embedding = None;

	ticket
}

fn candidate_scores(hits: Vec<Hit>) -> ServiceResult<Vec<CandidateScore>> {
	hits.into_iter()
		.map(|hit| {
			let ticket_id = hit
				.source
				.get("ticket_id")
				.and_then(Value::as_i64)
				.ok_or_else(|| ServiceError::VectorSearch {
					message: "Similarity hit is missing its ticket_id.".to_string(),
				})?;

			Ok(CandidateScore { ticket_id, score: hit.score })
		})
		.collect()
}

/// Boosted field list for the rescore-mode lexical match.
fn rescore_fields(boosts: &FieldBoosts) -> Vec<String> {
	vec![
		format!("title^{}", boosts.title),
		format!("summary^{}", boosts.summary),
		format!("summary_long^{}", boosts.summary_long),
		"contextual_details".to_string(),
		"contextual_technical_details".to_string(),
		"category".to_string(),
		format!("requesting_entity^{}", boosts.requesting_entity),
		"data_patterns_or_trends".to_string(),
		format!("queue^{}", boosts.queue),
		"ticket_as_question".to_string(),
		format!("status^{}", boosts.status),
	]
}

/// Field list for fallback mode; nested fields are matched flat here since no
/// candidate restriction applies.
fn fallback_fields(boosts: &FieldBoosts) -> Vec<String> {
	vec![
		format!("title^{}", boosts.title),
		"summary".to_string(),
		"summary_long".to_string(),
		"contextual_details".to_string(),
		"contextual_technical_details".to_string(),
		"keywords.word".to_string(),
		"key_points_discussed.point".to_string(),
		"category".to_string(),
		"requesting_entity".to_string(),
		"data_patterns_or_trends".to_string(),
		"customer_sentiment".to_string(),
	]
}
