use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use rtsearch_config::{Config, Elasticsearch, Embedding, Indexes, Search, Service};
use rtsearch_domain::SearchFilters;
use rtsearch_index::Hit;
use rtsearch_service::{
	BoxFuture, EmbeddingProvider, Providers, SearchBackend, SearchRequest, SearchService,
	ServiceError,
};

type IndexResult = rtsearch_index::Result<Vec<Hit>>;

/// Routes scripted responses by query shape, mirroring how the live engine
/// would see the pipeline's distinct query bodies.
#[derive(Default)]
struct MockBackend {
	exact: Mutex<Option<IndexResult>>,
	vector_original: Mutex<Option<IndexResult>>,
	vector_summary: Mutex<Option<IndexResult>>,
	rescore: Mutex<Option<IndexResult>>,
	fallback: Mutex<Option<IndexResult>>,
	wildcard: Mutex<Option<IndexResult>>,
	calls: Mutex<Vec<(String, Value)>>,
}
impl MockBackend {
	fn respond(&self, index: &str, body: &Value) -> IndexResult {
		let slot = if body["query"]["script_score"].is_object() {
			if index == "ticket_embeddings" { &self.vector_original } else { &self.vector_summary }
		} else if body["rescore"].is_object() {
			&self.rescore
		} else if body["query"]["term"].is_object() {
			&self.exact
		} else if body["query"]["bool"]["must"][0]["match_all"].is_object() {
			&self.wildcard
		} else {
			&self.fallback
		};

		slot.lock().unwrap().take().unwrap_or_else(|| Ok(Vec::new()))
	}

	fn calls(&self) -> Vec<(String, Value)> {
		self.calls.lock().unwrap().clone()
	}
}
impl SearchBackend for MockBackend {
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, rtsearch_index::Result<Vec<Hit>>> {
		Box::pin(async move {
			self.calls.lock().unwrap().push((index.to_string(), body.clone()));

			self.respond(index, body)
		})
	}
}

struct FixedEmbedder(Vec<f32>);
impl EmbeddingProvider for FixedEmbedder {
	fn embed<'a>(
		&'a self,
		_cfg: &'a rtsearch_config::Embedding,
		_text: &'a str,
	) -> BoxFuture<'a, rtsearch_providers::Result<Vec<f32>>> {
		Box::pin(async move { Ok(self.0.clone()) })
	}
}

struct FailingEmbedder;
impl EmbeddingProvider for FailingEmbedder {
	fn embed<'a>(
		&'a self,
		_cfg: &'a rtsearch_config::Embedding,
		_text: &'a str,
	) -> BoxFuture<'a, rtsearch_providers::Result<Vec<f32>>> {
		Box::pin(async move {
			Err(rtsearch_providers::Error::InvalidResponse {
				message: "Embedding provider offline.".to_string(),
			})
		})
	}
}

fn test_config() -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		elasticsearch: Elasticsearch {
			url: "http://localhost:9200".to_string(),
			username: "elastic".to_string(),
			password: "secret".to_string(),
			timeout_ms: 1_000,
			indexes: Indexes {
				summary: "ticket_summary".to_string(),
				embeddings: "ticket_embeddings".to_string(),
			},
		},
		embedding: Embedding {
			url: "http://localhost:11434".to_string(),
			model: "nomic-embed-text:latest".to_string(),
			timeout_ms: 1_000,
		},
		search: Search::default(),
	}
}

fn service(backend: Arc<MockBackend>, embedder: Arc<dyn EmbeddingProvider>) -> SearchService {
	SearchService::with_providers(test_config(), backend, Providers { embedding: embedder })
}

fn request(term: &str) -> SearchRequest {
	SearchRequest { search_term: term.to_string(), filters: None }
}

fn ticket_hit(score: f32, ticket_id: i64) -> Hit {
	Hit {
		score,
		source: json!({ "ticket_id": ticket_id, "title": format!("Ticket {ticket_id}") }),
	}
}

fn id_hit(score: f32, ticket_id: i64) -> Hit {
	Hit { score, source: json!({ "ticket_id": ticket_id }) }
}

fn invalid_response() -> rtsearch_index::Error {
	rtsearch_index::Error::InvalidResponse { message: "Search backend offline.".to_string() }
}

#[tokio::test]
async fn empty_term_returns_empty_hits_without_upstream_calls() {
	let backend = Arc::new(MockBackend::default());
	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1])));
	let response = service.search(request("   ")).await.expect("search failed");

	assert!(response.hits.is_empty());
	assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn wildcard_returns_filtered_match_all() {
	let backend = Arc::new(MockBackend::default());

	*backend.wildcard.lock().unwrap() =
		Some(Ok(vec![ticket_hit(1.0, 1), ticket_hit(1.0, 2)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1])));
	let filters: SearchFilters =
		serde_json::from_value(json!({ "status": ["open"] })).expect("filters failed");
	let response = service
		.search(SearchRequest { search_term: "*".to_string(), filters: Some(filters) })
		.await
		.expect("search failed");

	assert_eq!(response.hits.len(), 2);

	let calls = backend.calls();

	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].0, "ticket_summary");
	assert_eq!(
		calls[0].1["query"]["bool"]["filter"],
		json!([{ "terms": { "status": ["open"] } }])
	);
	assert_eq!(calls[0].1["_source"], json!({ "excludes": ["embedding"] }));
	assert_eq!(calls[0].1["size"], json!(10_000));
}

#[tokio::test]
async fn identifier_hit_short_circuits_to_single_match() {
	let backend = Arc::new(MockBackend::default());

	*backend.exact.lock().unwrap() = Some(Ok(vec![ticket_hit(1.0, 42)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1])));
	let response = service.search(request("#42")).await.expect("search failed");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].ticket_id, 42);

	let calls = backend.calls();

	assert_eq!(calls.len(), 1);
	assert_eq!(calls[0].1, json!({ "query": { "term": { "ticket_id": 42 } } }));
}

#[tokio::test]
async fn identifier_miss_falls_through_to_free_text() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Ok(vec![id_hit(1.7, 7)]));
	*backend.vector_summary.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 7)]));
	*backend.rescore.lock().unwrap() = Some(Ok(vec![ticket_hit(1.5, 7)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));
	let response = service.search(request("#42")).await.expect("search failed");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].ticket_id, 7);

	let rescore_call = backend
		.calls()
		.into_iter()
		.find(|(_, body)| body["rescore"].is_object())
		.expect("rescore query must run");
	let should = &rescore_call.1["rescore"]["query"]["rescore_query"]["bool"]["should"];

	// The missed identifier survives as a soft exact-id boost.
	assert_eq!(should[0]["term"]["ticket_id"]["value"], json!(42));
	assert_eq!(should[0]["term"]["ticket_id"]["boost"], json!(5.0));
}

#[tokio::test]
async fn fused_candidates_feed_the_rescore_query_in_order() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.vector_summary.lock().unwrap() =
		Some(Ok(vec![id_hit(1.8, 5), id_hit(1.6, 9)]));
	*backend.rescore.lock().unwrap() =
		Some(Ok(vec![ticket_hit(1.9, 5), ticket_hit(1.4, 9)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));
	let response = service.search(request("printer jam")).await.expect("search failed");
	let order: Vec<i64> = response.hits.iter().map(|ticket| ticket.ticket_id).collect();

	assert_eq!(order, vec![5, 9]);

	let rescore_call = backend
		.calls()
		.into_iter()
		.find(|(_, body)| body["rescore"].is_object())
		.expect("rescore query must run");
	let body = &rescore_call.1;

	assert_eq!(body["query"]["bool"]["must"][0]["terms"]["ticket_id"], json!([5, 9]));
	assert_eq!(body["rescore"]["window_size"], json!(500));

	let query_weight =
		body["rescore"]["query"]["query_weight"].as_f64().expect("query_weight missing");
	let rescore_weight = body["rescore"]["query"]["rescore_query_weight"]
		.as_f64()
		.expect("rescore_query_weight missing");

	assert!((query_weight - 0.6).abs() < 1e-6);
	assert!((rescore_weight - 0.4).abs() < 1e-6);

	// No identifier in the term, so the should list starts with the
	// multi-field match followed by the two nested matches.
	let should = &body["rescore"]["query"]["rescore_query"]["bool"]["should"];

	assert!(should[0]["multi_match"].is_object());
	assert_eq!(should[1]["nested"]["path"], json!("keywords"));
	assert_eq!(should[1]["nested"]["score_mode"], json!("avg"));
	assert_eq!(should[2]["nested"]["path"], json!("key_points_discussed"));
}

#[tokio::test]
async fn embedding_failure_falls_back_to_lexical_search() {
	let backend = Arc::new(MockBackend::default());

	*backend.fallback.lock().unwrap() = Some(Ok(vec![ticket_hit(1.6, 3)]));

	let service = service(backend.clone(), Arc::new(FailingEmbedder));
	let response = service.search(request("printer jam")).await.expect("search failed");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].ticket_id, 3);

	let calls = backend.calls();

	assert_eq!(calls.len(), 1);
	assert!(calls[0].1["rescore"].is_null());
	assert!(calls[0].1["query"]["bool"]["must"][0]["multi_match"].is_object());
}

#[tokio::test]
async fn vector_search_failure_falls_back_to_lexical_search() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Err(invalid_response()));
	*backend.fallback.lock().unwrap() = Some(Ok(vec![ticket_hit(1.6, 3)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));
	let response = service.search(request("printer jam")).await.expect("search failed");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].ticket_id, 3);
}

#[tokio::test]
async fn empty_fused_candidates_fall_back_to_lexical_search() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Ok(Vec::new()));
	*backend.vector_summary.lock().unwrap() = Some(Ok(Vec::new()));
	*backend.fallback.lock().unwrap() = Some(Ok(vec![ticket_hit(1.3, 11)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));
	let response = service.search(request("printer jam")).await.expect("search failed");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].ticket_id, 11);
}

#[tokio::test]
async fn fallback_identifier_hint_adds_exact_id_alternative() {
	let backend = Arc::new(MockBackend::default());

	*backend.fallback.lock().unwrap() = Some(Ok(Vec::new()));

	let service = service(backend.clone(), Arc::new(FailingEmbedder));
	let response = service.search(request("printer 42")).await.expect("search failed");

	assert!(response.hits.is_empty());

	let calls = backend.calls();
	let should = &calls[0].1["query"]["bool"]["should"];

	assert_eq!(should[0]["term"]["ticket_id"]["value"], json!(42));
	assert!(should[1]["multi_match"].is_object());
	assert!(calls[0].1["query"]["bool"]["must"].is_null());
}

#[tokio::test]
async fn lexical_failure_is_fatal() {
	let backend = Arc::new(MockBackend::default());

	*backend.fallback.lock().unwrap() = Some(Err(invalid_response()));

	let service = service(backend.clone(), Arc::new(FailingEmbedder));
	let err = service.search(request("printer jam")).await.expect_err("search must fail");

	assert!(matches!(err, ServiceError::LexicalSearch { .. }));
}

#[tokio::test]
async fn significance_floor_is_strict() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.vector_summary.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.rescore.lock().unwrap() =
		Some(Ok(vec![ticket_hit(1.4, 5), ticket_hit(1.0, 6), ticket_hit(0.9, 7)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));
	let response = service.search(request("printer jam")).await.expect("search failed");

	// Exactly 1.0 does not clear the floor.
	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].ticket_id, 5);
}

#[tokio::test]
async fn embeddings_never_leak_into_responses() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.vector_summary.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.rescore.lock().unwrap() = Some(Ok(vec![Hit {
		score: 1.9,
		source: json!({ "ticket_id": 5, "title": "Printer jam", "embedding": [0.1, 0.2] }),
	}]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));
	let response = service.search(request("printer jam")).await.expect("search failed");

	assert!(response.hits[0].embedding.is_none());
}

#[tokio::test]
async fn vector_queries_carry_threshold_and_projection() {
	let backend = Arc::new(MockBackend::default());

	*backend.vector_original.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.vector_summary.lock().unwrap() = Some(Ok(vec![id_hit(1.8, 5)]));
	*backend.rescore.lock().unwrap() = Some(Ok(vec![ticket_hit(1.9, 5)]));

	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1, 0.2])));

	service.search(request("printer jam")).await.expect("search failed");

	let calls = backend.calls();
	let vector_calls: Vec<_> =
		calls.iter().filter(|(_, body)| body["query"]["script_score"].is_object()).collect();

	assert_eq!(vector_calls.len(), 2);

	let indexes: Vec<&str> = vector_calls.iter().map(|(index, _)| index.as_str()).collect();

	assert!(indexes.contains(&"ticket_embeddings"));
	assert!(indexes.contains(&"ticket_summary"));

	for (_, body) in vector_calls {
		assert_eq!(body["min_score"], json!(1.0));
		assert_eq!(body["size"], json!(300));
		assert_eq!(body["_source"], json!(["ticket_id"]));
	}
}

#[tokio::test]
async fn get_ticket_returns_none_for_unknown_id() {
	let backend = Arc::new(MockBackend::default());
	let service = service(backend.clone(), Arc::new(FixedEmbedder(vec![0.1])));

	assert!(service.get_ticket(404).await.expect("lookup failed").is_none());

	*backend.exact.lock().unwrap() = Some(Ok(vec![ticket_hit(1.0, 404)]));

	let ticket = service.get_ticket(404).await.expect("lookup failed").expect("ticket missing");

	assert_eq!(ticket.ticket_id, 404);
}
