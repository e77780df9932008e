pub mod filter;
pub mod fusion;
pub mod search;
pub mod ticket;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use rtsearch_config::Config;
use rtsearch_index::{Hit, IndexClient};

pub use search::{SearchRequest, SearchResponse};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a rtsearch_config::Embedding,
		text: &'a str,
	) -> BoxFuture<'a, rtsearch_providers::Result<Vec<f32>>>;
}

pub trait SearchBackend
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, rtsearch_index::Result<Vec<Hit>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

/// The hybrid retrieval pipeline. Holds immutable configuration and shared
/// upstream clients only; everything else is request-local.
pub struct SearchService {
	pub cfg: Config,
	pub backend: Arc<dyn SearchBackend>,
	pub providers: Providers,
}
impl SearchService {
	pub fn new(cfg: Config, index: IndexClient) -> Self {
		Self::with_providers(
			cfg,
			Arc::new(index),
			Providers { embedding: Arc::new(DefaultProviders) },
		)
	}

	pub fn with_providers(
		cfg: Config,
		backend: Arc<dyn SearchBackend>,
		providers: Providers,
	) -> Self {
		Self { cfg, backend, providers }
	}
}

#[derive(Debug)]
pub enum ServiceError {
	/// Embedding provider unreachable or replied with garbage. Recovered via
	/// the lexical fallback, never surfaced to callers.
	Embedding { message: String },
	/// Either of the two concurrent similarity queries failed. Recovered via
	/// the lexical fallback.
	VectorSearch { message: String },
	/// The rescoring or fallback query itself failed. Fatal for the request.
	LexicalSearch { message: String },
	/// Exact lookups, wildcard queries, or record decoding failed.
	Backend { message: String },
}

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Embedding { message } => write!(f, "Embedding error: {message}"),
			Self::VectorSearch { message } => write!(f, "Vector search error: {message}"),
			Self::LexicalSearch { message } => write!(f, "Lexical search error: {message}"),
			Self::Backend { message } => write!(f, "Backend error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a rtsearch_config::Embedding,
		text: &'a str,
	) -> BoxFuture<'a, rtsearch_providers::Result<Vec<f32>>> {
		Box::pin(rtsearch_providers::embedding::embed(cfg, text))
	}
}

impl SearchBackend for IndexClient {
	fn search<'a>(
		&'a self,
		index: &'a str,
		body: &'a Value,
	) -> BoxFuture<'a, rtsearch_index::Result<Vec<Hit>>> {
		Box::pin(IndexClient::search(self, index, body))
	}
}
