use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// A scored document returned by the search engine.
#[derive(Debug, Clone)]
pub struct Hit {
	pub score: f32,
	pub source: Value,
}

/// Thin HTTP client for the search engine; one instance is shared across
/// requests and holds no per-request state.
pub struct IndexClient {
	client: Client,
	base_url: String,
	username: String,
	password: String,
}
impl IndexClient {
	pub fn new(cfg: &rtsearch_config::Elasticsearch) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self {
			client,
			base_url: cfg.url.clone(),
			username: cfg.username.clone(),
			password: cfg.password.clone(),
		})
	}

	pub async fn search(&self, index: &str, body: &Value) -> Result<Vec<Hit>> {
		let url = format!("{}/{index}/_search", self.base_url);
		let res = self
			.client
			.post(url)
			.basic_auth(&self.username, Some(&self.password))
			.json(body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		parse_hits(json)
	}
}

fn parse_hits(json: Value) -> Result<Vec<Hit>> {
	let hits = json
		.get("hits")
		.and_then(|wrapper| wrapper.get("hits"))
		.and_then(Value::as_array)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search response is missing the hits array.".to_string(),
		})?;

	hits.iter()
		.map(|hit| {
			let score = hit.get("_score").and_then(Value::as_f64).ok_or_else(|| {
				Error::InvalidResponse {
					message: "Search hit is missing a numeric _score.".to_string(),
				}
			})?;
			let source = hit.get("_source").cloned().ok_or_else(|| Error::InvalidResponse {
				message: "Search hit is missing its _source document.".to_string(),
			})?;

			Ok(Hit { score: score as f32, source })
		})
		.collect()
}
