use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Embeds one text through the provider's HTTP API. No retry here; fallback
/// policy lives in the search pipeline.
pub async fn embed(cfg: &rtsearch_config::Embedding, text: &str) -> Result<Vec<f32>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/api/embeddings", cfg.url);
	let body = serde_json::json!({
		"model": cfg.model,
		"prompt": text,
	});
	let res = client.post(url).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_embedding_response(json)
}

fn parse_embedding_response(json: Value) -> Result<Vec<f32>> {
	let embedding = json
		.get("embedding")
		.and_then(Value::as_array)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Embedding response is missing the embedding array.".to_string(),
		})?;
	let mut vector = Vec::with_capacity(embedding.len());

	for value in embedding {
		let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
			message: "Embedding value must be numeric.".to_string(),
		})?;

		vector.push(number as f32);
	}

	if vector.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Embedding response contained an empty vector.".to_string(),
		});
	}

	Ok(vector)
}
