mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, Elasticsearch, Embedding, FieldBoosts, Indexes, Search, SearchLimits, SearchThresholds,
	SearchWeights, Service,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.elasticsearch.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "elasticsearch.url must be non-empty.".to_string(),
		});
	}
	if cfg.elasticsearch.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "elasticsearch.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.elasticsearch.indexes.summary.trim().is_empty()
		|| cfg.elasticsearch.indexes.embeddings.trim().is_empty()
	{
		return Err(Error::Validation {
			message: "elasticsearch.indexes.summary and elasticsearch.indexes.embeddings must be non-empty."
				.to_string(),
		});
	}
	if cfg.elasticsearch.indexes.summary == cfg.elasticsearch.indexes.embeddings {
		return Err(Error::Validation {
			message: "elasticsearch.indexes.summary and elasticsearch.indexes.embeddings must name distinct indexes."
				.to_string(),
		});
	}
	if cfg.embedding.url.trim().is_empty() {
		return Err(Error::Validation { message: "embedding.url must be non-empty.".to_string() });
	}
	if cfg.embedding.model.trim().is_empty() {
		return Err(Error::Validation {
			message: "embedding.model must be non-empty.".to_string(),
		});
	}
	if cfg.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	let limits = &cfg.search.limits;

	if limits.max_embedding_results == 0 {
		return Err(Error::Validation {
			message: "search.limits.max_embedding_results must be greater than zero.".to_string(),
		});
	}
	if limits.max_combined_results == 0 {
		return Err(Error::Validation {
			message: "search.limits.max_combined_results must be greater than zero.".to_string(),
		});
	}
	if limits.max_final_results == 0 {
		return Err(Error::Validation {
			message: "search.limits.max_final_results must be greater than zero.".to_string(),
		});
	}
	if limits.wildcard_max_results == 0 {
		return Err(Error::Validation {
			message: "search.limits.wildcard_max_results must be greater than zero.".to_string(),
		});
	}

	let weights = &cfg.search.weights;

	for (label, weight) in [
		("search.weights.original_embedding", weights.original_embedding),
		("search.weights.summary_embedding", weights.summary_embedding),
		("search.weights.semantic", weights.semantic),
		("search.weights.text", weights.text),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if !(0.0..=1.0).contains(&weight) {
			return Err(Error::Validation {
				message: format!("{label} must be in the range 0.0-1.0."),
			});
		}
	}

	let thresholds = &cfg.search.thresholds;

	for (label, threshold) in [
		("search.thresholds.min_embedding_score", thresholds.min_embedding_score),
		("search.thresholds.min_final_score", thresholds.min_final_score),
		("search.thresholds.min_significant_score", thresholds.min_significant_score),
	] {
		if !threshold.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if threshold < 0.0 {
			return Err(Error::Validation {
				message: format!("{label} must be zero or greater."),
			});
		}
	}

	let boosts = &cfg.search.boosts;

	for (label, boost) in [
		("search.boosts.ticket_id", boosts.ticket_id),
		("search.boosts.title", boosts.title),
		("search.boosts.summary", boosts.summary),
		("search.boosts.summary_long", boosts.summary_long),
		("search.boosts.requesting_entity", boosts.requesting_entity),
		("search.boosts.queue", boosts.queue),
		("search.boosts.status", boosts.status),
		("search.boosts.keyword", boosts.keyword),
	] {
		if !boost.is_finite() {
			return Err(Error::Validation {
				message: format!("{label} must be a finite number."),
			});
		}
		if boost <= 0.0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.elasticsearch.url.ends_with('/') {
		cfg.elasticsearch.url.pop();
	}
	while cfg.embedding.url.ends_with('/') {
		cfg.embedding.url.pop();
	}
}
