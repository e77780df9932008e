use std::sync::Arc;

use rtsearch_index::IndexClient;
use rtsearch_service::SearchService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	pub fn new(config: rtsearch_config::Config) -> color_eyre::Result<Self> {
		let index = IndexClient::new(&config.elasticsearch)?;
		let service = SearchService::new(config, index);

		Ok(Self { service: Arc::new(service) })
	}
}
