use rtsearch_domain::Ticket;
use rtsearch_index::{query, query::SearchBody};

use crate::{SearchService, ServiceError, ServiceResult, search::decode_ticket};

impl SearchService {
	/// Exact-identifier lookup returning the raw ticket record.
	pub async fn get_ticket(&self, ticket_id: i64) -> ServiceResult<Option<Ticket>> {
		self.exact_lookup(ticket_id).await
	}

	pub(crate) async fn exact_lookup(&self, ticket_id: i64) -> ServiceResult<Option<Ticket>> {
		let body = SearchBody::new(query::term("ticket_id", ticket_id)).build();
		let hits = self
			.backend
			.search(&self.cfg.elasticsearch.indexes.summary, &body)
			.await
			.map_err(|err| ServiceError::Backend { message: err.to_string() })?;
		let Some(hit) = hits.into_iter().next() else {
			return Ok(None);
		};

		Ok(Some(decode_ticket(hit.source)?))
	}
}
