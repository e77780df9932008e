mod filters;
mod query;
mod ticket;

pub use filters::{DateRange, SearchFilters};
pub use query::{QueryKind, classify, embedded_ticket_id};
pub use ticket::{KeyPoint, Keyword, Ticket};
