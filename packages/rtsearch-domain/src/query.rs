use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^#?(\d+)$").ok());
static EMBEDDED_IDENTIFIER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"#?(\d+)").ok());

fn capture_id(pattern: &Option<Regex>, term: &str) -> Option<i64> {
	pattern
		.as_ref()
		.and_then(|re| re.captures(term))
		.and_then(|captures| captures.get(1))
		.and_then(|digits| digits.as_str().parse().ok())
}

/// The retrieval path a raw search term selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
	/// Trimmed term is exactly `*`: filtered match-all.
	Wildcard,
	/// Trimmed term is entirely numeric (optional leading `#`): exact lookup
	/// first, free text on a miss.
	Identifier(i64),
	FreeText,
}

pub fn classify(term: &str) -> QueryKind {
	let trimmed = term.trim();

	if trimmed == "*" {
		return QueryKind::Wildcard;
	}
	if let Some(id) = capture_id(&IDENTIFIER, trimmed) {
		return QueryKind::Identifier(id);
	}

	QueryKind::FreeText
}

/// Soft identifier hint: the first numeric substring anywhere in the term,
/// used for exact-id boosting independently of [`classify`].
pub fn embedded_ticket_id(term: &str) -> Option<i64> {
	capture_id(&EMBEDDED_IDENTIFIER, term.trim())
}
