use rtsearch_domain::{DateRange, KeyPoint, Keyword, QueryKind, SearchFilters, Ticket, classify};

#[test]
fn keyword_deserializes_both_shapes() {
	let keywords: Vec<Keyword> =
		serde_json::from_str(r#"["printer", {"word": "jam"}]"#).expect("Failed to parse keywords.");

	assert_eq!(keywords.len(), 2);
	assert_eq!(keywords[0].as_str(), "printer");
	assert_eq!(keywords[1].as_str(), "jam");
}

#[test]
fn key_point_deserializes_both_shapes() {
	let points: Vec<KeyPoint> =
		serde_json::from_str(r#"[{"point": "tray two"}, "fuser"]"#)
			.expect("Failed to parse key points.");

	assert_eq!(points[0].as_str(), "tray two");
	assert_eq!(points[1].as_str(), "fuser");
}

#[test]
fn ticket_tolerates_missing_optional_fields() {
	let ticket: Ticket = serde_json::from_str(r#"{"ticket_id": 42, "title": "Printer jam"}"#)
		.expect("Failed to parse minimal ticket.");

	assert_eq!(ticket.ticket_id, 42);
	assert_eq!(ticket.title, "Printer jam");
	assert!(ticket.embedding.is_none());
}

#[test]
fn ticket_serializes_without_absent_fields() {
	let ticket: Ticket = serde_json::from_str(r#"{"ticket_id": 7, "title": "VPN drop"}"#)
		.expect("Failed to parse minimal ticket.");
	let rendered = serde_json::to_value(&ticket).expect("Failed to render ticket.");
	let object = rendered.as_object().expect("Ticket must render as an object.");

	assert!(!object.contains_key("embedding"));
	assert!(!object.contains_key("summary"));
}

#[test]
fn date_range_treats_blank_bounds_as_absent() {
	let range = DateRange { from: Some("  ".to_string()), to: Some("2024-01-31".to_string()) };

	assert_eq!(range.from_bound(), None);
	assert_eq!(range.to_bound(), Some("2024-01-31"));
	assert!(!range.is_empty());

	let blank = DateRange { from: Some(String::new()), to: None };

	assert!(blank.is_empty());
}

#[test]
fn filters_deserialize_with_partial_facets() {
	let filters: SearchFilters =
		serde_json::from_str(r#"{"status": ["open"], "created": {"from": "2024-01-01"}}"#)
			.expect("Failed to parse filters.");

	assert!(filters.queue.is_empty());
	assert_eq!(filters.status, vec!["open".to_string()]);
	assert_eq!(filters.created.as_ref().and_then(|range| range.from_bound()), Some("2024-01-01"));
	assert!(filters.updated.is_none());
}

#[test]
fn identifier_classification_matches_lookup_contract() {
	assert_eq!(classify("#1024"), QueryKind::Identifier(1_024));
	assert_eq!(classify("printer #1024"), QueryKind::FreeText);
	assert_eq!(rtsearch_domain::embedded_ticket_id("printer #1024"), Some(1_024));
}
