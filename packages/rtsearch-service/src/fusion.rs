//! Merges the two per-index similarity score streams into one ranked
//! candidate list.

use std::collections::HashMap;

use rtsearch_config::SearchWeights;

/// Midpoint of the shifted cosine similarity range [0, 2]; stands in for a
/// missing (or non-positive) per-index score. Deliberately 1.0 rather than 0
/// so single-index matches are not buried. Tunable only together with the
/// fusion weights.
const NEUTRAL_SCORE: f32 = 1.0;

/// Per-index similarity score for one ticket.
#[derive(Debug, Clone, Copy)]
pub struct CandidateScore {
	pub ticket_id: i64,
	pub score: f32,
}

#[derive(Debug, Clone, Copy, Default)]
struct ScoredCandidate {
	original_score: f32,
	summary_score: f32,
}

/// Groups both score streams by ticket, applies the weighted combination, and
/// returns at most `max_candidates` ticket ids ordered by descending combined
/// score (ties break by ascending id for determinism).
pub fn fuse(
	original: Vec<CandidateScore>,
	summary: Vec<CandidateScore>,
	weights: &SearchWeights,
	max_candidates: usize,
) -> Vec<i64> {
	let mut grouped: HashMap<i64, ScoredCandidate> = HashMap::new();

	for candidate in original {
		grouped.entry(candidate.ticket_id).or_default().original_score = candidate.score;
	}
	for candidate in summary {
		grouped.entry(candidate.ticket_id).or_default().summary_score = candidate.score;
	}

	let mut combined: Vec<(i64, f32)> = grouped
		.into_iter()
		.map(|(ticket_id, scores)| {
			let original = positive_or_neutral(scores.original_score);
			let summary = positive_or_neutral(scores.summary_score);
			let score =
				original * weights.original_embedding + summary * weights.summary_embedding;

			(ticket_id, score)
		})
		.collect();

	combined.sort_by(|(a_id, a_score), (b_id, b_score)| {
		b_score.partial_cmp(a_score).unwrap_or(std::cmp::Ordering::Equal).then(a_id.cmp(b_id))
	});
	combined.truncate(max_candidates);

	combined.into_iter().map(|(ticket_id, _)| ticket_id).collect()
}

fn positive_or_neutral(score: f32) -> f32 {
	if score > 0.0 { score } else { NEUTRAL_SCORE }
}
