use serde::{Deserialize, Serialize};

/// A support ticket record as stored upstream. Read-only from the pipeline's
/// perspective; the embedding vector is opaque except for similarity scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
	pub ticket_id: i64,
	pub title: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub summary: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub summary_long: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub contextual_details: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub contextual_technical_details: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ticket_as_question: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data_patterns_or_trends: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub customer_sentiment: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub customer_sentiment_score: Option<f32>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub requesting_entity: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub queue: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model_used: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub keywords: Option<Vec<Keyword>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key_points_discussed: Option<Vec<KeyPoint>>,
	/// Large and internal-only; stripped from search responses.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub embedding: Option<Vec<f32>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_updated: Option<String>,
}

/// Upstream stores keywords either as bare strings or as `{ "word": … }`
/// records, depending on the ingestion batch that produced the ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keyword {
	Plain(String),
	Labeled { word: String },
}
impl Keyword {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Plain(word) => word,
			Self::Labeled { word } => word,
		}
	}
}

/// Same dual shape as [`Keyword`], wrapping `{ "point": … }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPoint {
	Plain(String),
	Labeled { point: String },
}
impl KeyPoint {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Plain(point) => point,
			Self::Labeled { point } => point,
		}
	}
}
