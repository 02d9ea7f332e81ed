use serde::{Deserialize, Serialize};

use crate::utils::safe_truncate;

/// Difficulty rating for a paper
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(Level::Beginner),
            "Intermediate" => Some(Level::Intermediate),
            "Advanced" => Some(Level::Advanced),
            _ => None,
        }
    }
}

/// Structured metadata extracted from paper text.
///
/// All six fields are required; a model response missing any of them is
/// rejected at the parser boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaperMetadata {
    pub title: String,
    pub topic: String,
    pub level: Level,
    pub summary: String,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
    pub citation: String,
}

/// Maximum excerpt of source text stored on a paper.
/// Prompts re-truncate to their own limits at build time.
pub const FULL_TEXT_EXCERPT_LIMIT: usize = 6000;

/// A paper in the reading list.
///
/// Curated papers ship with the catalog and are immutable; custom papers are
/// created from the extraction pipeline plus user edits and live in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub level: Level,
    pub summary: String,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
    pub citation: String,
    pub curated: bool,
    pub week: u32,
    #[serde(rename = "readTime")]
    pub read_time: String,
    #[serde(rename = "pubmedUrl")]
    pub pubmed_url: Option<String>,
    #[serde(rename = "fullText")]
    pub full_text: Option<String>,
}

impl Paper {
    /// Build a custom paper from extracted metadata and the source text it
    /// came from. The excerpt is bounded so the store stays small.
    pub fn from_metadata(
        meta: PaperMetadata,
        week: u32,
        read_time: String,
        pubmed_url: Option<String>,
        source_text: Option<&str>,
    ) -> Self {
        Paper {
            id: uuid::Uuid::new_v4().to_string(),
            title: meta.title,
            topic: meta.topic,
            level: meta.level,
            summary: meta.summary,
            key_points: meta.key_points,
            citation: meta.citation,
            curated: false,
            week: week.max(1),
            read_time,
            pubmed_url,
            full_text: source_text.map(|t| safe_truncate(t, FULL_TEXT_EXCERPT_LIMIT).to_string()),
        }
    }
}

/// Assessment of a user-written summary against a paper's key concepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryAssessment {
    #[serde(rename = "conceptScore")]
    pub concept_score: i64,
    #[serde(rename = "writingScore")]
    pub writing_score: i64,
    pub understood: Vec<String>,
    #[serde(rename = "missedConcepts")]
    pub missed_concepts: Vec<String>,
    #[serde(rename = "writingFeedback")]
    pub writing_feedback: Vec<String>,
    pub insight: String,
    pub encouragement: String,
}
