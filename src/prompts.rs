//! Prompt construction for the completion backends.
//!
//! Both prompts embed a hard cap on included source text (cost/latency
//! bound) and spell out the exact JSON shape the model must return, so the
//! parser can validate field-by-field.

use crate::models::Paper;
use crate::utils::safe_truncate;

/// Max source text embedded in an extraction prompt
pub const EXTRACTION_CONTEXT_LIMIT: usize = 4000;
/// Max paper excerpt embedded in an evaluation prompt
pub const EVALUATION_CONTEXT_LIMIT: usize = 3000;

/// Build the metadata-extraction prompt for raw paper text.
pub fn extraction_prompt(text: &str) -> String {
    format!(
        r#"You are a medical physics expert. Extract structured metadata from this paper text or abstract.

Paper text:
"""
{}
"""

Return ONLY valid JSON with these exact keys:
{{
  "title": "full paper title",
  "topic": "short topic area (e.g. Dosimetry, Imaging, Radiation Biology)",
  "level": "Beginner or Intermediate or Advanced",
  "summary": "2-3 sentence plain English summary of what this paper is about and why it matters",
  "keyPoints": ["4-5 key concepts covered in this paper"],
  "citation": "Author et al. Journal. Year."
}}"#,
        safe_truncate(text, EXTRACTION_CONTEXT_LIMIT)
    )
}

/// Build the summary-evaluation prompt for a paper and a user-written summary.
///
/// Context is the stored full-text excerpt when the paper has one, otherwise
/// its summary plus key concepts.
pub fn evaluation_prompt(paper: &Paper, user_summary: &str) -> String {
    let paper_context = match &paper.full_text {
        Some(full_text) => format!(
            "Full paper excerpt:\n{}",
            safe_truncate(full_text, EVALUATION_CONTEXT_LIMIT)
        ),
        None => format!(
            "Paper summary: {}\nKey concepts: {}",
            paper.summary,
            paper.key_points.join(", ")
        ),
    };

    format!(
        r#"You are a medical physics PhD professor evaluating a student's comprehension and writing quality.

{paper_context}

Paper title: "{title}"

Student's written summary:
"""
{user_summary}
"""

Evaluate this summary on two dimensions:

1. CONCEPTUAL COVERAGE: Did they capture the key ideas from the paper?
2. WRITING QUALITY: Is their explanation clear, well-structured, and do they use correct scientific terminology?

Return ONLY valid JSON:
{{
  "conceptScore": <number 1-10>,
  "writingScore": <number 1-10>,
  "understood": ["2-3 specific things they explained well"],
  "missedConcepts": ["2-3 important concepts from the paper they didn't mention or got wrong"],
  "writingFeedback": ["2-3 specific writing improvement tips: terminology, structure, clarity"],
  "insight": "One deep insight or connection to broaden their understanding of this topic",
  "encouragement": "One short encouraging sentence personalized to what they did well"
}}"#,
        paper_context = paper_context,
        title = paper.title,
        user_summary = user_summary,
    )
}
