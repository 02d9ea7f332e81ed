//! Orchestration of the extraction and feedback pipelines.
//!
//! Both operations share one shape: validate input, build the prompt, ask
//! the completion backends, parse the response. A `Backend` or `Parse`
//! failure anywhere in that chain is answered by recomputing the result
//! with the deterministic analyzer over the *original* inputs (never over
//! partial model output), so once validation passes these operations always
//! return a structured record.

use crate::ai_client::AiClient;
use crate::error::Error;
use crate::fallback;
use crate::models::{Paper, PaperMetadata, SummaryAssessment};
use crate::parser;
use crate::prompts;

/// Minimum trimmed input length for extraction. Shorter text cannot
/// support meaningful metadata and is rejected before any network call.
pub const MIN_EXTRACTION_TEXT_LEN: usize = 100;

/// Extract structured metadata from raw paper text.
pub async fn extract_metadata(client: &AiClient, text: &str) -> Result<PaperMetadata, Error> {
    if text.trim().len() < MIN_EXTRACTION_TEXT_LEN {
        return Err(Error::Validation(format!(
            "Paper text too short: need at least {} characters",
            MIN_EXTRACTION_TEXT_LEN
        )));
    }

    let prompt = prompts::extraction_prompt(text);

    match complete_and(client, &prompt, parser::parse_metadata).await {
        Ok(meta) => Ok(meta),
        Err(e) if e.is_recoverable() => {
            eprintln!("[Analysis] extraction via AI failed ({}), using local analyzer", e);
            Ok(fallback::analyze_metadata(text))
        }
        Err(e) => Err(e),
    }
}

/// Assess a user-written summary against a paper.
pub async fn evaluate_summary(
    client: &AiClient,
    paper: &Paper,
    user_summary: &str,
) -> Result<SummaryAssessment, Error> {
    if user_summary.trim().is_empty() {
        return Err(Error::Validation("Summary is empty".to_string()));
    }

    let prompt = prompts::evaluation_prompt(paper, user_summary);

    match complete_and(client, &prompt, parser::parse_assessment).await {
        Ok(assessment) => Ok(assessment),
        Err(e) if e.is_recoverable() => {
            eprintln!("[Analysis] evaluation via AI failed ({}), using local analyzer", e);
            Ok(fallback::assess_summary(&paper.key_points, user_summary))
        }
        Err(e) => Err(e),
    }
}

async fn complete_and<T>(
    client: &AiClient,
    prompt: &str,
    parse: fn(&str) -> Result<T, Error>,
) -> Result<T, Error> {
    let raw = client.complete(prompt, None).await?;
    parse(&raw)
}
