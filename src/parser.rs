//! Parsing and validation of raw model responses.
//!
//! Models are asked for bare JSON but frequently wrap it in markdown code
//! fences anyway. The fence is stripped, then the remainder must parse into
//! the full typed record; missing fields or an unknown `level` token are a
//! `Error::Parse`, which sends the caller to the deterministic fallback.
//! No partially-valid record gets past this boundary.

use crate::error::Error;
use crate::models::{PaperMetadata, SummaryAssessment};

/// Remove an enclosing markdown code fence (with optional language tag)
/// and trim surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") {
        trimmed
            .lines()
            .skip(1)
            .take_while(|l| !l.trim_start().starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a raw completion into paper metadata.
pub fn parse_metadata(raw: &str) -> Result<PaperMetadata, Error> {
    let clean = strip_code_fences(raw);
    let meta: PaperMetadata =
        serde_json::from_str(&clean).map_err(|e| Error::Parse(e.to_string()))?;

    if meta.title.trim().is_empty() {
        return Err(Error::Parse("empty title".to_string()));
    }
    if meta.key_points.is_empty() {
        return Err(Error::Parse("keyPoints is empty".to_string()));
    }

    Ok(meta)
}

/// Parse a raw completion into a summary assessment. Scores are clamped
/// into [1,10] so the bounds invariant holds regardless of model behavior.
pub fn parse_assessment(raw: &str) -> Result<SummaryAssessment, Error> {
    let clean = strip_code_fences(raw);
    let mut assessment: SummaryAssessment =
        serde_json::from_str(&clean).map_err(|e| Error::Parse(e.to_string()))?;

    assessment.concept_score = assessment.concept_score.clamp(1, 10);
    assessment.writing_score = assessment.writing_score.clamp(1, 10);

    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;

    const METADATA_JSON: &str = r#"{
        "title": "TG-51 Protocol",
        "topic": "Dosimetry",
        "level": "Intermediate",
        "summary": "Reference dosimetry for clinical beams.",
        "keyPoints": ["Absorbed dose to water", "Ion chamber calibration"],
        "citation": "Almond PR et al. Med Phys. 1999."
    }"#;

    #[test]
    fn test_strip_code_fences_plain_text() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_with_language_tag() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_code_fences_bare_fence() {
        let raw = "```\nline one\nline two\n```\n";
        assert_eq!(strip_code_fences(raw), "line one\nline two");
    }

    #[test]
    fn test_parse_metadata_valid() {
        let meta = parse_metadata(METADATA_JSON).unwrap();
        assert_eq!(meta.title, "TG-51 Protocol");
        assert_eq!(meta.level, Level::Intermediate);
        assert_eq!(meta.key_points.len(), 2);
    }

    #[test]
    fn test_parse_metadata_fenced_is_unchanged() {
        let fenced = format!("```json\n{}\n```", METADATA_JSON);
        assert_eq!(parse_metadata(&fenced).unwrap(), parse_metadata(METADATA_JSON).unwrap());
    }

    #[test]
    fn test_parse_metadata_missing_field() {
        let raw = r#"{"title": "T", "topic": "Imaging"}"#;
        assert!(matches!(parse_metadata(raw), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_metadata_bad_level_token() {
        let raw = METADATA_JSON.replace("Intermediate", "Expert");
        assert!(matches!(parse_metadata(&raw), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_metadata_empty_key_points() {
        let raw = METADATA_JSON.replace(
            r#"["Absorbed dose to water", "Ion chamber calibration"]"#,
            "[]",
        );
        assert!(matches!(parse_metadata(&raw), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_metadata_not_json() {
        assert!(matches!(
            parse_metadata("Sorry, I cannot help with that."),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_assessment_clamps_scores() {
        let raw = r#"{
            "conceptScore": 14,
            "writingScore": 0,
            "understood": ["a"],
            "missedConcepts": ["b"],
            "writingFeedback": ["c"],
            "insight": "i",
            "encouragement": "e"
        }"#;
        let a = parse_assessment(raw).unwrap();
        assert_eq!(a.concept_score, 10);
        assert_eq!(a.writing_score, 1);
    }
}
