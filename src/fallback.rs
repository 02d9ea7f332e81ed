// =============================================================================
// Deterministic Fallback Analyzers
// =============================================================================
//
// When no completion backend is reachable (or its output does not parse),
// these analyzers compute the same structured records directly from the
// input text using lexical pattern matching:
// - analyze_metadata: paper metadata from raw text
// - assess_summary:   comprehension/writing assessment from key concepts
//
// Pure functions of their inputs. No network, no randomness: identical
// input always yields identical output.

use regex::Regex;
use std::collections::HashSet;

use crate::models::{Level, PaperMetadata, SummaryAssessment};
use crate::utils::{safe_truncate, word_count};

const TITLE_LIMIT: usize = 60;
const SUMMARY_LIMIT: usize = 150;
const MAX_KEY_POINTS: usize = 5;
const MAX_LISTED_CONCEPTS: usize = 3;

const PLACEHOLDER_TITLE: &str = "Untitled Paper";
const PLACEHOLDER_CITATION: &str = "Author et al. Journal. Year.";

/// Vocabulary whose density signals mathematical/computational complexity
const COMPLEXITY_TERMS: &str =
    r"(?i)\b(simulation|monte carlo|optimization|algorithm|statistical|differential|integral|coefficient)\b";

/// Ordered topic table: first topic whose keyword list hits wins
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("Dosimetry", &["dose", "radiation", "absorbed", "exposure"]),
    ("Imaging", &["image", "mri", "ct", "scan", "reconstruction"]),
    ("Radiation Biology", &["cell", "dna", "mutation", "rbe", "biological"]),
    ("Treatment Planning", &["plan", "beam", "targeting", "optimization"]),
];

const DEFAULT_TOPIC: &str = "Medical Physics";

/// Derive paper metadata directly from raw text.
pub fn analyze_metadata(text: &str) -> PaperMetadata {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let title = lines
        .first()
        .map(|l| safe_truncate(l, TITLE_LIMIT).to_string())
        .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());

    let level = classify_level(text);
    let topic = classify_topic(text);

    let mut key_points = extract_key_points(text);
    if key_points.is_empty() {
        // keyPoints must never be empty; text with no Title-Case runs
        // still gets one topic-level entry
        key_points.push(format!("Core concepts in {}", topic.to_lowercase()));
    }

    // Second and third non-blank lines usually read like an abstract opener
    let summary = match lines.get(1..lines.len().min(3)) {
        Some(body) if !body.is_empty() => {
            safe_truncate(&body.join(" "), SUMMARY_LIMIT).to_string()
        }
        _ => format!(
            "This paper discusses {} in medical physics.",
            topic.to_lowercase()
        ),
    };

    PaperMetadata {
        title,
        topic,
        level,
        summary,
        key_points,
        citation: PLACEHOLDER_CITATION.to_string(),
    }
}

/// Classify difficulty by counting complexity-vocabulary occurrences
fn classify_level(text: &str) -> Level {
    let pattern = Regex::new(COMPLEXITY_TERMS).unwrap();
    let count = pattern.find_iter(text).count();

    if count > 5 {
        Level::Advanced
    } else if count > 2 {
        Level::Intermediate
    } else {
        Level::Beginner
    }
}

/// Match the lower-cased text against the ordered topic table
fn classify_topic(text: &str) -> String {
    let lower = text.to_lowercase();

    for (topic, keywords) in TOPIC_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return topic.to_string();
        }
    }

    DEFAULT_TOPIC.to_string()
}

/// Scan for capitalized word runs (one or more consecutive Title-Case
/// tokens), deduplicated preserving first occurrence.
fn extract_key_points(text: &str) -> Vec<String> {
    let pattern = Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap();

    let mut seen = HashSet::new();
    let mut points = Vec::new();

    for m in pattern.find_iter(text) {
        let phrase = m.as_str();
        if seen.insert(phrase.to_string()) {
            points.push(phrase.to_string());
            if points.len() == MAX_KEY_POINTS {
                break;
            }
        }
    }

    points
}

/// Derive a summary assessment from the paper's key concepts and the
/// user-written summary.
pub fn assess_summary(key_points: &[String], user_summary: &str) -> SummaryAssessment {
    let summary_words: HashSet<String> = user_summary
        .to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect();

    // A concept counts as covered when any of its words appears in the
    // summary's word set
    let (covered, missed): (Vec<&String>, Vec<&String>) = key_points.iter().partition(|concept| {
        concept
            .to_lowercase()
            .split_whitespace()
            .any(|word| summary_words.contains(word))
    });

    let total = key_points.len().max(1);
    let concept_score =
        (3 + (7.0 * covered.len() as f64 / total as f64).round() as i64).clamp(1, 10);

    let words = word_count(user_summary);
    let writing_score = (4 + (6.0 * words as f64 / 100.0).round() as i64).clamp(1, 10);

    SummaryAssessment {
        concept_score,
        writing_score,
        understood: covered
            .into_iter()
            .take(MAX_LISTED_CONCEPTS)
            .cloned()
            .collect(),
        missed_concepts: missed
            .into_iter()
            .take(MAX_LISTED_CONCEPTS)
            .cloned()
            .collect(),
        writing_feedback: vec![
            "Use more specific medical physics terminology".to_string(),
            "Structure your summary with clear topic sentences".to_string(),
            "Include quantitative details where relevant".to_string(),
        ],
        insight: "Consider connecting this concept to its applications in clinical practice."
            .to_string(),
        encouragement: "Great effort - you've captured the main ideas clearly!".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_advanced_at_six_terms() {
        let text = "Overview\nsimulation simulation simulation simulation simulation simulation";
        assert_eq!(analyze_metadata(text).level, Level::Advanced);
    }

    #[test]
    fn test_level_intermediate_at_three_terms() {
        let text = "Overview\nThe algorithm uses a statistical coefficient.";
        assert_eq!(analyze_metadata(text).level, Level::Intermediate);
    }

    #[test]
    fn test_level_beginner_below_three_terms() {
        assert_eq!(analyze_metadata("Overview\nNo hard words here.").level, Level::Beginner);
        assert_eq!(
            analyze_metadata("Overview\nOne simulation and one algorithm.").level,
            Level::Beginner
        );
    }

    #[test]
    fn test_level_counts_multiword_terms_case_insensitively() {
        let text = "A Monte Carlo study\nmonte carlo MONTE CARLO Monte Carlo monte carlo monte carlo";
        assert_eq!(analyze_metadata(text).level, Level::Advanced);
    }

    #[test]
    fn test_topic_dosimetry_first_in_table_order() {
        let meta = analyze_metadata("Study\nWe measured absorbed dose in a water phantom.");
        assert_eq!(meta.topic, "Dosimetry");
    }

    #[test]
    fn test_topic_imaging() {
        let meta = analyze_metadata("Study\nMRI reconstruction methods were surveyed.");
        assert_eq!(meta.topic, "Imaging");
    }

    #[test]
    fn test_topic_default_when_no_keywords() {
        let meta = analyze_metadata("A Note\nNothing here matches the keyword lists.");
        assert_eq!(meta.topic, "Medical Physics");
    }

    #[test]
    fn test_title_from_first_line_truncated() {
        let long_title = "T".to_string() + &"x".repeat(100);
        let meta = analyze_metadata(&format!("{}\nBody.", long_title));
        assert_eq!(meta.title.len(), 60);

        let meta = analyze_metadata("\n\n  \n");
        assert_eq!(meta.title, "Untitled Paper");
    }

    #[test]
    fn test_summary_joins_second_and_third_lines() {
        let meta = analyze_metadata("Title\nFirst body line.\nSecond body line.\nIgnored.");
        assert_eq!(meta.summary, "First body line. Second body line.");
    }

    #[test]
    fn test_summary_synthesized_when_no_body() {
        let meta = analyze_metadata("Absorbed dose title only");
        assert_eq!(meta.summary, "This paper discusses dosimetry in medical physics.");
    }

    #[test]
    fn test_key_points_deduplicated_and_capped() {
        let text = "Paper\nMonte Carlo methods and Monte Carlo codes. Dose Kernel models. \
                    Ion Chamber readings, Beam Quality factors, Water Phantom setups, Linear Accelerator specs.";
        let meta = analyze_metadata(text);
        assert_eq!(meta.key_points.len(), 5);
        assert_eq!(
            meta.key_points.iter().filter(|p| p.as_str() == "Monte Carlo").count(),
            1
        );
    }

    #[test]
    fn test_key_points_never_empty() {
        let meta = analyze_metadata("an all-lowercase note about absorbed dose measurements");
        assert_eq!(meta.key_points, vec!["Core concepts in dosimetry"]);
    }

    #[test]
    fn test_metadata_citation_placeholder() {
        let meta = analyze_metadata("Title\nBody line.");
        assert_eq!(meta.citation, "Author et al. Journal. Year.");
    }

    #[test]
    fn test_metadata_deterministic() {
        let text = "Dose Calculation Review\nA survey of dose algorithms.\nCovers Monte Carlo and Pencil Beam.";
        assert_eq!(analyze_metadata(text), analyze_metadata(text));
    }

    #[test]
    fn test_assess_summary_coverage() {
        let key_points = vec![
            "Bremsstrahlung production".to_string(),
            "Beer-Lambert law".to_string(),
        ];
        let assessment =
            assess_summary(&key_points, "The paper explains Bremsstrahlung in X-ray tubes.");
        assert_eq!(assessment.understood, vec!["Bremsstrahlung production"]);
        assert_eq!(assessment.missed_concepts, vec!["Beer-Lambert law"]);
    }

    #[test]
    fn test_assess_summary_score_formulas() {
        let key_points = vec!["alpha beta".to_string(), "gamma delta".to_string()];
        // one of two concepts covered: 3 + round(7 * 1/2) = 7
        let a = assess_summary(&key_points, "alpha");
        assert_eq!(a.concept_score, 7);
        // one word: 4 + round(6 * 1/100) = 4
        assert_eq!(a.writing_score, 4);

        // fifty words: 4 + round(6 * 50/100) = 7
        let fifty = vec!["word"; 50].join(" ");
        assert_eq!(assess_summary(&key_points, &fifty).writing_score, 7);
    }

    #[test]
    fn test_assess_summary_score_bounds() {
        let empty: Vec<String> = vec![];
        let a = assess_summary(&empty, "");
        assert!((1..=10).contains(&a.concept_score));
        assert!((1..=10).contains(&a.writing_score));

        // huge summary covering everything still clamps to 10
        let key_points = vec!["dose".to_string()];
        let long = vec!["dose"; 500].join(" ");
        let a = assess_summary(&key_points, &long);
        assert_eq!(a.concept_score, 10);
        assert_eq!(a.writing_score, 10);
    }

    #[test]
    fn test_assess_summary_caps_listed_concepts() {
        let key_points: Vec<String> = (0..6).map(|i| format!("concept{}", i)).collect();
        let a = assess_summary(&key_points, "nothing matches");
        assert!(a.understood.is_empty());
        assert_eq!(a.missed_concepts.len(), 3);
    }

    #[test]
    fn test_assess_summary_deterministic() {
        let key_points = vec!["Linear Energy Transfer".to_string(), "Compton scattering".to_string()];
        let summary = "Compton scattering dominates at therapeutic energies.";
        assert_eq!(
            assess_summary(&key_points, summary),
            assess_summary(&key_points, summary)
        );
    }
}
