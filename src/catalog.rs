//! Curated reading list
//!
//! The built-in papers that ship with the app: one six-week arc from
//! radiation fundamentals to current research. Curated papers are
//! immutable; user-added papers live in the store.

use crate::models::{Level, Paper};

struct CuratedEntry {
    id: &'static str,
    level: Level,
    week: u32,
    topic: &'static str,
    title: &'static str,
    summary: &'static str,
    key_points: &'static [&'static str],
    pubmed_url: &'static str,
    read_time: &'static str,
    citation: &'static str,
}

const CURATED: &[CuratedEntry] = &[
    CuratedEntry {
        id: "c1",
        level: Level::Beginner,
        week: 1,
        topic: "Radiation Fundamentals",
        title: "Basic Radiation Physics: Types, Interactions & Clinical Relevance",
        summary: "A foundational overview of ionizing radiation types (alpha, beta, gamma, X-ray) and how they interact with matter — the bedrock of all medical physics.",
        key_points: &[
            "Types of ionizing radiation and their properties",
            "Four main interaction mechanisms with matter (photoelectric, Compton, pair production, Rayleigh)",
            "Linear energy transfer (LET) and its clinical significance",
            "How dose deposition relates to radiation type",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/16175659/",
        read_time: "35 min",
        citation: "Khan FM. The Physics of Radiation Therapy. 5th ed. Lippincott Williams & Wilkins; 2014.",
    },
    CuratedEntry {
        id: "c2",
        level: Level::Beginner,
        week: 1,
        topic: "Dosimetry Basics",
        title: "AAPM TG-51: Clinical Reference Dosimetry Protocol",
        summary: "The landmark AAPM Task Group 51 report establishing the standard protocol for absorbed dose calibration of photon and electron beams in clinical radiotherapy settings.",
        key_points: &[
            "Absorbed dose to water as the fundamental quantity",
            "Ion chamber calibration methodology and traceability",
            "Beam quality correction factors (kQ)",
            "Step-by-step clinical implementation",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/10501062/",
        read_time: "40 min",
        citation: "Almond PR et al. AAPM TG-51 protocol. Med Phys. 1999;26(9):1847-1870.",
    },
    CuratedEntry {
        id: "c3",
        level: Level::Beginner,
        week: 2,
        topic: "Imaging Physics",
        title: "X-ray Production and Image Formation in Diagnostic Radiology",
        summary: "Covers the physics of X-ray generation, attenuation, and image formation including contrast, noise, and spatial resolution fundamentals.",
        key_points: &[
            "Bremsstrahlung and characteristic X-ray production",
            "Attenuation coefficients and Beer-Lambert law",
            "Image quality: contrast, noise, spatial resolution",
            "Detective quantum efficiency (DQE)",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/12776483/",
        read_time: "30 min",
        citation: "Bushberg JT et al. The Essential Physics of Medical Imaging. 3rd ed. 2011.",
    },
    CuratedEntry {
        id: "c4",
        level: Level::Intermediate,
        week: 3,
        topic: "Radiation Therapy QA",
        title: "AAPM TG-142: Quality Assurance of Medical Linear Accelerators",
        summary: "Comprehensive QA recommendations for linear accelerators covering mechanical, dosimetric, and safety checks across daily, monthly, and annual testing frequencies.",
        key_points: &[
            "Mechanical isocenter and gantry checks",
            "Dosimetric output constancy tolerances",
            "Multileaf collimator (MLC) QA methods",
            "Image guidance system verification procedures",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/19928910/",
        read_time: "45 min",
        citation: "Klein EE et al. AAPM TG-142. Med Phys. 2009;36(9):4197-4212.",
    },
    CuratedEntry {
        id: "c5",
        level: Level::Intermediate,
        week: 3,
        topic: "Radiation Biology",
        title: "The Linear-Quadratic Model in Radiobiology and Clinical Fractionation",
        summary: "The LQ model underpins modern fractionated radiotherapy. This paper reviews its biological basis, clinical applications, and limitations in practice.",
        key_points: &[
            "Alpha/beta ratio and tissue response classification",
            "DNA double-strand break repair mechanisms",
            "BED (Biologically Effective Dose) calculations",
            "Hypofractionation and SBRT biological rationale",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/11180942/",
        read_time: "35 min",
        citation: "Fowler JF. The linear-quadratic formula and progress in fractionated radiotherapy. Br J Radiol. 1989.",
    },
    CuratedEntry {
        id: "c6",
        level: Level::Intermediate,
        week: 4,
        topic: "CT Physics",
        title: "Computed Tomography: Principles, Design, Artifacts, and Recent Advances",
        summary: "A thorough review of CT scanner design, reconstruction algorithms, image artifacts, and dose optimization strategies in modern computed tomography.",
        key_points: &[
            "Filtered back projection vs iterative reconstruction",
            "CT dose descriptors: CTDI and DLP",
            "Common artifacts and their physical origins",
            "Spectral CT and dual-energy applications",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/15671254/",
        read_time: "40 min",
        citation: "Goldman LW. Principles of CT. J Nucl Med Technol. 2007;35(3):115-128.",
    },
    CuratedEntry {
        id: "c7",
        level: Level::Advanced,
        week: 5,
        topic: "Treatment Planning",
        title: "IMRT: Intensity-Modulated Radiation Therapy — Current Status and Issues",
        summary: "AAPM review of IMRT physics, inverse optimization algorithms, plan verification methodologies, and clinical implementation challenges.",
        key_points: &[
            "Inverse planning and multi-objective optimization",
            "Fluence modulation via MLC sequencing",
            "IMRT-specific QA: patient-specific verification",
            "Dose-volume histogram (DVH) analysis principles",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/12875969/",
        read_time: "45 min",
        citation: "IMRT Collaborative Working Group. IJROBP. 2001.",
    },
    CuratedEntry {
        id: "c8",
        level: Level::Advanced,
        week: 6,
        topic: "Emerging Technology",
        title: "Artificial Intelligence in Radiation Oncology Physics",
        summary: "State-of-the-art review of machine learning applications in auto-segmentation, treatment planning, QA automation, and outcome prediction in radiation oncology.",
        key_points: &[
            "Deep learning for OAR auto-segmentation accuracy",
            "Knowledge-based and deep learning treatment planning",
            "Machine learning for LINAC QA fault prediction",
            "Clinical validation pipelines and regulatory pathway",
        ],
        pubmed_url: "https://pubmed.ncbi.nlm.nih.gov/31170709/",
        read_time: "40 min",
        citation: "Haury S et al. AI in radiation oncology physics. Phys Med. 2019.",
    },
];

/// The curated papers, in display (week) order.
pub fn curated_papers() -> Vec<Paper> {
    CURATED
        .iter()
        .map(|e| Paper {
            id: e.id.to_string(),
            title: e.title.to_string(),
            topic: e.topic.to_string(),
            level: e.level,
            summary: e.summary.to_string(),
            key_points: e.key_points.iter().map(|s| s.to_string()).collect(),
            citation: e.citation.to_string(),
            curated: true,
            week: e.week,
            read_time: e.read_time.to_string(),
            pubmed_url: Some(e.pubmed_url.to_string()),
            full_text: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_invariants() {
        let papers = curated_papers();
        assert_eq!(papers.len(), 8);

        let ids: HashSet<&str> = papers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), papers.len());

        for paper in &papers {
            assert!(paper.curated);
            assert!(paper.week >= 1);
            assert!(!paper.title.is_empty());
            assert!(!paper.key_points.is_empty());
            assert!(paper.pubmed_url.is_some());
        }
    }

    #[test]
    fn test_catalog_is_week_ordered() {
        let papers = curated_papers();
        let weeks: Vec<u32> = papers.iter().map(|p| p.week).collect();
        let mut sorted = weeks.clone();
        sorted.sort_unstable();
        assert_eq!(weeks, sorted);
    }
}
