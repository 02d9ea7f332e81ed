//! Local application state
//!
//! Stores completion flags, the reading streak, user-added papers, and the
//! API key in a JSON file in the app data directory. This state belongs to
//! the presentation layer; the extraction/evaluation pipeline never reads
//! or writes it.

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::models::Paper;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub completed: HashMap<String, bool>,
    #[serde(default)]
    pub streak: u32,
    /// ISO date (YYYY-MM-DD) of the last completed reading
    #[serde(default)]
    pub last_read_date: Option<String>,
    #[serde(default)]
    pub custom_papers: Vec<Paper>,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Handle on the persisted application state.
pub struct Store {
    path: PathBuf,
    data: AppData,
}

impl Store {
    /// Default location: `<user data dir>/medreader/data.json`
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("medreader")
            .join("data.json")
    }

    /// Load state from disk (or start fresh) and settle the streak:
    /// a streak lapses when the last completed reading is older than
    /// yesterday.
    pub fn open(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => AppData::default(),
        };

        let mut store = Store {
            path: path.to_path_buf(),
            data,
        };
        store.settle_streak(Local::now().date_naive());
        store
    }

    fn save(&self) -> Result<(), String> {
        let content = serde_json::to_string_pretty(&self.data)
            .map_err(|e| format!("Failed to serialize app data: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create data directory: {}", e))?;
        }

        fs::write(&self.path, content).map_err(|e| format!("Failed to write app data: {}", e))
    }

    // ==================== Papers ====================

    /// All papers: curated catalog first, then custom additions.
    pub fn papers(&self) -> Vec<Paper> {
        let mut papers = catalog::curated_papers();
        papers.extend(self.data.custom_papers.iter().cloned());
        papers
    }

    pub fn find_paper(&self, id: &str) -> Option<Paper> {
        self.papers().into_iter().find(|p| p.id == id)
    }

    pub fn add_custom_paper(&mut self, paper: Paper) -> Result<(), String> {
        self.data.custom_papers.push(paper);
        self.save()
    }

    /// Remove a custom paper. Curated papers cannot be removed.
    pub fn remove_custom_paper(&mut self, id: &str) -> Result<(), String> {
        let before = self.data.custom_papers.len();
        self.data.custom_papers.retain(|p| p.id != id);

        if self.data.custom_papers.len() == before {
            return Err(format!("No custom paper with id '{}'", id));
        }

        self.data.completed.remove(id);
        self.save()
    }

    // ==================== Completion & streak ====================

    pub fn is_completed(&self, paper_id: &str) -> bool {
        self.data.completed.get(paper_id).copied().unwrap_or(false)
    }

    pub fn completed_count(&self) -> usize {
        self.data.completed.values().filter(|&&done| done).count()
    }

    pub fn streak(&self) -> u32 {
        self.data.streak
    }

    /// Mark a paper completed and advance the streak. Only the first
    /// completion of the day counts toward the streak.
    pub fn mark_complete(&mut self, paper_id: &str) -> Result<(), String> {
        self.mark_complete_on(paper_id, Local::now().date_naive());
        self.save()
    }

    fn mark_complete_on(&mut self, paper_id: &str, today: NaiveDate) {
        let today_str = today.format("%Y-%m-%d").to_string();
        let already_read_today = self.data.last_read_date.as_deref() == Some(today_str.as_str());

        self.data.completed.insert(paper_id.to_string(), true);
        self.data.last_read_date = Some(today_str);

        if !already_read_today {
            self.data.streak += 1;
        }
    }

    /// Reset a lapsed streak: anything older than yesterday breaks it.
    fn settle_streak(&mut self, today: NaiveDate) {
        if let Some(last) = &self.data.last_read_date {
            if let Ok(last_date) = NaiveDate::parse_from_str(last, "%Y-%m-%d") {
                if last_date < today - Duration::days(1) {
                    self.data.streak = 0;
                }
            }
        }
    }

    // ==================== API key ====================

    /// Current API key. The `ANTHROPIC_API_KEY` environment variable takes
    /// precedence over the stored key.
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY") {
            if !key.is_empty() {
                return Some(key);
            }
        }
        self.data.api_key.clone()
    }

    /// Set and save the API key. An empty string clears it.
    pub fn set_api_key(&mut self, key: String) -> Result<(), String> {
        self.data.api_key = if key.is_empty() { None } else { Some(key) };
        self.save()
    }

    /// Masked key for display (first/last 4 chars). Keys are not validated
    /// on save, so masking must not assume ASCII.
    pub fn masked_api_key(&self) -> Option<String> {
        self.data.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() > 8 {
                let prefix: String = chars[..4].iter().collect();
                let suffix: String = chars[chars.len() - 4..].iter().collect();
                format!("{}...{}", prefix, suffix)
            } else {
                "*".repeat(chars.len())
            }
        })
    }
}
