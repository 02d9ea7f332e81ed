pub mod ai_client;
pub mod analysis;
pub mod catalog;
pub mod error;
pub mod fallback;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod pubmed;
pub mod store;
pub mod utils;

pub use ai_client::AiClient;
pub use analysis::{evaluate_summary, extract_metadata};
pub use error::Error;
pub use models::{Level, Paper, PaperMetadata, SummaryAssessment};
pub use store::Store;
