//! medreader CLI - command-line shell around the reading list and
//! feedback pipeline.
//!
//! Usage: medreader [OPTIONS] <COMMAND>
//!
//! Supports JSON output for scripting.

use clap::{Parser, Subcommand};
use std::io::Read as _;
use std::path::PathBuf;

use medreader::{analysis, pubmed, AiClient, Error, Paper, Store, SummaryAssessment};

#[derive(Parser)]
#[command(name = "medreader", about = "A medical physics reading list with AI-assisted summary feedback", version)]
struct Cli {
    /// Path to the data file (default: user data directory)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all papers grouped by week, with completion marks
    List,
    /// Show one paper in full
    Show { id: String },
    /// Add a custom paper by extracting metadata from a source
    Add {
        /// Read paper text from a file
        #[arg(long, conflicts_with_all = ["pubmed", "text"])]
        file: Option<PathBuf>,
        /// Fetch the abstract from a PubMed URL
        #[arg(long, conflicts_with = "text")]
        pubmed: Option<String>,
        /// Paper text given inline (use '-' to read stdin)
        #[arg(long)]
        text: Option<String>,
        /// Week to file the paper under
        #[arg(long, default_value_t = 7)]
        week: u32,
        /// Estimated read time
        #[arg(long, default_value = "20 min")]
        read_time: String,
    },
    /// Remove a custom paper
    Remove { id: String },
    /// Submit a written summary of a paper for feedback
    /// (reads the summary from stdin unless --summary is given)
    Review {
        id: String,
        #[arg(long)]
        summary: Option<String>,
    },
    /// Mark a paper as completed (advances the reading streak)
    Complete { id: String },
    /// Manage the Anthropic API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store an API key
    Set { key: String },
    /// Show the stored key (masked)
    Show,
    /// Remove the stored key
    Clear,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let data_path = cli.data.clone().unwrap_or_else(Store::default_path);
    let mut store = Store::open(&data_path);

    let result = run(&cli, &mut store).await;
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli, store: &mut Store) -> Result<(), String> {
    match &cli.command {
        Command::List => {
            list_papers(store, cli.json);
            Ok(())
        }
        Command::Show { id } => {
            let paper = store
                .find_paper(id)
                .ok_or_else(|| format!("No paper with id '{}'", id))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&paper).unwrap_or_default());
            } else {
                print_paper(&paper, store.is_completed(id));
            }
            Ok(())
        }
        Command::Add { file, pubmed: pubmed_url, text, week, read_time } => {
            let (source_text, url) = load_source(file.as_deref(), pubmed_url.as_deref(), text.as_deref()).await?;

            let client = AiClient::new(store.api_key());
            let meta = analysis::extract_metadata(&client, &source_text)
                .await
                .map_err(|e| e.to_string())?;

            let paper = Paper::from_metadata(meta, *week, read_time.clone(), url, Some(&source_text));
            println!("{}", add_output(&paper, cli.json));
            store.add_custom_paper(paper)?;
            Ok(())
        }
        Command::Remove { id } => {
            store.remove_custom_paper(id)?;
            println!("Removed paper {}", id);
            Ok(())
        }
        Command::Review { id, summary } => {
            let paper = store
                .find_paper(id)
                .ok_or_else(|| format!("No paper with id '{}'", id))?;

            let user_summary = match summary {
                Some(s) => s.clone(),
                None => {
                    println!("Write your summary of \"{}\" (end with Ctrl-D):", paper.title);
                    read_stdin()?
                }
            };

            let client = AiClient::new(store.api_key());
            let assessment = analysis::evaluate_summary(&client, &paper, &user_summary)
                .await
                .map_err(|e| e.to_string())?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&assessment).unwrap_or_default());
            } else {
                print_assessment(&assessment);
            }
            Ok(())
        }
        Command::Complete { id } => {
            store
                .find_paper(id)
                .ok_or_else(|| format!("No paper with id '{}'", id))?;
            store.mark_complete(id)?;
            println!(
                "Marked {} complete. Streak: {} day(s), {} paper(s) read.",
                id,
                store.streak(),
                store.completed_count()
            );
            Ok(())
        }
        Command::Key { action } => match action {
            KeyAction::Set { key } => {
                store.set_api_key(key.clone())?;
                println!("API key saved");
                Ok(())
            }
            KeyAction::Show => {
                match store.masked_api_key() {
                    Some(masked) => println!("Stored key: {}", masked),
                    None => println!("No API key stored (free backend + local fallback in use)"),
                }
                Ok(())
            }
            KeyAction::Clear => {
                store.set_api_key(String::new())?;
                println!("API key cleared");
                Ok(())
            }
        },
    }
}

/// Resolve the paper source text from whichever input flag was given.
async fn load_source(
    file: Option<&std::path::Path>,
    pubmed_url: Option<&str>,
    text: Option<&str>,
) -> Result<(String, Option<String>), String> {
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        return Ok((content, None));
    }

    if let Some(url) = pubmed_url {
        let abstract_text = pubmed::fetch_abstract(url).await.map_err(|e| match e {
            Error::SourceFetch(msg) => msg,
            other => other.to_string(),
        })?;
        return Ok((abstract_text, Some(url.to_string())));
    }

    match text {
        Some("-") => Ok((read_stdin()?, None)),
        Some(inline) => Ok((inline.to_string(), None)),
        None => Err("Provide a source: --file, --pubmed, or --text".to_string()),
    }
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(buf)
}

fn list_papers(store: &Store, json: bool) {
    let papers = store.papers();

    if json {
        println!("{}", serde_json::to_string_pretty(&papers).unwrap_or_default());
        return;
    }

    let mut current_week = 0;
    for paper in &papers {
        if paper.week != current_week {
            current_week = paper.week;
            println!("\nWeek {}", current_week);
        }
        let mark = if store.is_completed(&paper.id) { "x" } else { " " };
        let origin = if paper.curated { "" } else { " (custom)" };
        println!(
            "  [{}] {:5} {} — {} · {} · {}{}",
            mark,
            paper.id,
            paper.title,
            paper.topic,
            paper.level.as_str(),
            paper.read_time,
            origin
        );
    }

    println!(
        "\n{} of {} read · streak: {} day(s)",
        store.completed_count(),
        papers.len(),
        store.streak()
    );
}

/// Output for `add`: bare JSON when scripting (the id is in the record),
/// the formatted paper plus a confirmation line otherwise.
fn add_output(paper: &Paper, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(paper).unwrap_or_default()
    } else {
        format!("{}\n\nAdded paper {}", render_paper(paper, false), paper.id)
    }
}

fn print_paper(paper: &Paper, completed: bool) {
    println!("{}", render_paper(paper, completed));
}

fn render_paper(paper: &Paper, completed: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", paper.title));
    out.push_str(&format!(
        "{} · {} · week {} · {}\n",
        paper.topic,
        paper.level.as_str(),
        paper.week,
        paper.read_time
    ));
    if completed {
        out.push_str("(completed)\n");
    }
    out.push_str(&format!("\n{}\n\n", paper.summary));
    out.push_str("Key concepts:\n");
    for point in &paper.key_points {
        out.push_str(&format!("  - {}\n", point));
    }
    if let Some(url) = &paper.pubmed_url {
        out.push_str(&format!("\n{}\n", url));
    }
    out.push_str(&paper.citation);

    out
}

fn print_assessment(assessment: &SummaryAssessment) {
    println!(
        "Concepts: {}/10 · Writing: {}/10",
        assessment.concept_score, assessment.writing_score
    );

    if !assessment.understood.is_empty() {
        println!("\nYou explained well:");
        for item in &assessment.understood {
            println!("  + {}", item);
        }
    }

    if !assessment.missed_concepts.is_empty() {
        println!("\nWorth revisiting:");
        for item in &assessment.missed_concepts {
            println!("  - {}", item);
        }
    }

    if !assessment.writing_feedback.is_empty() {
        println!("\nWriting tips:");
        for tip in &assessment.writing_feedback {
            println!("  * {}", tip);
        }
    }

    println!("\n{}", assessment.insight);
    println!("{}", assessment.encouragement);
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreader::fallback;

    fn sample_paper() -> Paper {
        let text = "Dose Audit Notes\nLocal measurements of absorbed dose.\nCollected over six months.";
        Paper::from_metadata(
            fallback::analyze_metadata(text),
            7,
            "10 min".to_string(),
            None,
            Some(text),
        )
    }

    #[test]
    fn test_add_output_json_is_pure_json() {
        let paper = sample_paper();
        let out = add_output(&paper, true);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], paper.id.as_str());
        assert!(!out.contains("Added paper"));
    }

    #[test]
    fn test_add_output_text_confirms_with_id() {
        let paper = sample_paper();
        let out = add_output(&paper, false);
        assert!(out.contains("Dose Audit Notes"));
        assert!(out.ends_with(&format!("Added paper {}", paper.id)));
    }
}
