//! skillpath CLI - career roadmap client.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use skillpath_api::BackendClient;
use skillpath_core::{RoadmapId, SkillLevel, TechStackSelection};
use skillpath_profile::{add_completed_skill, ProfileEditor};
use skillpath_store::RestResumeStore;
use skillpath_tracker::{month_events, RoadmapTracker};
use tracing::Level;

mod config;

use config::Settings;

#[derive(Parser)]
#[command(name = "skillpath")]
#[command(about = "Career roadmap client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a resume for parsing
    Upload {
        /// Path to the resume file
        file: std::path::PathBuf,
    },
    /// Show or edit the stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Suggest technologies to learn next
    Suggest {
        /// Free-text interests
        interests: Vec<String>,
    },
    /// Generate roadmaps for selected technologies
    Generate {
        /// Selections as tech:days:level, e.g. "Rust:14:beginner"
        #[arg(required = true)]
        selections: Vec<String>,
    },
    /// Show the current roadmap and its progress
    Roadmap {
        /// Only show the active record
        #[arg(long)]
        active: bool,
    },
    /// Flip one day's completion state
    Toggle {
        /// Technology
        tech_stack: String,
        /// Day number
        day: u32,
    },
    /// Analyze the skill portfolio
    Analytics,
    /// Show the learning calendar for a month
    Calendar {
        /// Month (1-12)
        month: u32,
        /// Year
        year: i32,
        /// Project locally from the stored record instead of asking the backend
        #[arg(long)]
        local: bool,
    },
    /// Delete a roadmap record
    Delete {
        /// Record id
        id: String,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile document
    Show,
    /// Set a field by dotted path and save a new revision
    Set {
        /// Dotted path, e.g. user_profile.current_role
        path: String,
        /// New value (JSON, or a bare string)
        value: String,
    },
    /// Append an item to an array field and save a new revision
    Push {
        /// Dotted path, e.g. skills.technical
        path: String,
        /// Item to append (JSON, or a bare string)
        item: String,
    },
    /// Remove an array item by index and save a new revision
    Remove {
        /// Dotted path
        path: String,
        /// 0-based index
        index: usize,
    },
    /// Record a skill as learned on the latest revision
    AddSkill {
        /// Skill name
        skill: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    let client = BackendClient::new(&settings.backend_url);

    match cli.command {
        Commands::Upload { file } => {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| anyhow!("not a file path: {}", file.display()))?
                .to_string();
            let bytes = std::fs::read(&file)
                .with_context(|| format!("reading {}", file.display()))?;

            let parsed = client.parse_resume(&filename, bytes, &settings.user).await?;
            match &parsed.candidate_id {
                Some(candidate_id) => println!("Stored as resume {}", candidate_id),
                // Backend parsed without persisting; keep the document ourselves.
                None => {
                    if let Ok((url, key)) = settings.store_credentials() {
                        let store = RestResumeStore::new(url, key);
                        let mut editor = ProfileEditor::with_document(
                            store,
                            settings.user.clone(),
                            parsed.data.clone(),
                        );
                        let row = editor.save().await?;
                        println!("Stored as revision {}", row.id);
                    }
                }
            }
            println!("{}", serde_json::to_string_pretty(&parsed.data)?);
        }
        Commands::Profile { action } => {
            let (url, key) = settings.store_credentials()?;
            let store = RestResumeStore::new(url, key);

            match action {
                ProfileAction::Show => {
                    let editor = ProfileEditor::load(store, settings.user.clone()).await?;
                    println!("{}", serde_json::to_string_pretty(editor.document())?);
                }
                ProfileAction::Set { path, value } => {
                    let mut editor = ProfileEditor::load(store, settings.user.clone()).await?;
                    editor.set(&path, parse_value(&value))?;
                    let row = editor.save().await?;
                    println!("Saved revision {}", row.id);
                }
                ProfileAction::Push { path, item } => {
                    let mut editor = ProfileEditor::load(store, settings.user.clone()).await?;
                    editor.push(&path, parse_value(&item))?;
                    let row = editor.save().await?;
                    println!("Saved revision {}", row.id);
                }
                ProfileAction::Remove { path, index } => {
                    let mut editor = ProfileEditor::load(store, settings.user.clone()).await?;
                    editor.remove(&path, index)?;
                    let row = editor.save().await?;
                    println!("Saved revision {}", row.id);
                }
                ProfileAction::AddSkill { skill } => {
                    let mut store = store;
                    let added = add_completed_skill(&mut store, &settings.user, &skill).await?;
                    if added {
                        println!("Added {} to technical skills", skill);
                    } else {
                        println!("{} is already listed", skill);
                    }
                }
            }
        }
        Commands::Suggest { interests } => {
            let skills = known_skills(&settings).await.unwrap_or_default();
            let suggestions = client
                .suggest_tech_stacks(&interests, &settings.user, &skills)
                .await?;

            println!("Suggestions ({})", suggestions.len());
            for suggestion in suggestions {
                let known = if suggestion.already_known { " (known)" } else { "" };
                println!(
                    "  {} | {} | relevance {}{}",
                    suggestion.name, suggestion.difficulty, suggestion.relevance_score, known,
                );
                if !suggestion.description.is_empty() {
                    println!("    {}", suggestion.description);
                }
            }
        }
        Commands::Generate { selections } => {
            let selections = selections
                .iter()
                .map(|s| parse_selection(s))
                .collect::<Result<Vec<_>>>()?;
            let skills = known_skills(&settings).await.unwrap_or_default();

            let generated = client
                .generate_roadmaps(&settings.user, &selections, &skills)
                .await?;
            println!("Generated record {}", generated.roadmap_id);
            for roadmap in &generated.roadmaps {
                println!(
                    "  {} | {} days | {}",
                    roadmap.tech_stack,
                    roadmap.total_days(),
                    roadmap.skill_level,
                );
            }
        }
        Commands::Roadmap { active } => {
            let record = if active {
                client.active_roadmap(&settings.user).await?
            } else {
                client.user_roadmap(&settings.user).await?
            };
            let Some(record) = record else {
                println!("No roadmap found");
                return Ok(());
            };

            let skills = known_skills(&settings).await.unwrap_or_default();
            println!("Record {}", record.id);
            if let Some(start) = record.effective_start_date() {
                println!("  Started: {}", start);
            }
            for roadmap in &record.roadmaps {
                let percent = skillpath_core::percent_complete(roadmap, &record.progress);
                let known = if skillpath_tracker::is_known_skill(&skills, &roadmap.tech_stack) {
                    " (known)"
                } else {
                    ""
                };
                println!(
                    "  {} | {}% of {} days{}",
                    roadmap.tech_stack,
                    percent,
                    roadmap.total_days(),
                    known,
                );
            }
            println!(
                "  Overall: {}%",
                skillpath_core::overall_percent(&record.roadmaps, &record.progress)
            );
        }
        Commands::Toggle { tech_stack, day } => {
            let record = client
                .user_roadmap(&settings.user)
                .await?
                .ok_or_else(|| anyhow!("no roadmap to toggle"))?;

            let tracker = RoadmapTracker::new(record, client.clone());
            let receipt = tracker.toggle(&tech_stack, day).await?;
            let state = if receipt.completed { "done" } else { "not done" };
            println!("{} day {} is now {}", tech_stack, day, state);

            if receipt.just_completed {
                println!("{} roadmap complete!", tech_stack);
                // Completing a roadmap counts the technology as a known skill.
                if let Ok((url, key)) = settings.store_credentials() {
                    let mut store = RestResumeStore::new(url, key);
                    if add_completed_skill(&mut store, &settings.user, &tech_stack).await? {
                        println!("Added {} to your profile", tech_stack);
                    }
                }
            }
        }
        Commands::Analytics => {
            let (url, key) = settings.store_credentials()?;
            let store = RestResumeStore::new(url, key);
            let editor = ProfileEditor::load(store, settings.user.clone()).await?;
            let report = skillpath_tracker::analyze(&editor.profile());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Calendar { month, year, local } => {
            let events = if local {
                let record = client
                    .user_roadmap(&settings.user)
                    .await?
                    .ok_or_else(|| anyhow!("no roadmap to project"))?;
                month_events(&record, month, year)
            } else {
                client.calendar_events(&settings.user, month, year).await?
            };

            println!("Events for {:04}-{:02} ({})", year, month, events.len());
            for event in events {
                let mark = if event.completed { "x" } else { " " };
                println!(
                    "  {} [{}] {} - {}",
                    event.date, mark, event.tech_stack, event.title,
                );
            }
        }
        Commands::Delete { id } => {
            client.delete_roadmap(&RoadmapId::new(id.clone())).await?;
            println!("Deleted record {}", id);
        }
    }

    Ok(())
}

/// Skills from the stored profile, when storage is configured.
async fn known_skills(settings: &Settings) -> Option<Vec<String>> {
    let (url, key) = settings.store_credentials().ok()?;
    let store = RestResumeStore::new(url, key);
    let editor = ProfileEditor::load(store, settings.user.clone()).await.ok()?;
    Some(editor.profile().known_skills())
}

/// Parse an argument as JSON, falling back to a bare string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse a tech:days:level selection argument.
fn parse_selection(raw: &str) -> Result<TechStackSelection> {
    let mut parts = raw.splitn(3, ':');
    let tech_stack = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("empty selection"))?
        .to_string();
    let duration_days = match parts.next() {
        Some(days) => days
            .parse()
            .with_context(|| format!("bad day count in {:?}", raw))?,
        None => 14,
    };
    let skill_level = match parts.next() {
        Some(level) => {
            SkillLevel::parse(level).ok_or_else(|| anyhow!("bad skill level in {:?}", raw))?
        }
        None => SkillLevel::Beginner,
    };

    Ok(TechStackSelection {
        tech_stack,
        duration_days,
        skill_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection_full_and_defaults() {
        let selection = parse_selection("Rust:21:advanced").unwrap();
        assert_eq!(selection.tech_stack, "Rust");
        assert_eq!(selection.duration_days, 21);
        assert_eq!(selection.skill_level, SkillLevel::Advanced);

        let selection = parse_selection("Go").unwrap();
        assert_eq!(selection.duration_days, 14);
        assert_eq!(selection.skill_level, SkillLevel::Beginner);

        assert!(parse_selection("Rust:soon").is_err());
        assert!(parse_selection(":7:beginner").is_err());
    }

    #[test]
    fn test_parse_value_json_or_string() {
        assert_eq!(parse_value("3"), serde_json::json!(3));
        assert_eq!(parse_value("[\"a\"]"), serde_json::json!(["a"]));
        assert_eq!(parse_value("Engineer"), serde_json::json!("Engineer"));
    }
}
