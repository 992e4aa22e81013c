use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use moodmatch_agent::MoodMatchAgent;
use moodmatch_core::{normalize_mood, Category, MoodEngine, MoodError, MoodmatchConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long, env = "MOODMATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog moods
    Moods {
        /// Only moods in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Resolve a free-text mood token to a catalog mood
    Resolve { token: String },
    /// Show the category of a mood
    Category { mood: String },
    /// List moods curated as similar to a mood
    Similar { mood: String },
    /// Show the uplift target of a mood
    Opposite { mood: String },
    /// Merge several moods (first is primary) and print the profile as JSON
    Merge {
        #[arg(required = true)]
        moods: Vec<String>,
    },
    /// Check every catalog entry
    Validate,
    /// Recommend music, a movie and a book for a message
    Recommend {
        #[arg(required = true)]
        text: Vec<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Conversation id
        #[arg(long, default_value = "cli")]
        context: String,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Unknown moods are a normal outcome: report them and exit 1.
fn not_recognized(mood: &str) -> ExitCode {
    eprintln!("mood not recognized: {}", mood);
    ExitCode::from(1)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = match &args.config {
        Some(path) => MoodmatchConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MoodmatchConfig::from_env(),
    };
    let engine = MoodEngine::from_config(&config)?;
    info!("Mood engine ready with {} moods", engine.catalog().len());

    match args.command {
        Command::Moods { category } => {
            let keys: Vec<&str> = match category {
                Some(name) => {
                    let Some(category) = Category::parse(&name) else {
                        bail!("unknown category '{}'", name);
                    };
                    engine.moods_in(category)
                }
                None => engine.catalog().keys().iter().map(String::as_str).collect(),
            };
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Resolve { token } => match engine.resolve_detailed(&token) {
            Ok(resolution) => {
                let kind = if resolution.exact { "exact" } else { "fuzzy" };
                println!(
                    "{}\t{:.3}\t{}",
                    resolution.profile.key, resolution.score, kind
                );
            }
            Err(MoodError::NotFound(_)) => return Ok(not_recognized(&token)),
            Err(e) => return Err(e.into()),
        },
        Command::Category { mood } => match engine.category_of(&normalize_mood(&mood)) {
            Ok(category) => println!("{}", category),
            Err(MoodError::NotFound(_)) => return Ok(not_recognized(&mood)),
            Err(e) => return Err(e.into()),
        },
        Command::Similar { mood } => match engine.similar_to(&normalize_mood(&mood)) {
            Ok(similar) => {
                for key in similar {
                    println!("{}", key);
                }
            }
            Err(MoodError::NotFound(_)) => return Ok(not_recognized(&mood)),
            Err(e) => return Err(e.into()),
        },
        Command::Opposite { mood } => match engine.opposite_of(&normalize_mood(&mood)) {
            Ok(Some(opposite)) => println!("{}", opposite),
            Ok(None) => println!("(none)"),
            Err(MoodError::NotFound(_)) => return Ok(not_recognized(&mood)),
            Err(e) => return Err(e.into()),
        },
        Command::Merge { moods } => match engine.resolve_and_merge(moods.as_slice()) {
            Ok(merged) => println!("{}", serde_json::to_string_pretty(&merged)?),
            Err(MoodError::NotFound(_)) => return Ok(not_recognized(&moods.join(" "))),
            Err(e) => return Err(e.into()),
        },
        Command::Validate => {
            let mut invalid = 0;
            for profile in engine.catalog().profiles() {
                for issue in profile.issues() {
                    invalid += 1;
                    println!("{}: {}", profile.key, issue);
                }
            }
            if invalid > 0 {
                return Ok(ExitCode::from(1));
            }
            println!("{} moods valid", engine.catalog().len());
        }
        Command::Recommend {
            text,
            json,
            context,
        } => {
            let agent = MoodMatchAgent::offline(Arc::new(engine), config.agent.clone());
            let rec = agent.recommend(&context, &text.join(" ")).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rec)?);
            } else {
                println!("{}", rec.reply);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
