mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bhoomi_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use bhoomi_ai::{CaseAnalyzer, GeminiClient, GenerationConfig};
use bhoomi_core::{CaseStatus, CaseUpdate, DisputeCategory, NewCase};
use bhoomi_store::{CaseStore, DEFAULT_PAGE_SIZE};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "bhoomi",
    version,
    about = "AI-assisted analysis of Bangalore property disputes"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List dispute categories with their prompt context.
    Categories,
    /// Print the analysis prompt for a case description.
    Prompt {
        /// Dispute category; unknown values use the `other` context.
        #[arg(long, default_value = "other")]
        category: String,
        /// Case description file (stdin when omitted).
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Normalize raw model output into a complete analysis.
    Normalize {
        /// Raw model output file (stdin when omitted).
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print JSON instead of a report card.
        #[arg(long)]
        json: bool,
    },
    /// Validate, analyze and optionally store a case.
    Analyze {
        #[arg(long)]
        category: DisputeCategory,
        #[arg(long)]
        title: String,
        /// Case description file (stdin when omitted).
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        model: ModelArgs,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Re-run analysis for a stored case and replace its record.
    Reanalyze {
        id: Uuid,
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        model: ModelArgs,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Manage stored cases.
    Cases {
        #[command(subcommand)]
        action: CasesCommand,
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[derive(Subcommand)]
enum CasesCommand {
    /// List active cases, newest first.
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
        #[arg(long)]
        category: Option<DisputeCategory>,
    },
    /// Show one case as a report card.
    Show {
        id: Uuid,
        #[arg(long)]
        json: bool,
    },
    /// Update a case; a new description or category triggers re-analysis.
    Update {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        /// File holding the new case description.
        #[arg(long)]
        text_file: Option<PathBuf>,
        #[arg(long)]
        category: Option<DisputeCategory>,
        #[arg(long, value_parser = parse_status)]
        status: Option<CaseStatus>,
        /// Re-analyze even if the description and category are unchanged.
        #[arg(long)]
        reanalyze: bool,
        #[command(flatten)]
        model: ModelArgs,
    },
    /// Soft-delete a case.
    Delete { id: Uuid },
    /// Per-user statistics.
    Stats,
}

/// Model invocation settings.
#[derive(Args)]
struct ModelArgs {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, default_value_t = 0.3)]
    temperature: f32,
    #[arg(long, default_value_t = 2048)]
    max_output_tokens: u32,
}

impl ModelArgs {
    fn analyzer(&self) -> anyhow::Result<CaseAnalyzer<GeminiClient>> {
        let api_key = self
            .api_key
            .clone()
            .context("GEMINI_API_KEY must be set (or pass --api-key)")?;
        let client =
            GeminiClient::with_base_url(self.base_url.clone(), api_key, self.model.clone())
                .with_config(GenerationConfig {
                    temperature: self.temperature,
                    max_output_tokens: self.max_output_tokens,
                });
        Ok(CaseAnalyzer::new(client))
    }
}

/// Case store location and owner.
#[derive(Args)]
struct StoreArgs {
    /// JSON snapshot holding stored cases.
    #[arg(long, env = "BHOOMI_DB")]
    db: Option<PathBuf>,
    #[arg(long, env = "BHOOMI_USER", default_value = "local")]
    user: String,
}

impl StoreArgs {
    async fn open(&self) -> anyhow::Result<Option<CaseStore>> {
        match &self.db {
            Some(path) => Ok(Some(
                CaseStore::open_persistent(path)
                    .await
                    .with_context(|| format!("opening case store {}", path.display()))?,
            )),
            None => Ok(None),
        }
    }

    async fn require(&self) -> anyhow::Result<CaseStore> {
        match self.open().await? {
            Some(store) => Ok(store),
            None => bail!("--db (or BHOOMI_DB) is required for case management"),
        }
    }
}

fn parse_status(s: &str) -> Result<CaseStatus, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "active" => Ok(CaseStatus::Active),
        "archived" => Ok(CaseStatus::Archived),
        "deleted" => Ok(CaseStatus::Deleted),
        other => Err(format!("unknown status {other:?} (active, archived, deleted)")),
    }
}

async fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display())),
        None => tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
            .await?
            .context("reading stdin"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("bhoomi v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Categories => {
            for cat in DisputeCategory::ALL {
                println!("{:<12} {}", cat.as_str(), cat.label());
                println!("  {}", cat.context());
            }
        }
        Command::Prompt { category, file } => {
            let text = read_input(file.as_deref()).await?;
            println!("{}", bhoomi_ai::compose_raw(text.trim(), &category));
        }
        Command::Normalize { file, json } => {
            let raw = read_input(file.as_deref()).await?;
            let record = bhoomi_ai::normalize(&raw);
            if json {
                print_json(&record)?;
            } else {
                report::print_analysis(&record);
            }
        }
        Command::Analyze {
            category,
            title,
            file,
            json,
            model,
            store,
        } => {
            let case_text = read_input(file.as_deref()).await?;
            let case = NewCase {
                title,
                case_text,
                dispute_type: category,
            }
            .validate()?;

            let analyzer = model.analyzer()?;
            eprintln!("  Analyzing with {}...", model.model);
            let record = analyzer
                .analyze(&case.case_text, case.dispute_type)
                .await
                .context("case analysis failed")?;

            match store.open().await? {
                Some(db) => {
                    let saved = db.create_case(&store.user, case, record).await?;
                    eprintln!("  Saved case {}", saved.id);
                    if json {
                        print_json(&saved)?;
                    } else {
                        report::print_case_report(&saved);
                    }
                }
                None if json => print_json(&record)?,
                None => report::print_analysis(&record),
            }
        }
        Command::Reanalyze {
            id,
            json,
            model,
            store,
        } => {
            let db = store.require().await?;
            let case = db
                .get_case(&store.user, id)
                .await
                .with_context(|| format!("case {id} not found"))?;
            let analyzer = model.analyzer()?;
            eprintln!("  Re-analyzing with {}...", model.model);
            let record = analyzer
                .analyze(&case.case_text, case.dispute_type)
                .await
                .context("case re-analysis failed")?;
            let updated = db
                .update_case(&store.user, id, CaseUpdate::default(), Some(record))
                .await?;
            if json {
                print_json(&updated)?;
            } else {
                report::print_case_report(&updated);
            }
        }
        Command::Cases { action, store } => run_cases(action, &store).await?,
    }

    Ok(())
}

async fn run_cases(action: CasesCommand, args: &StoreArgs) -> anyhow::Result<()> {
    let store = args.require().await?;
    let user = args.user.as_str();

    match action {
        CasesCommand::List {
            limit,
            offset,
            category,
        } => {
            let cases = store.list_cases(user, limit, offset, category).await;
            if cases.is_empty() {
                println!("No cases.");
            }
            for c in cases {
                println!(
                    "{}  {:<10} {:>2}/10  {}  {}",
                    c.id,
                    c.dispute_type.as_str(),
                    c.confidence_score,
                    c.created_at.format("%Y-%m-%d"),
                    c.title
                );
            }
        }
        CasesCommand::Show { id, json } => {
            let case = store
                .get_case(user, id)
                .await
                .with_context(|| format!("case {id} not found"))?;
            if json {
                print_json(&case)?;
            } else {
                report::print_case_report(&case);
            }
        }
        CasesCommand::Update {
            id,
            title,
            text_file,
            category,
            status,
            reanalyze,
            model,
        } => {
            let case_text = match text_file {
                Some(path) => Some(read_input(Some(path.as_path())).await?),
                None => None,
            };
            let update = CaseUpdate {
                title,
                case_text,
                dispute_type: category,
                status,
            }
            .validate()?;
            if update.is_empty() && !reanalyze {
                bail!("nothing to update");
            }

            let current = store
                .get_case(user, id)
                .await
                .with_context(|| format!("case {id} not found"))?;
            let analysis = match current.reanalysis_input(&update, reanalyze) {
                Some((text, category)) => {
                    eprintln!("  Re-analyzing with {}...", model.model);
                    Some(
                        model
                            .analyzer()?
                            .analyze(text, category)
                            .await
                            .context("case re-analysis failed")?,
                    )
                }
                None => None,
            };

            let updated = store.update_case(user, id, update, analysis).await?;
            report::print_case_report(&updated);
        }
        CasesCommand::Delete { id } => {
            store.delete_case(user, id).await?;
            println!("Case {id} deleted.");
        }
        CasesCommand::Stats => {
            let stats = store.user_stats(user).await;
            print_json(&stats)?;
        }
    }

    Ok(())
}
