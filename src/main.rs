//! vaidya CLI: Ayurvedic diagnosis over a triple-store knowledge graph.

use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use vaidya::config::Config;
use vaidya::diagnose::{Ayurveda, Collector};
use vaidya::embed::HashEmbedder;
use vaidya::ingest;
use vaidya::symbol::Lexicon;

#[derive(Parser)]
#[command(name = "vaidya", version, about = "Ayurvedic diagnosis engine")]
struct Cli {
    /// Path to a TOML config file with engine thresholds.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use embedding-based fuzzy matching instead of exact name identity.
    #[arg(long, global = true)]
    semantic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a knowledge directory and print graph statistics.
    Load {
        /// Root of the knowledge directory tree.
        data_dir: PathBuf,
    },

    /// Search the graph for facts matching the given filters.
    Search {
        /// Root of the knowledge directory tree.
        data_dir: PathBuf,

        /// Head filter.
        #[arg(long)]
        head: Option<String>,

        /// Relation filter.
        #[arg(long)]
        relation: Option<String>,

        /// Tail filter.
        #[arg(long)]
        tail: Option<String>,

        /// Scan with approximate matching instead of the exact indices.
        #[arg(long)]
        fuzzy: bool,
    },

    /// Expand a category to its leaf members.
    Objects {
        /// Root of the knowledge directory tree.
        data_dir: PathBuf,

        /// Category name to expand.
        category: String,
    },

    /// Run an interactive diagnosis session.
    Diagnose {
        /// Root of the knowledge directory tree.
        data_dir: PathBuf,

        /// Number of symptom collection rounds.
        #[arg(long, default_value = "1")]
        rounds: usize,
    },
}

/// Terminal-driven [`Collector`]: numbered menus on stdout, answers on stdin.
struct StdinCollector;

impl StdinCollector {
    fn prompt(&self, text: &str) -> String {
        print!("{text}");
        std::io::stdout().flush().ok();
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).ok();
        line.trim().to_owned()
    }
}

impl Collector for StdinCollector {
    fn select(&mut self, options: &[String]) -> Option<String> {
        if options.is_empty() {
            return None;
        }
        println!("Where are the symptoms observed?");
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
        let answer = self.prompt("Pick a number (empty for all): ");
        answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
            .cloned()
    }

    fn rate(&mut self, items: &[String]) -> Vec<f64> {
        println!("Rate each symptom from 0 (absent) to 1 (severe).");
        items
            .iter()
            .map(|item| {
                self.prompt(&format!("  {item}: "))
                    .parse::<f64>()
                    .unwrap_or(0.0)
                    .clamp(0.0, 1.0)
            })
            .collect()
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).into_diagnostic()?,
        None => Config::default(),
    };
    let lexicon = if cli.semantic {
        Lexicon::semantic(
            Arc::new(HashEmbedder::default()),
            config.similarity_threshold,
        )
    } else {
        Lexicon::exact()
    };

    match cli.command {
        Commands::Load { data_dir } => {
            let kg = ingest::load_dir(&data_dir, lexicon).into_diagnostic()?;
            println!(
                "Loaded {}: {} facts, {} entities, {} relations",
                data_dir.display(),
                kg.fact_count(),
                kg.entity_count(),
                kg.relation_count()
            );
        }

        Commands::Search {
            data_dir,
            head,
            relation,
            tail,
            fuzzy,
        } => {
            let kg = ingest::load_dir(&data_dir, lexicon).into_diagnostic()?;
            let head = head.map(|name| kg.entity(&name));
            let relation = relation.map(|name| kg.relation(&name));
            let tail = tail.map(|name| kg.entity(&name));

            if head.is_none() && relation.is_none() && tail.is_none() {
                miette::bail!("provide at least one of --head, --relation, --tail");
            }

            let hits = if fuzzy {
                kg.fuzzy_search(head.as_ref(), relation.as_ref(), tail.as_ref())
            } else {
                kg.exact_search(head.as_ref(), relation.as_ref(), tail.as_ref())
            };

            if hits.is_empty() {
                println!("No matching facts.");
            } else {
                let mut hits: Vec<String> = hits.iter().map(|f| f.to_string()).collect();
                hits.sort();
                println!("Facts ({}):", hits.len());
                for fact in hits {
                    println!("  {fact}");
                }
            }
        }

        Commands::Objects { data_dir, category } => {
            let kg = ingest::load_dir(&data_dir, lexicon).into_diagnostic()?;
            let mut members: Vec<String> = kg
                .objects(&category)
                .iter()
                .map(|e| e.name().to_owned())
                .collect();
            members.sort();
            println!("{category} ({}):", members.len());
            for member in members {
                println!("  {member}");
            }
        }

        Commands::Diagnose { data_dir, rounds } => {
            let mut session = if cli.semantic {
                Ayurveda::open_semantic(&data_dir, Arc::new(HashEmbedder::default()), config)
                    .into_diagnostic()?
            } else {
                Ayurveda::open(&data_dir, config).into_diagnostic()?
            };

            let mut collector = StdinCollector;
            let mut rng = rand::thread_rng();
            for _ in 0..rounds {
                session.collect_symptoms(&mut collector, &mut rng);
            }

            let mut elevated: Vec<(String, f64)> = session
                .diagnose()
                .into_diagnostic()?
                .iter()
                .map(|(dosha, prob)| (dosha.name().to_owned(), *prob))
                .collect();
            if elevated.is_empty() {
                println!("\nNo dosha stands out from the reported symptoms.");
            } else {
                elevated.sort_by(|a, b| b.1.total_cmp(&a.1));
                println!("\nElevated doshas:");
                for (dosha, prob) in elevated {
                    println!("  {dosha} (probability {prob:.2})");
                }

                let foods = session.suggest_food();
                if foods.is_empty() {
                    println!("No single food pacifies every elevated dosha.");
                } else {
                    let mut foods: Vec<&str> = foods.iter().map(|e| e.name()).collect();
                    foods.sort_unstable();
                    println!("Suggested foods: {}", foods.join(", "));
                }
            }
        }
    }

    Ok(())
}
