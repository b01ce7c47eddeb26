//! Lossgraph CLI: score an organisation graph from the command line
//!
//! Works against an in-memory store, optionally loaded from and saved to a
//! JSON snapshot between runs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use lossgraph::diagnostics::{get_diagnostics, Population};
use lossgraph::graph::{InterfaceId, MemoryStore, ModelId, Scope};
use lossgraph::sample::load_sample_organisation;
use lossgraph::scoring::{NetworkScore, RiskTier, ScoringEngine};
use lossgraph::{EngineConfig, Snapshot};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lossgraph", version, about = "Knowledge-transfer loss scoring")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "LOSSGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// JSON snapshot to load and save (overrides the config)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the reference sample organisation
    SeedSample,
    /// Score one interface
    Score {
        interface: String,

        /// Model id (defaults to the active model)
        #[arg(long)]
        model: Option<u64>,
    },
    /// Score every interface in a scope
    Network {
        /// Restrict to interfaces touching this unit
        #[arg(long)]
        unit: Option<String>,

        #[arg(long)]
        model: Option<u64>,
    },
    /// Aggregate the same scope under several models
    Compare {
        #[arg(required = true)]
        models: Vec<u64>,

        #[arg(long)]
        unit: Option<String>,
    },
    /// Derive factor assignments from legacy bond types
    Migrate {
        /// Interface ids (all interfaces when omitted)
        interfaces: Vec<String>,
    },
    /// Rule-based diagnostics and backward tracing
    Diagnostics {
        #[arg(long)]
        unit: Option<String>,
    },
    /// List factor models
    Models,
}

impl Commands {
    fn mutates(&self) -> bool {
        matches!(self, Commands::SeedSample | Commands::Migrate { .. })
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if cli.snapshot.is_some() {
        config.snapshot_path = cli.snapshot.clone();
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = Arc::new(match &config.snapshot_path {
        Some(path) if path.exists() => MemoryStore::from_snapshot(
            Snapshot::load(path).with_context(|| format!("reading snapshot {}", path.display()))?,
        ),
        _ => MemoryStore::new(),
    });

    let engine = ScoringEngine::new(store.clone(), config.clone());
    if config.bootstrap_on_start {
        engine.bootstrap()?;
    }

    let mutates = cli.command.mutates();
    match cli.command {
        Commands::SeedSample => {
            let added = load_sample_organisation(store.as_ref(), &config.declared_unit)?;
            println!("Loaded {} interfaces", added);
        }
        Commands::Score { interface, model } => {
            let score = engine.compute_interface_score(&InterfaceId::new(interface), model.map(ModelId::new))?;
            match cli.format {
                OutputFormat::Json => print_json(&score)?,
                OutputFormat::Table => {
                    let mut table = new_table(&["Factor", "Value", "Contribution", "Weight", "Weighted"]);
                    for f in &score.factors_applied {
                        table.add_row(vec![
                            f.factor_display_name.clone(),
                            f.factor_value_display.clone(),
                            format!("{:.3}", f.contribution),
                            format!("{:.2}", f.weight),
                            format!("{:.3}", f.weighted_contribution),
                        ]);
                    }
                    println!("{}", table);
                    println!(
                        "{} under '{}': {:.3} ({}%) {}",
                        score.interface_id,
                        score.model_name,
                        score.total_energy_loss,
                        score.energy_loss_percent,
                        score.risk_level
                    );
                }
            }
        }
        Commands::Network { unit, model } => {
            let network = engine.compute_network_score(&scope(unit), model.map(ModelId::new))?;
            match cli.format {
                OutputFormat::Json => print_json(&network)?,
                OutputFormat::Table => print_networks(std::slice::from_ref(&network)),
            }
        }
        Commands::Compare { models, unit } => {
            let ids: Vec<ModelId> = models.into_iter().map(ModelId::new).collect();
            let results = engine.compare_models(&ids, &scope(unit))?;
            match cli.format {
                OutputFormat::Json => print_json(&results)?,
                OutputFormat::Table => print_networks(&results),
            }
        }
        Commands::Migrate { interfaces } => {
            let report = if interfaces.is_empty() {
                engine.migrate_all_legacy()
            } else {
                let ids: Vec<InterfaceId> = interfaces.into_iter().map(InterfaceId::new).collect();
                engine.migrate_legacy_batch(&ids)
            };
            match cli.format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Table => println!(
                    "Migrated: {}  Skipped: {}  Failed: {}",
                    report.migrated, report.skipped, report.failed
                ),
            }
        }
        Commands::Diagnostics { unit } => {
            let population = Population::from_store(store.as_ref(), &scope(unit));
            let report = get_diagnostics(&population);
            match cli.format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Table => {
                    let mut table = new_table(&["", "Dimension", "Score", "Analysis"]);
                    for d in &report.dimensions {
                        table.add_row(vec![d.icon.clone(), d.dimension.clone(), d.score.to_string(), d.analysis.clone()]);
                    }
                    println!("{}", table);

                    let mut table = new_table(&["Failure", "Cause", "Risk", "Level"]);
                    for s in &report.backward_tracing.scenarios {
                        table.add_row(vec![
                            s.failure.clone(),
                            s.cause.clone(),
                            s.risk.to_string(),
                            s.risk_level.to_string(),
                        ]);
                    }
                    println!("{}", table);

                    let stats = &report.statistics;
                    println!(
                        "Entities: {}  Interfaces: {}  Energy flow: {}%  Decomposition risk: {}%  Avg loss: {}",
                        stats.total_entities,
                        stats.total_interfaces,
                        stats.energy_flow,
                        stats.decomposition_risk,
                        stats.average_energy_loss
                    );
                }
            }
        }
        Commands::Models => {
            let models = engine.list_models();
            match cli.format {
                OutputFormat::Json => print_json(&models)?,
                OutputFormat::Table => {
                    let mut table = new_table(&["Id", "Name", "Display Name", "Active", "Baseline", "Status"]);
                    for m in &models {
                        table.add_row(vec![
                            m.id.as_u64().to_string(),
                            m.model_name.clone(),
                            m.display_name.clone(),
                            m.is_active.to_string(),
                            m.is_baseline.to_string(),
                            format!("{:?}", m.validation_status).to_lowercase(),
                        ]);
                    }
                    println!("{}", table);
                }
            }
        }
    }

    if let Some(path) = &config.snapshot_path {
        if mutates || !path.exists() {
            store.to_snapshot().save(path)?;
            info!("Snapshot written to {}", path.display());
        }
    }

    Ok(())
}

fn scope(unit: Option<String>) -> Scope {
    unit.map(Scope::unit).unwrap_or_default()
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header.to_vec());
    table
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_networks(results: &[NetworkScore]) {
    let mut table = new_table(&[
        "Model", "Scope", "Analyzed", "Failed", "Avg Loss", "Low", "Moderate", "High", "Critical",
    ]);
    for n in results {
        let mut row = vec![
            n.model_name.clone(),
            n.unit_id.as_ref().map(|u| u.to_string()).unwrap_or_else(|| "all".to_string()),
            format!("{}/{}", n.analyzed_interfaces, n.total_interfaces),
            n.failed_interfaces.to_string(),
            format!("{:.3} ({}%)", n.average_energy_loss, n.average_energy_loss_percent),
        ];
        row.extend(RiskTier::ALL.iter().map(|t| n.risk_distribution.count(*t).to_string()));
        table.add_row(row);
    }
    println!("{}", table);
}
