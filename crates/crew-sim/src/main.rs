use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crew_core::AppInfo;
use crew_sim::config::{ResolvedOutputs, SimConfig};
use crew_sim::logging::init_logging;
use crew_sim::runner::{RocketRunner, run_scripted_mission};

/// Deal and mission simulator for The Crew rules engine.
#[derive(Debug, Parser)]
#[command(name = "crew-sim", author, version, about = "Seeded deal statistics and scripted missions")]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Overrides {
    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID", global = true)]
    run_id: Option<String>,

    /// Override the number of seated players.
    #[arg(long, value_name = "COUNT", global = true)]
    players: Option<usize>,

    /// Override the RNG seed for shuffling.
    #[arg(long, value_name = "SEED", global = true)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Deal many hands and report how Rocket cards are distributed.
    Rockets {
        /// Override the number of deals.
        #[arg(long, value_name = "COUNT")]
        iterations: Option<usize>,

        /// Hide the progress bar.
        #[arg(long)]
        no_progress: bool,
    },
    /// Play one mission where every seat takes its first valid choice.
    Mission {
        /// Override the number of task cards drawn.
        #[arg(long, value_name = "COUNT")]
        tasks: Option<usize>,

        /// Print the mission report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };

    if let Some(run_id) = cli.overrides.run_id {
        config.run_id = run_id;
    }
    if let Some(players) = cli.overrides.players {
        config.players = players;
    }
    if let Some(seed) = cli.overrides.seed {
        config.seed = Some(seed);
    }
    match &cli.command {
        Command::Rockets {
            iterations: Some(iterations),
            ..
        } => config.iterations = *iterations,
        Command::Mission {
            tasks: Some(tasks), ..
        } => config.tasks = *tasks,
        _ => {}
    }

    config.validate().context("validating configuration")?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    if let Some(guard) = logging_guard.as_ref() {
        eprintln!("Telemetry log: {}", guard.telemetry_path.display());
    }

    match cli.command {
        Command::Rockets { no_progress, .. } => {
            println!(
                "{} {}: dealing {} hands to {} player{}",
                AppInfo::name(),
                AppInfo::version(),
                config.iterations,
                config.players,
                if config.players == 1 { "" } else { "s" }
            );
            let summary = RocketRunner::new(config, outputs)
                .with_progress(!no_progress)
                .run()?;
            print!("{}", summary.report.summary.render_text());
            println!("Seed: {}", summary.report.seed);
            println!("Summary: {}", summary.summary_path.display());
        }
        Command::Mission { json, .. } => {
            let report = run_scripted_mission(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }
            println!("{}", report.table);
            if report.commander.is_none() {
                let undealt: Vec<String> = report.undealt.iter().map(ToString::to_string).collect();
                println!("No Commander: 4 Rocket left undealt in [{}]", undealt.join(", "));
            }
            for assignment in &report.assignments {
                println!("{} takes task {}", assignment.seat, assignment.card);
            }
            for (index, trick) in report.tricks.iter().enumerate() {
                println!(
                    "Trick {}: {} wins with {}",
                    index + 1,
                    trick.winner,
                    trick.card
                );
                for card in &trick.completed {
                    println!("  task {card} completed");
                }
                for card in &trick.failed {
                    println!("  task {card} failed");
                }
            }
            println!("Mission {:?} (seed {})", report.status, report.seed);
        }
    }

    Ok(())
}
