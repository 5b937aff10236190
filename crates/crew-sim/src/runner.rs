use std::fs;
use std::path::{Path, PathBuf};

use crew_core::{
    Card, FirstChoice, Game, GameError, MissionStatus, Seat, Selector, TaskAssignment,
    TrickResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analytics::{RocketCollector, RocketSummary};
use crate::config::{ResolvedOutputs, SimConfig};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode summary: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct RocketReport {
    pub run_id: String,
    pub seed: u64,
    #[serde(flatten)]
    pub summary: RocketSummary,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: RocketReport,
    pub summary_path: PathBuf,
}

/// Deals fresh hands over and over and tallies where the Rockets land.
pub struct RocketRunner {
    config: SimConfig,
    outputs: ResolvedOutputs,
    show_progress: bool,
}

impl RocketRunner {
    pub fn new(config: SimConfig, outputs: ResolvedOutputs) -> Self {
        Self {
            config,
            outputs,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run(&self) -> Result<RunSummary, RunError> {
        let mut game = match self.config.seed {
            Some(seed) => Game::with_seed(self.config.players, seed),
            None => Game::new(self.config.players),
        };
        let mut collector = RocketCollector::new(self.config.players);
        let progress = self.progress_bar();

        info!(
            run_id = %self.config.run_id,
            players = self.config.players,
            iterations = self.config.iterations,
            seed = game.seed(),
            "rocket distribution run started"
        );
        for _ in 0..self.config.iterations {
            game.new_card_deck();
            game.deal_cards()?;
            collector.record_deal(game.players());
            progress.inc(1);
        }
        progress.finish_and_clear();

        let report = RocketReport {
            run_id: self.config.run_id.clone(),
            seed: game.seed(),
            summary: collector.summary(),
        };
        let summary_path = self.outputs.summary_json.clone();
        write_json(&summary_path, &report)?;
        info!(path = %summary_path.display(), deals = collector.deals(), "summary written");

        Ok(RunSummary {
            report,
            summary_path,
        })
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new(self.config.iterations as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{bar:40} {pos}/{len} deals [{elapsed_precise}]")
        {
            bar.set_style(style);
        }
        bar
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RunError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RunError::Io {
            context: format!("creating output directory {}", parent.display()),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| RunError::Io {
        context: format!("writing {}", path.display()),
        source,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct MissionReport {
    pub seed: u64,
    pub commander: Option<Seat>,
    /// Cards left in the deck after dealing.
    pub undealt: Vec<Card>,
    pub table: String,
    pub assignments: Vec<TaskAssignment>,
    pub tricks: Vec<TrickResult>,
    pub status: MissionStatus,
}

/// Sets up one mission, hands out its tasks and plays tricks until the
/// mission is decided or the hands run out. When the 4 Rocket is left in the
/// undealt remainder nobody can hand out tasks, so a mission with tasks fails
/// before the first trick.
pub fn run_mission<S: Selector + ?Sized>(
    config: &SimConfig,
    selector: &mut S,
) -> Result<MissionReport, RunError> {
    let mut game = match config.seed {
        Some(seed) => Game::with_seed(config.players, seed),
        None => Game::new(config.players),
    };
    game.new_mission()?;
    game.deal_task_cards(config.tasks)?;
    let table = game.to_string();
    let undealt = game.deck().cards().to_vec();

    if game.commander().is_none() && !game.task_cards().is_empty() {
        warn!(seed = game.seed(), "4 Rocket left undealt, mission has no commander");
        return Ok(MissionReport {
            seed: game.seed(),
            commander: None,
            undealt,
            table,
            assignments: Vec::new(),
            tricks: Vec::new(),
            status: MissionStatus::Failed,
        });
    }

    let assignments = game.task_selection_rotation(selector)?;

    let mut tricks = Vec::new();
    while game.mission_status() == MissionStatus::InProgress
        && game.players().iter().any(|p| !p.hand().is_empty())
    {
        let result = game.play_trick(selector)?;
        debug!(winner = %result.winner, card = %result.card, "trick won");
        tricks.push(result);
    }

    let status = game.mission_status();
    info!(seed = game.seed(), ?status, tricks = tricks.len(), "mission finished");
    Ok(MissionReport {
        seed: game.seed(),
        commander: game.commander(),
        undealt,
        table,
        assignments,
        tricks,
        status,
    })
}

/// Mission run where every seat takes its first offered choice.
pub fn run_scripted_mission(config: &SimConfig) -> Result<MissionReport, RunError> {
    run_mission(config, &mut FirstChoice)
}
