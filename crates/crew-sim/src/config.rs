use crew_core::model::deck::{CARD_DECK_SIZE, TASK_DECK_SIZE};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_PLAYERS: usize = 5;
const DEFAULT_ITERATIONS: usize = 100_000;
const DEFAULT_TASKS: usize = 1;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration, usually loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimConfig {
    #[serde(default = "default_run_id")]
    pub run_id: String,
    #[serde(default = "default_players")]
    pub players: usize,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_tasks")]
    pub tasks: usize,
    #[serde(default)]
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            run_id: default_run_id(),
            players: DEFAULT_PLAYERS,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            tasks: DEFAULT_TASKS,
            outputs: OutputsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;

        if self.players == 0 {
            return Err(invalid("players", "at least one player is required"));
        }
        if self.players > CARD_DECK_SIZE {
            return Err(invalid(
                "players",
                format!("at most {CARD_DECK_SIZE} players can be dealt a card"),
            ));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations", "must be greater than zero"));
        }
        if self.tasks > TASK_DECK_SIZE {
            return Err(invalid(
                "tasks",
                format!("the task deck only holds {TASK_DECK_SIZE} cards"),
            ));
        }
        if self.outputs.summary_json.trim().is_empty() {
            return Err(invalid("outputs.summary_json", "path must not be empty"));
        }

        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (`{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            summary_json: resolve_template(&self.run_id, &self.outputs.summary_json),
        }
    }
}

fn default_run_id() -> String {
    "crew".to_string()
}

fn default_players() -> usize {
    DEFAULT_PLAYERS
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

fn default_tasks() -> usize {
    DEFAULT_TASKS
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default = "default_summary_json")]
    pub summary_json: String,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            summary_json: default_summary_json(),
        }
    }
}

fn default_summary_json() -> String {
    "out/{run_id}/summary.json".to_string()
}

/// Logging configuration; structured JSON logs are off unless requested.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(invalid("run_id", "run_id must not be empty"));
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(invalid(
            "run_id",
            "run_id may only contain alphanumeric characters, '.', '_' or '-'",
        ));
    }

    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::InvalidField {
        field: field.to_string(),
        message: message.into(),
    }
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub summary_json: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC_YAML: &str = r#"
run_id: "rockets_5p"
players: 5
iterations: 2000
seed: 42
tasks: 3
outputs:
  summary_json: "out/{run_id}/summary.json"
logging:
  enable_structured: true
  tracing_level: "debug"
"#;

    fn field_of(err: ValidationError) -> String {
        let ValidationError::InvalidField { field, .. } = err;
        field
    }

    #[test]
    fn loads_and_validates_basic_config() {
        let mut cfg: SimConfig = serde_yaml::from_str(BASIC_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.players, 5);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(
            cfg.resolved_outputs().summary_json,
            PathBuf::from("out/rockets_5p/summary.json")
        );
    }

    #[test]
    fn missing_blocks_fall_back_to_defaults() {
        let mut cfg: SimConfig = serde_yaml::from_str("players: 4\n").expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cfg.tasks, DEFAULT_TASKS);
        assert!(!cfg.logging.enable_structured);
        assert_eq!(
            cfg.resolved_outputs().summary_json,
            PathBuf::from("out/crew/summary.json")
        );
    }

    #[test]
    fn rejects_zero_players() {
        let yaml = BASIC_YAML.replace("players: 5", "players: 0");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(field_of(cfg.validate().expect_err("no players")), "players");
    }

    #[test]
    fn rejects_more_players_than_cards() {
        let yaml = BASIC_YAML.replace("players: 5", "players: 41");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(field_of(cfg.validate().expect_err("too many")), "players");
    }

    #[test]
    fn rejects_oversized_task_draw() {
        let yaml = BASIC_YAML.replace("tasks: 3", "tasks: 37");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(field_of(cfg.validate().expect_err("too many tasks")), "tasks");
    }

    #[test]
    fn rejects_invalid_run_id() {
        let yaml = BASIC_YAML.replace("rockets_5p", "rockets 5p");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(field_of(cfg.validate().expect_err("invalid run id")), "run_id");
    }

    #[test]
    fn blank_tracing_level_is_normalized() {
        let yaml = BASIC_YAML.replace("\"debug\"", "\"\"");
        let mut cfg: SimConfig = serde_yaml::from_str(&yaml).expect("parse");
        cfg.validate().expect("valid");
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = SimConfig::from_path("does/not/exist.yaml").expect_err("missing file");
        assert_eq!(err.path(), Path::new("does/not/exist.yaml"));
    }
}
