use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::Level;
use ymerge_io::OutputFormat;

use crate::cli::Cli;

/// Verbosity of the stderr log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Settings for one run.
///
/// Built from defaults, then an optional TOML file, then command-line flags,
/// each layer overriding the previous one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub log_level: LogLevel,
    pub report_conflicts: bool,
}

impl CliConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Layer the `--config` file (if any) and the flags in `cli`.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_flags(cli);
        Ok(config)
    }

    fn apply_flags(&mut self, cli: &Cli) {
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if cli.quiet {
            self.log_level = LogLevel::Error;
        }
        if cli.report_conflicts {
            self.report_conflicts = true;
        }
    }
}
