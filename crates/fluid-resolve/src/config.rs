use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

use fluid_core::ResolveConfig;
use fluid_observe::LoggerConfig;

use crate::cli::Cli;

/// Config file layout; every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub logger: LoggerConfig,
    pub resolve: ResolveConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Apply command-line overrides.
    pub fn merge_cli(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(level) = &cli.log_level {
            self.logger.level = level.parse()?;
        }
        if let Some(format) = &cli.log_format {
            self.logger.format = format.parse()?;
        }
        if cli.verify_worker_selector {
            self.resolve = self.resolve.with_verify_worker_selector(true);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fluid_observe::LoggerFormat;

    #[test]
    fn sections_are_optional() {
        let cfg: FileConfig =
            serde_json::from_str(r#"{"resolve": {"verify_worker_selector": true}}"#).unwrap();
        assert!(cfg.resolve.verify_worker_selector);
        assert_eq!(cfg.logger.level.as_str(), "info");
    }

    #[test]
    fn cli_overrides_file() {
        let cfg: FileConfig = serde_json::from_str(r#"{"logger": {"format": "text"}}"#).unwrap();
        let cli = Cli::try_parse_from([
            "fluid-resolve",
            "--kind",
            "jindo",
            "--name",
            "hbase",
            "--kube",
            "--log-format",
            "json",
            "--log-level",
            "debug",
            "--verify-worker-selector",
        ])
        .unwrap();

        let merged = cfg.merge_cli(&cli).unwrap();
        assert_eq!(merged.logger.format, LoggerFormat::Json);
        assert_eq!(merged.logger.level.as_str(), "debug");
        assert!(merged.resolve.verify_worker_selector);
    }

    #[test]
    fn bad_override_is_an_error() {
        let cli = Cli::try_parse_from([
            "fluid-resolve",
            "--kind",
            "jindo",
            "--name",
            "hbase",
            "--kube",
            "--log-format",
            "xml",
        ])
        .unwrap();

        assert!(FileConfig::default().merge_cli(&cli).is_err());
    }
}
