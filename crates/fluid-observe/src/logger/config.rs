use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{format::LoggerFormat, level::LoggerLevel};

/// Logger configuration. Every field falls back to its default when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format.
    pub format: LoggerFormat,
    /// Filter expression (e.g. `"info"`, `"fluid_core=debug,info"`).
    pub level: LoggerLevel,
    /// Include the event target (module path) in output.
    pub with_targets: bool,
    /// Colour text output; only honoured when stderr is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    /// `use_color` and stderr (where text logs go) is a terminal.
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stderr().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = LoggerConfig::default();

        assert_eq!(cfg.format, LoggerFormat::Text);
        assert_eq!(cfg.level.as_str(), "info");
        assert!(cfg.with_targets);
        assert!(cfg.use_color);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: LoggerConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(cfg.format, LoggerFormat::default());
        assert_eq!(cfg.level.as_str(), "info");
        assert!(cfg.with_targets);
    }

    #[test]
    fn partial_object_overrides_given_fields() {
        let json = r#"{"format": "json", "level": "fluid_core=debug,warn", "use_color": false}"#;
        let cfg: LoggerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level.as_str(), "fluid_core=debug,warn");
        assert!(!cfg.use_color);
        assert!(cfg.with_targets);
        assert!(!cfg.should_use_color());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let json = r#"{"level": "fluid_core=loud"}"#;
        assert!(serde_json::from_str::<LoggerConfig>(json).is_err());
    }
}
