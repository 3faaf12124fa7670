//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::workspace::Workspace;
use crate::import::parser::CsvMode;
use crate::import::session::{ImportOptions, DEFAULT_MAX_ROWS};

/// Valid records shown in the review preview unless configured
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// propdesk configuration with layered hierarchy
///
/// Every key is optional so layers can be merged; use the accessor
/// methods for effective values.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name recorded on imported records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Row cap for one import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<usize>,

    /// Cell splitting mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_mode: Option<CsvMode>,

    /// Valid records shown during review
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_rows: Option<usize>,

    /// Round-robin pool for imported leads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(workspace: Option<&Workspace>) -> Self {
        let mut config = Config::default();

        // Global user config (~/.config/propdesk/config.yaml)
        if let Some(global) = Self::global_config_path().and_then(|p| Self::read_layer(&p)) {
            config.merge(global);
        }

        // Workspace config (.propdesk/config.yaml)
        if let Some(ws) = workspace {
            if let Some(local) = Self::read_layer(&ws.config_dir().join("config.yaml")) {
                config.merge(local);
            }
        }

        config.merge(Self::from_env());
        config
    }

    /// Read one YAML layer; unreadable or malformed files are skipped
    fn read_layer(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config, ignoring");
                return None;
            }
        };
        let only_comments = contents
            .lines()
            .map(str::trim)
            .all(|line| line.is_empty() || line.starts_with('#'));
        if only_comments {
            return None;
        }
        match serde_yml::from_str::<Config>(&contents) {
            Ok(layer) => {
                debug!(path = %path.display(), "loaded config layer");
                Some(layer)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid config, ignoring");
                None
            }
        }
    }

    /// Overrides from `PROPDESK_*` environment variables
    fn from_env() -> Config {
        let mut config = Config::default();
        if let Ok(author) = std::env::var("PROPDESK_AUTHOR") {
            config.author = Some(author);
        }
        if let Ok(raw) = std::env::var("PROPDESK_MAX_ROWS") {
            match raw.trim().parse() {
                Ok(n) => config.max_rows = Some(n),
                Err(_) => warn!(value = %raw, "PROPDESK_MAX_ROWS is not a number, ignoring"),
            }
        }
        if let Ok(raw) = std::env::var("PROPDESK_CSV_MODE") {
            match raw.parse() {
                Ok(mode) => config.csv_mode = Some(mode),
                Err(_) => warn!(value = %raw, "PROPDESK_CSV_MODE is not naive or rfc4180, ignoring"),
            }
        }
        config
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "propdesk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.author.is_some() {
            self.author = other.author;
        }
        if other.max_rows.is_some() {
            self.max_rows = other.max_rows;
        }
        if other.csv_mode.is_some() {
            self.csv_mode = other.csv_mode;
        }
        if other.preview_rows.is_some() {
            self.preview_rows = other.preview_rows;
        }
        if other.agents.is_some() {
            self.agents = other.agents;
        }
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows.unwrap_or(DEFAULT_MAX_ROWS)
    }

    pub fn csv_mode(&self) -> CsvMode {
        self.csv_mode.unwrap_or_default()
    }

    pub fn preview_rows(&self) -> usize {
        self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS)
    }

    /// Configured agents with blank names removed
    pub fn agents(&self) -> Vec<String> {
        self.agents
            .iter()
            .flatten()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            csv_mode: self.csv_mode(),
            max_rows: self.max_rows(),
        }
    }

    /// Get the author name, falling back to git config or username
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        if let Ok(output) = std::process::Command::new("git")
            .args(["config", "user.name"])
            .output()
        {
            if output.status.success() {
                let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !name.is_empty() {
                    return name;
                }
            }
        }

        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_rows(), 5000);
        assert_eq!(config.csv_mode(), CsvMode::Naive);
        assert_eq!(config.preview_rows(), 5);
        assert!(config.agents().is_empty());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            max_rows: Some(100),
            agents: Some(vec!["Priya".into()]),
            ..Default::default()
        };
        base.merge(Config {
            max_rows: Some(10),
            csv_mode: Some(CsvMode::Rfc4180),
            ..Default::default()
        });
        assert_eq!(base.max_rows(), 10);
        assert_eq!(base.csv_mode(), CsvMode::Rfc4180);
        assert_eq!(base.agents(), vec!["Priya".to_string()]);
    }

    #[test]
    fn test_workspace_layer() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        std::fs::write(
            ws.config_dir().join("config.yaml"),
            "max_rows: 25\ncsv_mode: rfc4180\nagents:\n  - Priya\n  - ' '\n  - Arjun\n",
        )
        .unwrap();

        let layer = Config::read_layer(&ws.config_dir().join("config.yaml")).unwrap();
        assert_eq!(layer.max_rows(), 25);
        assert_eq!(layer.csv_mode(), CsvMode::Rfc4180);
        assert_eq!(layer.agents(), vec!["Priya".to_string(), "Arjun".to_string()]);
    }

    #[test]
    fn test_commented_template_is_empty_layer() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();
        assert!(Config::read_layer(&ws.config_dir().join("config.yaml")).is_none());
    }

    #[test]
    fn test_malformed_layer_ignored() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "max_rows: [not, a, number]\n").unwrap();
        assert!(Config::read_layer(&path).is_none());
    }

    #[test]
    fn test_import_options() {
        let config = Config {
            max_rows: Some(3),
            ..Default::default()
        };
        let options = config.import_options();
        assert_eq!(options.max_rows, 3);
        assert_eq!(options.csv_mode, CsvMode::Naive);
    }
}
