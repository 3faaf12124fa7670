//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::EntityKind;

/// Marker directory identifying a workspace root
const MARKER_DIR: &str = ".propdesk";

/// Directory holding the record collections
const DATA_DIR: &str = "data";

/// A propdesk workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory (parent of .propdesk/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            if current.join(MARKER_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(MARKER_DIR).exists() {
            return Err(WorkspaceError::AlreadyExists(root));
        }

        Self::init_force(&root)
    }

    /// Initialize even if .propdesk/ exists; existing collections are kept
    pub fn init_force(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let marker = root.join(MARKER_DIR);
        std::fs::create_dir_all(&marker).map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        std::fs::create_dir_all(root.join(DATA_DIR))
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let config_path = marker.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        Ok(Self { root })
    }

    fn default_config() -> &'static str {
        r#"# propdesk workspace configuration

# Name recorded as the author of imported records (default: git user.name)
# author: ""

# Maximum data rows accepted by one import
# max_rows: 5000

# Cell splitting: naive (split on every comma) or rfc4180 (quoted fields)
# csv_mode: naive

# Valid records shown in the review preview
# preview_rows: 5

# Sales agents that receive imported leads round-robin
# agents:
#   - Priya
#   - Arjun
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .propdesk configuration directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    /// Path of the YAML file holding a collection
    pub fn collection_path(&self, kind: EntityKind) -> PathBuf {
        self.root
            .join(DATA_DIR)
            .join(format!("{}.yaml", kind.plural()))
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a propdesk workspace (searched from {searched_from:?}). Run 'propdesk init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("propdesk workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::init(tmp.path()).unwrap();

        assert!(workspace.config_dir().is_dir());
        assert!(workspace.config_dir().join("config.yaml").exists());
        assert!(workspace.root().join("data").is_dir());
    }

    #[test]
    fn test_workspace_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let err = Workspace::init(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[test]
    fn test_workspace_discover_from_subdir() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("imports/2024");
        std::fs::create_dir_all(&subdir).unwrap();

        let workspace = Workspace::discover_from(&subdir).unwrap();
        assert_eq!(
            workspace.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_workspace_discover_fails_without_marker() {
        let tmp = tempdir().unwrap();
        let err = Workspace::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }

    #[test]
    fn test_collection_paths() {
        let tmp = tempdir().unwrap();
        let workspace = Workspace::init(tmp.path()).unwrap();
        assert!(workspace
            .collection_path(EntityKind::Partner)
            .ends_with("data/partners.yaml"));
    }
}
