//! Run parameters and the paths derived from them.

use crate::error::RunError;
use crate::model::Route;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub source_folder: PathBuf,
    pub adjustment_file: PathBuf,
    /// Whether the adjustment file's first line names its columns.
    pub has_header: bool,
    /// Reserved for a post-processing hook; recorded but never run.
    pub action_name: Option<String>,
}

impl RunConfig {
    pub fn new(source_folder: impl Into<PathBuf>, adjustment_file: impl Into<PathBuf>) -> Self {
        Self {
            source_folder: source_folder.into(),
            adjustment_file: adjustment_file.into(),
            has_header: true,
            action_name: None,
        }
    }

    /// The source folder must exist before anything else happens.
    pub fn validate(&self) -> Result<(), RunError> {
        if !self.source_folder.is_dir() {
            return Err(RunError::SourceFolder(self.source_folder.clone()));
        }
        Ok(())
    }

    /// Last path component of the source folder, used to name the run log.
    pub fn folder_name(&self) -> String {
        folder_name(&self.source_folder)
    }

    pub fn route_folder(&self, route: Route) -> PathBuf {
        self.source_folder.join(route.folder_name())
    }

    pub fn log_path(&self) -> PathBuf {
        self.source_folder
            .join(format!("{}_Log.txt", self.folder_name()))
    }
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
