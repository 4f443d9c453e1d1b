use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("environment path is empty")]
    EmptyPath,
}

/// Background image drawn behind the scene. Loading the pixels is the asset
/// layer's job; the world only tracks which source is bound.
#[derive(Debug, Clone, Default)]
pub struct Environment2D {
    source: Option<PathBuf>,
}

impl Environment2D {
    pub fn load(&mut self, path: &Path) -> Result<(), EnvironmentError> {
        if path.as_os_str().is_empty() {
            return Err(EnvironmentError::EmptyPath);
        }
        if let Some(old) = self.source.replace(path.to_path_buf()) {
            tracing::debug!(old = %old.display(), "replacing environment");
        }
        tracing::info!(path = %path.display(), "environment loaded");
        Ok(())
    }

    /// Safe to call when nothing is loaded.
    pub fn destroy(&mut self) {
        if let Some(path) = self.source.take() {
            tracing::debug!(path = %path.display(), "environment destroyed");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
