//! Exporting the summary as a plain-text artifact.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed file name of exported summaries
pub const EXPORT_FILE_NAME: &str = "summary.txt";
pub const EXPORT_CONTENT_TYPE: &str = "text/plain";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A downloadable file produced from the current summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub content: Vec<u8>,
}

impl ExportArtifact {
    /// Wrap summary text verbatim
    pub fn summary(text: &str) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            content_type: EXPORT_CONTENT_TYPE,
            content: text.as_bytes().to_vec(),
        }
    }
}

/// Saves artifacts into a local directory
#[derive(Debug, Clone)]
pub struct FileExporter {
    dir: PathBuf,
}

impl FileExporter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Write the artifact, replacing any earlier export, and return its path
    pub fn save(&self, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(artifact.file_name);
        std::fs::write(&path, &artifact.content).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), bytes = artifact.content.len(), "exported summary");
        Ok(path)
    }
}
