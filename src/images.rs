//! Image asset lookup for catalog entries

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Image bytes ready to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Resolves image filenames against a fixed directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read an image by filename
    ///
    /// Returns `None` when the file is missing or unreadable, or when the
    /// filename tries to leave the image directory. Callers fall back to a
    /// text-only message in that case.
    pub fn load(&self, file_name: &str) -> Option<Photo> {
        let relative = Path::new(file_name);
        if relative.is_absolute() || relative.components().count() != 1 {
            debug!(file_name = %file_name, "Rejected image path outside image directory");
            return None;
        }

        let path = self.dir.join(relative);
        if !path.is_file() {
            debug!(path = %path.display(), "Image not found, sending text only");
            return None;
        }

        match fs::read(&path) {
            Ok(bytes) => Some(Photo {
                file_name: file_name.to_string(),
                bytes,
            }),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to read image, sending text only");
                None
            }
        }
    }
}
