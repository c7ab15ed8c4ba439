use crate::error::{Error, Result};
use crate::source::SourceHost;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension used for source files
pub const SOURCE_EXTENSION: &str = "txt";

/// Sources backed by text files in a single directory.
#[derive(Debug, Clone)]
pub struct FileSourceHost {
    base_dir: PathBuf,
}

impl FileSourceHost {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create an empty source, keeping existing text if it already exists.
    pub fn create_source(&self, name: &str) -> Result<PathBuf> {
        let path = self
            .source_path(name)
            .ok_or_else(|| Error::SourceNotFound(name.to_string()))?;
        fs::create_dir_all(&self.base_dir)?;

        if !path.exists() {
            fs::write(&path, "")?;
            debug!("Created source {} at {}", name, path.display());
        }
        Ok(path)
    }

    /// Path of the file backing `name`, or `None` if the name is not a plain file name.
    pub fn source_path(&self, name: &str) -> Option<PathBuf> {
        if !is_valid_source_name(name) {
            return None;
        }
        Some(self.base_dir.join(format!("{}.{}", name, SOURCE_EXTENSION)))
    }
}

impl SourceHost for FileSourceHost {
    fn list_sources(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn set_text(&self, name: &str, text: &str) -> Result<()> {
        let path = self
            .source_path(name)
            .filter(|p| p.is_file())
            .ok_or_else(|| Error::SourceNotFound(name.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    fn has_source(&self, name: &str) -> Result<bool> {
        Ok(self.source_path(name).is_some_and(|p| p.is_file()))
    }
}

fn is_valid_source_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}
