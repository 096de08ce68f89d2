//! # Input Selection
//!
//! Discovers the CSV exports in a directory and asks a [`FileSelector`]
//! which one to analyse. The interactive terminal flow lives in
//! [`PromptSelector`]; [`PresetSelector`] answers from command-line flags so
//! runs can be scripted.

mod error;
mod prompt;

use std::path::{Path, PathBuf};

use log::debug;

pub use error::SelectionError;
pub use prompt::PromptSelector;

/// Picks one file out of a listing and confirms the choice.
pub trait FileSelector {
    /// Index into `files` of the chosen file.
    fn choose(&mut self, files: &[PathBuf]) -> Result<usize, SelectionError>;

    /// Whether to go ahead with `file`.
    fn confirm(&mut self, file: &Path) -> Result<bool, SelectionError>;
}

/// Regular files in `dir` with a `.csv` extension, sorted by name.
///
/// The extension match is case-sensitive. Fails with
/// [`SelectionError::NoCsvFiles`] when nothing matches.
pub fn list_csv_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, SelectionError> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(SelectionError::NoCsvFiles(dir.to_path_buf()));
    }

    files.sort();
    debug!("Found {} CSV files in {}", files.len(), dir.display());
    Ok(files)
}

/// Run the selector over `files` and return the confirmed path.
///
/// `Ok(None)` means the choice was declined.
pub fn select_file<S: FileSelector + ?Sized>(
    selector: &mut S,
    files: &[PathBuf],
) -> Result<Option<PathBuf>, SelectionError> {
    let index = selector.choose(files)?;
    let file = files.get(index).ok_or(SelectionError::IndexOutOfRange {
        index,
        len: files.len(),
    })?;

    if selector.confirm(file)? {
        Ok(Some(file.clone()))
    } else {
        Ok(None)
    }
}

/// Non-interactive selector answering from preset values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetSelector {
    index: usize,
    assume_yes: bool,
}

impl PresetSelector {
    /// Choose file `index`; confirm only when `assume_yes` is set.
    pub fn new(index: usize, assume_yes: bool) -> Self {
        Self { index, assume_yes }
    }
}

impl FileSelector for PresetSelector {
    fn choose(&mut self, files: &[PathBuf]) -> Result<usize, SelectionError> {
        if self.index >= files.len() {
            return Err(SelectionError::IndexOutOfRange {
                index: self.index,
                len: files.len(),
            });
        }
        Ok(self.index)
    }

    fn confirm(&mut self, _file: &Path) -> Result<bool, SelectionError> {
        Ok(self.assume_yes)
    }
}
