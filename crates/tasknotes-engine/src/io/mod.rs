use crate::editing::{Document, EditError};
use crate::model::Node;
use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Note not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
    #[error("Malformed note {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Not a note document: {0}")]
    Document(#[from] EditError),
}

/// Read a note's document tree
pub fn read_tree(relative_path: &RelativePath, notes_root: &Path) -> Result<Node, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let json = fs::read_to_string(&absolute_path)?;
    serde_json::from_str(&json).map_err(|source| IoError::Parse {
        path: absolute_path,
        source,
    })
}

/// Read a note and wrap it in a `Document` with the default edit pipeline
pub fn read_note(relative_path: &RelativePath, notes_root: &Path) -> Result<Document, IoError> {
    Ok(Document::new(read_tree(relative_path, notes_root)?)?)
}

/// Write a note's document tree
pub fn write_tree(
    relative_path: &RelativePath,
    notes_root: &Path,
    tree: &Node,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    // Create parent directories if they don't exist
    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(tree).map_err(|source| IoError::Parse {
        path: absolute_path.clone(),
        source,
    })?;
    fs::write(&absolute_path, json)?;
    Ok(())
}

pub fn write_note(
    relative_path: &RelativePath,
    notes_root: &Path,
    note: &Document,
) -> Result<(), IoError> {
    write_tree(relative_path, notes_root, note.tree())
}

/// Scan for note files (`*.json`) in the notes directory
pub fn scan_notes(notes_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_notes_dir(notes_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "json"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
