use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::media::types::MediaKind;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("not a folder: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("cannot list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The media files of one dropped folder, in display order.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub folder: Option<PathBuf>,
    pub files: Vec<PathBuf>,
    pub selected: Option<usize>,
}

impl Library {
    pub fn load(folder: &Path) -> Result<Self, LibraryError> {
        let files = scan_folder(folder)?;
        log::info!("Loaded {} media files from {}", files.len(), folder.display());
        Ok(Self {
            folder: Some(folder.to_path_buf()),
            files,
            selected: None,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.folder.is_some()
    }

    pub fn file_name(&self, index: usize) -> Option<&str> {
        self.files
            .get(index)
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }
}

/// List the media files directly inside `dir`, sorted by file name.
pub fn scan_folder(dir: &Path) -> Result<Vec<PathBuf>, LibraryError> {
    if !dir.is_dir() {
        return Err(LibraryError::NotADirectory(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|source| LibraryError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && MediaKind::from_path(path).is_some())
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Caption file for a media file: same base name, `.txt` extension.
pub fn sidecar_path(media: &Path) -> PathBuf {
    media.with_extension("txt")
}
