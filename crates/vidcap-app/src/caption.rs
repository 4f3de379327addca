use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("cannot read caption {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write caption {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a sidecar caption. A missing file is an empty caption.
pub fn load_caption(path: &Path) -> Result<String, CaptionError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(CaptionError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Overwrite the sidecar with `text`, trimmed at both ends.
pub fn save_caption(path: &Path, text: &str) -> Result<(), CaptionError> {
    std::fs::write(path, text.trim()).map_err(|source| CaptionError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Caption buffer bound to one sidecar file.
#[derive(Debug, Default)]
pub struct CaptionEditor {
    pub path: Option<PathBuf>,
    pub text: String,
}

impl CaptionEditor {
    /// Point the editor at `path` and load its contents.
    ///
    /// On a read error the buffer is left empty and unbound, so nothing
    /// gets written over a file we could not read.
    pub fn open(&mut self, path: PathBuf) -> Result<(), CaptionError> {
        self.text.clear();
        self.path = None;
        self.text = load_caption(&path)?;
        self.path = Some(path);
        Ok(())
    }

    /// Write the buffer to the bound sidecar, if any.
    pub fn flush(&self) -> Result<(), CaptionError> {
        match &self.path {
            Some(path) => save_caption(path, &self.text),
            None => Ok(()),
        }
    }

    pub fn close(&mut self) {
        self.path = None;
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sidecar_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_caption(&dir.path().join("clip.txt")).unwrap(), "");
    }

    #[test]
    fn save_trims_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.txt");
        std::fs::write(&path, "a much longer previous caption").unwrap();

        save_caption(&path, "  a cat on a sofa\n\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a cat on a sofa");
    }

    #[test]
    fn unicode_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.txt");
        save_caption(&path, "кошка на диване").unwrap();
        assert_eq!(load_caption(&path).unwrap(), "кошка на диване");
    }

    #[test]
    fn editor_flushes_to_bound_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.txt");
        std::fs::write(&path, "old").unwrap();

        let mut editor = CaptionEditor::default();
        editor.open(path.clone()).unwrap();
        assert_eq!(editor.text, "old");

        editor.text.push_str(" and new");
        editor.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old and new");
    }

    #[test]
    fn unbound_editor_writes_nothing() {
        let mut editor = CaptionEditor::default();
        editor.text = "orphan".into();
        assert!(editor.flush().is_ok());
        editor.close();
        assert!(editor.text.is_empty());
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("clip.txt");
        let err = save_caption(&path, "x").unwrap_err();
        assert!(matches!(err, CaptionError::Write { .. }));
    }
}
