use std::path::{Path, PathBuf};

use super::{PlaybackDriver, PlaybackState, RenderSurface, Scheduler, TickOutcome, TickToken};
use crate::media::types::MediaInfo;
use crate::media::{MediaError, MediaOpener};

/// What the preview is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub path: PathBuf,
    pub info: MediaInfo,
}

/// Owns the single active driver and swaps it on every selection.
#[derive(Default)]
pub struct Session {
    driver: Option<PlaybackDriver>,
    selection: Option<Selection>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop whatever is playing, open `path`, and start a new driver on it.
    ///
    /// The old driver is released before the new file is opened. On failure
    /// nothing plays and the previous selection (and its last frame) stays up.
    pub fn select(
        &mut self,
        path: &Path,
        opener: &dyn MediaOpener,
        scheduler: &mut dyn Scheduler,
    ) -> Result<MediaInfo, MediaError> {
        self.stop();

        let media = opener.open(path)?;
        let info = media.info();
        self.driver = Some(PlaybackDriver::start(media, scheduler));
        self.selection = Some(Selection {
            path: path.to_path_buf(),
            info,
        });
        Ok(info)
    }

    /// Dispatch one due tick to the active driver.
    pub fn fire(
        &mut self,
        token: &TickToken,
        surface: &mut dyn RenderSurface,
        scheduler: &mut dyn Scheduler,
    ) -> Result<TickOutcome, MediaError> {
        if !token.is_live() {
            return Ok(TickOutcome::Stale);
        }
        match self.driver.as_mut() {
            Some(driver) => driver.tick(token, surface, scheduler),
            None => Ok(TickOutcome::Stale),
        }
    }

    pub fn stop(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.stop();
        }
    }

    /// Playback state of the open video, if any.
    pub fn playback_state(&self) -> Option<PlaybackState> {
        self.driver.as_ref().and_then(PlaybackDriver::state)
    }

    /// Whether `path` is selected and its driver still holds open media.
    ///
    /// False after a failed open or a decode error, so selecting the same
    /// file again retries it.
    pub fn is_showing(&self, path: &Path) -> bool {
        self.selection.as_ref().is_some_and(|s| s.path == path)
            && self.driver.as_ref().is_some_and(|d| d.info().is_some())
    }

    pub fn info(&self) -> Option<MediaInfo> {
        self.selection.as_ref().map(|s| s.info)
    }

    /// Forget the selection entirely (a new folder was loaded).
    pub fn clear(&mut self) {
        self.stop();
        self.selection = None;
    }
}
