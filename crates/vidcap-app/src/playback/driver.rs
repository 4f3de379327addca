use std::time::Duration;

use super::{PlaybackHandle, RenderSurface, Scheduler, TickToken};
use crate::media::scale::fit;
use crate::media::types::MediaInfo;
use crate::media::{MediaError, MediaHandle};

/// Tick interval when the stream does not report a frame rate.
pub const FALLBACK_INTERVAL: Duration = Duration::from_millis(30);

/// Delay between video ticks: whole milliseconds of `1000 / fps`, at least 1.
pub fn frame_interval(fps: f64) -> Duration {
    if fps > 0.0 && fps.is_finite() {
        let ms = (1000.0 / fps) as u64;
        Duration::from_millis(ms.max(1))
    } else {
        FALLBACK_INTERVAL
    }
}

/// Playback snapshot of an open video. Stills have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub target_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Token from a stopped or replaced driver; nothing happened.
    Stale,
    /// Surface has no size yet; re-queued without consuming a frame.
    Deferred,
    /// Video frame drawn and the next tick queued.
    Rendered,
    /// Still image drawn; no further ticks.
    Finished,
}

/// Renders the open media into a surface, one frame per tick.
///
/// Stopped drivers hold no media. Dropping a driver stops it.
pub struct PlaybackDriver {
    media: Option<MediaHandle>,
    handle: PlaybackHandle,
}

impl PlaybackDriver {
    /// Take ownership of `media` and queue the first tick immediately.
    pub fn start(media: MediaHandle, scheduler: &mut dyn Scheduler) -> Self {
        let handle = PlaybackHandle::new();
        scheduler.schedule(Duration::ZERO, handle.token());
        log::debug!("Playback started: {}", media.path().display());
        Self {
            media: Some(media),
            handle,
        }
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.handle.is_playing()
    }

    pub fn info(&self) -> Option<MediaInfo> {
        self.media.as_ref().map(MediaHandle::info)
    }

    pub fn state(&self) -> Option<PlaybackState> {
        match self.media.as_ref()? {
            MediaHandle::Video(v) => Some(PlaybackState {
                is_playing: self.handle.is_playing(),
                target_interval: frame_interval(v.meta().fps),
            }),
            MediaHandle::Image(_) => None,
        }
    }

    /// Run one tick: fetch, fit, draw, then re-arm for video.
    ///
    /// A decode error stops the driver; whatever was last drawn stays up.
    pub fn tick(
        &mut self,
        token: &TickToken,
        surface: &mut dyn RenderSurface,
        scheduler: &mut dyn Scheduler,
    ) -> Result<TickOutcome, MediaError> {
        if !token.belongs_to(&self.handle) || !self.handle.is_playing() {
            return Ok(TickOutcome::Stale);
        }
        let Some(media) = self.media.as_mut() else {
            return Ok(TickOutcome::Stale);
        };

        let interval = match media {
            MediaHandle::Video(v) => frame_interval(v.meta().fps),
            MediaHandle::Image(_) => FALLBACK_INTERVAL,
        };

        let (box_w, box_h) = surface.size();
        if box_w == 0 || box_h == 0 {
            scheduler.schedule(interval, self.handle.token());
            return Ok(TickOutcome::Deferred);
        }

        let drawn = match media.next_frame() {
            Ok(frame) => {
                let fitted = fit(frame.width, frame.height, box_w, box_h);
                surface.draw(frame, fitted);
                Ok(())
            }
            Err(e) => Err(e),
        };
        if let Err(e) = drawn {
            self.stop();
            return Err(e);
        }

        match media {
            MediaHandle::Video(_) => {
                scheduler.schedule(interval, self.handle.token());
                Ok(TickOutcome::Rendered)
            }
            MediaHandle::Image(_) => {
                // Nothing left to schedule; the image stays open until stop().
                self.handle.cancel();
                Ok(TickOutcome::Finished)
            }
        }
    }

    /// Clear the playing flag, then release the media. Idempotent.
    pub fn stop(&mut self) {
        self.handle.cancel();
        if let Some(mut media) = self.media.take() {
            media.close();
            log::debug!("Playback stopped: {}", media.path().display());
        }
    }
}

impl Drop for PlaybackDriver {
    fn drop(&mut self) {
        self.stop();
    }
}
