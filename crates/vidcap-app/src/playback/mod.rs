//! Single-threaded playback: a driver renders one frame per tick and re-arms
//! itself through a [`Scheduler`]. Cancellation is cooperative; a queued tick
//! carries its driver's flag and does nothing once that flag is cleared.

pub mod driver;
pub mod scheduler;
pub mod session;

use std::cell::Cell;
use std::rc::Rc;

use crate::media::types::DecodedFrame;

pub use driver::{PlaybackDriver, PlaybackState, TickOutcome};
pub use scheduler::{Scheduler, TickQueue};
pub use session::Session;

/// Where frames end up. Implemented by the preview canvas.
pub trait RenderSurface {
    /// Current drawable size in physical pixels. Zero before first layout.
    fn size(&self) -> (u32, u32);
    /// Show `frame` scaled to `fitted`, centered in the surface.
    fn draw(&mut self, frame: &DecodedFrame, fitted: (u32, u32));
}

/// Shared "still playing" flag of one driver. Cancelling is permanent.
#[derive(Debug, Clone)]
pub struct PlaybackHandle {
    playing: Rc<Cell<bool>>,
}

impl PlaybackHandle {
    pub(crate) fn new() -> Self {
        Self {
            playing: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }

    pub fn cancel(&self) {
        self.playing.set(false);
    }

    pub(crate) fn token(&self) -> TickToken {
        TickToken {
            handle: self.clone(),
        }
    }
}

/// A queued tick. Only fires into the driver that issued it.
#[derive(Debug, Clone)]
pub struct TickToken {
    handle: PlaybackHandle,
}

impl TickToken {
    pub fn is_live(&self) -> bool {
        self.handle.is_playing()
    }

    pub(crate) fn belongs_to(&self, handle: &PlaybackHandle) -> bool {
        Rc::ptr_eq(&self.handle.playing, &handle.playing)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Surface that records every draw as (first pixel byte, fitted size).
    pub struct RecordingSurface {
        pub size: (u32, u32),
        pub draws: Vec<(u8, (u32, u32))>,
    }

    impl RecordingSurface {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                size: (width, height),
                draws: Vec::new(),
            }
        }
    }

    impl RenderSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn draw(&mut self, frame: &DecodedFrame, fitted: (u32, u32)) {
            self.draws.push((frame.data.first().copied().unwrap_or(0), fitted));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_visible_through_tokens() {
        let handle = PlaybackHandle::new();
        let token = handle.token();
        assert!(token.is_live());
        handle.cancel();
        assert!(!token.is_live());
        assert!(!handle.is_playing());
    }

    #[test]
    fn tokens_only_belong_to_their_driver() {
        let a = PlaybackHandle::new();
        let b = PlaybackHandle::new();
        assert!(a.token().belongs_to(&a));
        assert!(!a.token().belongs_to(&b));
    }
}
