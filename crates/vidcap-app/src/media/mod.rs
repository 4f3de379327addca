pub mod decoder;
pub mod scale;
pub mod types;
pub mod video;

use std::path::{Path, PathBuf};

use thiserror::Error;

use decoder::StillImage;
use types::{DecodedFrame, MediaInfo, MediaKind};
use video::VideoMeta;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported media type: {}", .0.display())]
    Unsupported(PathBuf),
    #[error("cannot read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
    #[error("media handle is closed")]
    Closed,
}

impl MediaError {
    pub fn unreadable(path: &Path, reason: impl Into<String>) -> Self {
        MediaError::Unreadable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Sequential frame reader behind a [`VideoStream`].
pub trait VideoDecoder {
    /// Fill `frame` with the next frame. `Ok(false)` means end of stream.
    fn read_frame(&mut self, frame: &mut DecodedFrame) -> Result<bool, MediaError>;
    /// Restart decoding at the first frame.
    fn rewind(&mut self) -> Result<(), MediaError>;
    /// Release the underlying resource. Must tolerate repeated calls.
    fn close(&mut self);
}

/// An open video. Reading past the last frame loops back to the first.
pub struct VideoStream {
    path: PathBuf,
    meta: VideoMeta,
    decoder: Option<Box<dyn VideoDecoder>>,
    frame: DecodedFrame,
    /// `frame` holds a frame decoded at open that has not been handed out yet.
    primed: bool,
}

impl VideoStream {
    pub fn new(path: PathBuf, meta: VideoMeta, decoder: Box<dyn VideoDecoder>) -> Self {
        Self {
            path,
            frame: DecodedFrame::blank(meta.width, meta.height),
            meta,
            decoder: Some(decoder),
            primed: false,
        }
    }

    /// Wrap `decoder` and decode the first frame up front, so a stream that
    /// probes fine but cannot be decoded fails here rather than on playback.
    pub fn open(path: PathBuf, meta: VideoMeta, decoder: Box<dyn VideoDecoder>) -> Result<Self, MediaError> {
        let mut stream = Self::new(path, meta, decoder);
        let decoder = stream.decoder.as_mut().ok_or(MediaError::Closed)?;
        if !decoder.read_frame(&mut stream.frame)? {
            return Err(MediaError::unreadable(&stream.path, "stream yielded no frames"));
        }
        stream.primed = true;
        Ok(stream)
    }

    pub fn meta(&self) -> &VideoMeta {
        &self.meta
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn next_frame(&mut self) -> Result<&DecodedFrame, MediaError> {
        let decoder = self.decoder.as_mut().ok_or(MediaError::Closed)?;
        if std::mem::take(&mut self.primed) {
            return Ok(&self.frame);
        }
        if !decoder.read_frame(&mut self.frame)? {
            decoder.rewind()?;
            if !decoder.read_frame(&mut self.frame)? {
                return Err(MediaError::unreadable(&self.path, "stream yielded no frames"));
            }
        }
        Ok(&self.frame)
    }

    pub fn close(&mut self) {
        if let Some(mut decoder) = self.decoder.take() {
            decoder.close();
            log::debug!("Closed video {}", self.path.display());
        }
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.decoder.is_none()
    }
}

impl Drop for VideoStream {
    fn drop(&mut self) {
        self.close();
    }
}

/// The media behind the current selection.
pub enum MediaHandle {
    Video(VideoStream),
    Image(StillImage),
}

impl MediaHandle {
    pub fn next_frame(&mut self) -> Result<&DecodedFrame, MediaError> {
        match self {
            MediaHandle::Video(v) => v.next_frame(),
            MediaHandle::Image(i) => i.next_frame(),
        }
    }

    pub fn close(&mut self) {
        match self {
            MediaHandle::Video(v) => v.close(),
            MediaHandle::Image(i) => i.close(),
        }
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        match self {
            MediaHandle::Video(v) => v.is_closed(),
            MediaHandle::Image(i) => i.is_closed(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            MediaHandle::Video(v) => v.path(),
            MediaHandle::Image(i) => i.path(),
        }
    }

    pub fn info(&self) -> MediaInfo {
        match self {
            MediaHandle::Video(v) => {
                let meta = v.meta();
                MediaInfo {
                    kind: MediaKind::Video,
                    width: meta.width,
                    height: meta.height,
                    frame_count: meta.frame_count,
                    fps: meta.fps,
                }
            }
            MediaHandle::Image(i) => {
                let (width, height) = i.dimensions();
                MediaInfo {
                    kind: MediaKind::Image,
                    width,
                    height,
                    frame_count: 1,
                    fps: 0.0,
                }
            }
        }
    }
}

/// Opens a path into a [`MediaHandle`].
pub trait MediaOpener {
    fn open(&self, path: &Path) -> Result<MediaHandle, MediaError>;
}

/// Opens files from disk: `image` for stills, ffmpeg for video.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileOpener;

impl MediaOpener for FileOpener {
    fn open(&self, path: &Path) -> Result<MediaHandle, MediaError> {
        open(path)
    }
}

/// Open a media file, picking the decode path by extension.
pub fn open(path: &Path) -> Result<MediaHandle, MediaError> {
    match MediaKind::from_path(path) {
        Some(MediaKind::Image) => decoder::load_still_image(path).map(MediaHandle::Image),
        Some(MediaKind::Video) => video::open_video(path).map(MediaHandle::Video),
        None => Err(MediaError::Unsupported(path.to_path_buf())),
    }
}

/// In-memory decoders for driving playback without ffmpeg.
#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Counters shared with a [`SyntheticDecoder`] after it is boxed.
    #[derive(Debug, Default, Clone)]
    pub struct DecoderProbe {
        pub reads: Rc<Cell<u32>>,
        pub rewinds: Rc<Cell<u32>>,
        pub closes: Rc<Cell<u32>>,
    }

    /// Yields `frames` frames whose first byte is the frame index, then ends.
    pub struct SyntheticDecoder {
        frames: u32,
        position: u32,
        probe: DecoderProbe,
    }

    impl VideoDecoder for SyntheticDecoder {
        fn read_frame(&mut self, frame: &mut DecodedFrame) -> Result<bool, MediaError> {
            if self.position >= self.frames {
                return Ok(false);
            }
            frame.data.fill(0);
            frame.data[0] = self.position as u8;
            self.position += 1;
            self.probe.reads.set(self.probe.reads.get() + 1);
            Ok(true)
        }

        fn rewind(&mut self) -> Result<(), MediaError> {
            self.position = 0;
            self.probe.rewinds.set(self.probe.rewinds.get() + 1);
            Ok(())
        }

        fn close(&mut self) {
            self.probe.closes.set(self.probe.closes.get() + 1);
        }
    }

    fn synthetic_parts(fps: f64, frames: u32) -> (Box<dyn VideoDecoder>, VideoMeta, DecoderProbe) {
        let probe = DecoderProbe::default();
        let decoder = SyntheticDecoder {
            frames,
            position: 0,
            probe: probe.clone(),
        };
        let meta = VideoMeta {
            width: 4,
            height: 2,
            fps,
            frame_count: u64::from(frames),
        };
        (Box::new(decoder), meta, probe)
    }

    /// A stream that has not read anything yet.
    pub fn synthetic_video(name: &str, fps: f64, frames: u32) -> (VideoStream, DecoderProbe) {
        let (decoder, meta, probe) = synthetic_parts(fps, frames);
        (VideoStream::new(PathBuf::from(name), meta, decoder), probe)
    }

    /// A stream opened the way files are, with its first frame already decoded.
    pub fn opened_video(
        name: &str,
        fps: f64,
        frames: u32,
    ) -> (Result<VideoStream, MediaError>, DecoderProbe) {
        let (decoder, meta, probe) = synthetic_parts(fps, frames);
        (VideoStream::open(PathBuf::from(name), meta, decoder), probe)
    }

    pub fn synthetic_image(name: &str, width: u32, height: u32) -> StillImage {
        StillImage::new(PathBuf::from(name), DecodedFrame::blank(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn video_loops_after_last_frame() {
        let (mut video, probe) = synthetic_video("clip.mp4", 30.0, 90);
        let first = video.next_frame().unwrap().clone();
        for _ in 1..90 {
            video.next_frame().unwrap();
        }
        // Call frame_count + 1 wraps to the first frame
        let wrapped = video.next_frame().unwrap().clone();
        assert_eq!(wrapped, first);
        assert_eq!(probe.rewinds.get(), 1);
    }

    #[test]
    fn empty_stream_is_unreadable() {
        let (mut video, _) = synthetic_video("empty.mp4", 30.0, 0);
        assert!(matches!(video.next_frame(), Err(MediaError::Unreadable { .. })));
    }

    #[test]
    fn open_serves_the_decoded_first_frame() {
        let (video, probe) = opened_video("clip.mp4", 30.0, 3);
        let mut video = video.unwrap();
        assert_eq!(probe.reads.get(), 1);

        let frames: Vec<u8> = (0..4).map(|_| video.next_frame().unwrap().data[0]).collect();
        assert_eq!(frames, vec![0, 1, 2, 0]);
        assert_eq!(probe.reads.get(), 4);
    }

    #[test]
    fn open_fails_when_nothing_decodes() {
        let (video, probe) = opened_video("badcodec.mp4", 30.0, 0);
        assert!(matches!(video, Err(MediaError::Unreadable { .. })));
        // The half-open decoder is released
        assert_eq!(probe.closes.get(), 1);
    }

    #[test]
    fn video_close_is_idempotent() {
        let (mut video, probe) = synthetic_video("clip.mp4", 30.0, 3);
        video.close();
        video.close();
        assert!(video.is_closed());
        assert_eq!(probe.closes.get(), 1);
        assert!(matches!(video.next_frame(), Err(MediaError::Closed)));
    }

    #[test]
    fn dropping_a_stream_closes_its_decoder() {
        let (video, probe) = synthetic_video("clip.mp4", 30.0, 3);
        drop(video);
        assert_eq!(probe.closes.get(), 1);
    }

    #[test]
    fn handle_close_covers_both_variants() {
        let (video, _) = synthetic_video("clip.mp4", 30.0, 3);
        let mut handles = [
            MediaHandle::Video(video),
            MediaHandle::Image(synthetic_image("photo.png", 2, 2)),
        ];
        for handle in &mut handles {
            assert!(!handle.is_closed());
            handle.close();
            handle.close();
            assert!(handle.is_closed());
        }
    }

    #[test]
    fn info_reports_metadata() {
        let (video, _) = synthetic_video("clip.mp4", 25.0, 50);
        let info = MediaHandle::Video(video).info();
        assert_eq!(info.kind, MediaKind::Video);
        assert_eq!((info.width, info.height), (4, 2));
        assert_eq!(info.frame_count, 50);

        let info = MediaHandle::Image(synthetic_image("photo.png", 7, 3)).info();
        assert_eq!(info.kind, MediaKind::Image);
        assert_eq!((info.width, info.height), (7, 3));
        assert_eq!(info.frame_count, 1);
    }

    #[test]
    fn open_rejects_unlisted_extension() {
        let err = open(Path::new("notes.txt")).err().unwrap();
        assert!(matches!(err, MediaError::Unsupported(_)));
    }

    #[test]
    fn open_missing_image_is_unreadable() {
        let err = open(Path::new("/nonexistent/photo.png")).err().unwrap();
        assert!(matches!(err, MediaError::Unreadable { .. }));
    }
}
