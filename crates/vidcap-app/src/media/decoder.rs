use std::path::{Path, PathBuf};

use super::MediaError;
use super::types::DecodedFrame;

/// A still image decoded once at open. Every frame request returns the same buffer.
pub struct StillImage {
    path: PathBuf,
    frame: DecodedFrame,
    closed: bool,
}

impl StillImage {
    pub fn new(path: PathBuf, frame: DecodedFrame) -> Self {
        Self {
            path,
            frame,
            closed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.frame.width, self.frame.height)
    }

    pub fn next_frame(&mut self) -> Result<&DecodedFrame, MediaError> {
        if self.closed {
            return Err(MediaError::Closed);
        }
        Ok(&self.frame)
    }

    /// Drop the pixel buffer. Safe to call repeatedly.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.frame.data = Vec::new();
        }
    }

    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Load a static image (PNG, JPEG) via the `image` crate.
pub fn load_still_image(path: &Path) -> Result<StillImage, MediaError> {
    let img = image::open(path)
        .map_err(|e| MediaError::unreadable(path, format!("Failed to open image: {e}")))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(MediaError::unreadable(path, "image has no pixels"));
    }

    log::info!("Opened image {}: {}x{}", path.display(), w, h);

    Ok(StillImage::new(
        path.to_path_buf(),
        DecodedFrame {
            data: rgba.into_raw(),
            width: w,
            height: h,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, w: u32, h: u32) {
        let img = image::RgbaImage::from_fn(w, h, |x, y| {
            image::Rgba([x as u8, y as u8, 0x80, 0xFF])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn loads_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_png(&path, 5, 3);

        let mut still = load_still_image(&path).unwrap();
        assert_eq!(still.dimensions(), (5, 3));
        let frame = still.next_frame().unwrap();
        assert_eq!(frame.data.len(), 5 * 3 * 4);
        // Pixel (4, 2)
        let idx = ((2 * 5 + 4) * 4) as usize;
        assert_eq!(&frame.data[idx..idx + 4], &[4, 2, 0x80, 0xFF]);
    }

    #[test]
    fn repeated_frames_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        write_png(&path, 2, 2);

        let mut still = load_still_image(&path).unwrap();
        let first = still.next_frame().unwrap().clone();
        for _ in 0..3 {
            assert_eq!(still.next_frame().unwrap(), &first);
        }
    }

    #[test]
    fn corrupt_image_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_still_image(&path).err().unwrap();
        assert!(matches!(err, MediaError::Unreadable { .. }));
    }

    #[test]
    fn close_is_idempotent() {
        let mut still = StillImage::new(PathBuf::from("x.png"), DecodedFrame::blank(2, 2));
        still.close();
        still.close();
        assert!(still.is_closed());
        assert!(matches!(still.next_frame(), Err(MediaError::Closed)));
    }
}
