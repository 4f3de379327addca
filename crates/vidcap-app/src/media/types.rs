use std::path::Path;

/// A decoded frame ready for texture upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub data: Vec<u8>, // RGBA8
    pub width: u32,
    pub height: u32,
}

impl DecodedFrame {
    /// Zero-filled frame with room for `width * height` RGBA pixels.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Which decode path a file takes. Decided by extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// Metadata snapshot of the open media, for labels and window sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    pub kind: MediaKind,
    pub width: u32,
    pub height: u32,
    pub frame_count: u64,
    pub fps: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_extension() {
        assert_eq!(MediaKind::from_path(Path::new("a/clip.mp4")), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_path(Path::new("clip.MOV")), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_path(Path::new("clip.avi")), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_path(Path::new("photo.JPG")), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_path(Path::new("photo.png")), Some(MediaKind::Image));
    }

    #[test]
    fn rejects_unlisted_extensions() {
        assert_eq!(MediaKind::from_path(Path::new("notes.txt")), None);
        assert_eq!(MediaKind::from_path(Path::new("photo.jpeg")), None);
        assert_eq!(MediaKind::from_path(Path::new("anim.gif")), None);
        assert_eq!(MediaKind::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn blank_frame_is_sized_for_rgba() {
        let frame = DecodedFrame::blank(4, 3);
        assert_eq!(frame.byte_len(), 48);
        assert!(frame.data.iter().all(|&b| b == 0));
    }
}
