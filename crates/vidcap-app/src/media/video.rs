//! Video decode via ffmpeg subprocess.
//!
//! - `ffprobe` probes metadata (dimensions, fps, frame count) synchronously at open
//! - `ffmpeg -f rawvideo -pix_fmt rgba` streams frames over a pipe, one `read_exact` per frame
//! - Rewinding kills the child and spawns a fresh one at position zero

use std::ffi::OsString;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::OnceLock;

use super::types::DecodedFrame;
use super::{MediaError, VideoDecoder, VideoStream};

/// Check if ffmpeg/ffprobe are available on the system. Cached per process.
pub fn ffmpeg_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();
    *AVAILABLE.get_or_init(|| {
        ["ffprobe", "ffmpeg"].iter().all(|tool| {
            Command::new(tool)
                .arg("-version")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map(|s| s.success())
                .unwrap_or(false)
        })
    })
}

/// Video metadata from ffprobe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMeta {
    pub width: u32,
    pub height: u32,
    /// Zero when the container does not report a usable rate.
    pub fps: f64,
    pub frame_count: u64,
}

/// Probe video metadata using ffprobe.
pub fn probe_video(path: &Path) -> Result<VideoMeta, MediaError> {
    let output = Command::new("ffprobe")
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| MediaError::unreadable(path, format!("ffprobe failed to execute: {e}")))?;

    if !output.status.success() {
        return Err(MediaError::unreadable(path, "ffprobe returned non-zero exit code"));
    }

    parse_probe_output(&output.stdout).map_err(|reason| MediaError::unreadable(path, reason))
}

/// Pull the first video stream's metadata out of `ffprobe -print_format json`.
fn parse_probe_output(stdout: &[u8]) -> Result<VideoMeta, String> {
    let json: serde_json::Value = serde_json::from_slice(stdout)
        .map_err(|e| format!("Failed to parse ffprobe JSON: {e}"))?;

    let streams = json["streams"]
        .as_array()
        .ok_or("No streams in ffprobe output")?;

    let video_stream = streams
        .iter()
        .find(|s| s["codec_type"].as_str() == Some("video"))
        .ok_or("No video stream found")?;

    let width = video_stream["width"].as_u64().ok_or("Missing width")? as u32;
    let height = video_stream["height"].as_u64().ok_or("Missing height")? as u32;
    if width == 0 || height == 0 {
        return Err(format!("Invalid dimensions {width}x{height}"));
    }

    let fps = video_stream["r_frame_rate"]
        .as_str()
        .map_or(0.0, parse_frame_rate);

    let duration_secs = json["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .or_else(|| {
            video_stream["duration"]
                .as_str()
                .and_then(|s| s.parse::<f64>().ok())
        })
        .unwrap_or(0.0);

    let frame_count = video_stream["nb_frames"]
        .as_str()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| (duration_secs * fps).round().max(0.0) as u64);

    Ok(VideoMeta {
        width,
        height,
        fps,
        frame_count,
    })
}

/// Parse ffprobe's `num/den` rate. Anything unusable (including `0/0`) is 0.
fn parse_frame_rate(rate: &str) -> f64 {
    let fps = if let Some((num, den)) = rate.split_once('/') {
        let n: f64 = num.trim().parse().unwrap_or(0.0);
        let d: f64 = den.trim().parse().unwrap_or(0.0);
        if d > 0.0 { n / d } else { 0.0 }
    } else {
        rate.trim().parse().unwrap_or(0.0)
    };
    if fps.is_finite() && fps > 0.0 { fps } else { 0.0 }
}

/// Probe `path` and start streaming it.
pub fn open_video(path: &Path) -> Result<VideoStream, MediaError> {
    if !ffmpeg_available() {
        return Err(MediaError::unreadable(path, "ffmpeg/ffprobe not found on PATH"));
    }

    let meta = probe_video(path)?;
    let decoder = FfmpegDecoder::spawn(path, meta.width, meta.height)?;
    let stream = VideoStream::open(path.to_path_buf(), meta, Box::new(decoder))?;

    log::info!(
        "Opened video {}: {}x{}, {:.3} fps, {} frames",
        path.display(),
        meta.width,
        meta.height,
        meta.fps,
        meta.frame_count,
    );

    Ok(stream)
}

/// ffmpeg arguments that stream `path` as raw RGBA at the probed size.
///
/// Autorotation is off: ffprobe reports coded dimensions, and a rotated
/// phone clip would otherwise come out transposed and get squashed by `-s`.
fn decode_args(path: &Path, width: u32, height: u32) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-v", "quiet", "-noautorotate", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(path.as_os_str().to_os_string());
    args.extend(
        [
            "-an",
            "-f", "rawvideo",
            "-pix_fmt", "rgba",
            "-s", &format!("{width}x{height}"),
            "pipe:1",
        ]
        .into_iter()
        .map(OsString::from),
    );
    args
}

/// Streams raw RGBA frames out of an ffmpeg child process.
pub struct FfmpegDecoder {
    path: PathBuf,
    width: u32,
    height: u32,
    child: Option<Child>,
    stdout: Option<ChildStdout>,
}

impl FfmpegDecoder {
    pub fn spawn(path: &Path, width: u32, height: u32) -> Result<Self, MediaError> {
        let mut decoder = Self {
            path: path.to_path_buf(),
            width,
            height,
            child: None,
            stdout: None,
        };
        decoder.start()?;
        Ok(decoder)
    }

    fn start(&mut self) -> Result<(), MediaError> {
        let mut child = Command::new("ffmpeg")
            .args(decode_args(&self.path, self.width, self.height))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MediaError::unreadable(&self.path, format!("Failed to spawn ffmpeg: {e}")))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| MediaError::unreadable(&self.path, "ffmpeg: no stdout pipe"))?;

        self.stdout = Some(stdout);
        self.child = Some(child);
        Ok(())
    }

    fn reap(&mut self) {
        self.stdout = None;
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl VideoDecoder for FfmpegDecoder {
    fn read_frame(&mut self, frame: &mut DecodedFrame) -> Result<bool, MediaError> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Err(MediaError::Closed);
        };
        match stdout.read_exact(&mut frame.data) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                // A partial trailing frame is treated as end of stream too
                self.reap();
                Ok(false)
            }
            Err(e) => Err(MediaError::unreadable(&self.path, format!("ffmpeg read failed: {e}"))),
        }
    }

    fn rewind(&mut self) -> Result<(), MediaError> {
        self.reap();
        self.start()
    }

    fn close(&mut self) {
        self.reap();
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        self.reap();
    }
}
