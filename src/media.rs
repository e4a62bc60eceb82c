// Media runtime: the one process-wide handle every player is created from.
// Acquire it once at startup, pass it to whoever needs players or media, and
// release it at shutdown.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, RgbaImage};
use tracing::{info, warn};

use crate::camera::CameraCapture;
use crate::embed::{NativeOutput, VideoOutput};
use crate::error::Error;
use crate::player::Player;
use crate::types::Viewport;

/// GIFs with a zero frame delay would spin; browsers use ~100 ms too.
pub const ZERO_DELAY_FALLBACK: Duration = Duration::from_millis(100);

/// Where media comes from: `camera:<index>` or a file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaLocation {
    Camera(u32),
    File(PathBuf),
}

impl MediaLocation {
    pub fn parse(location: &str) -> Result<Self, Error> {
        match location.strip_prefix("camera:") {
            Some(index) => index.trim().parse().map(Self::Camera).map_err(|_| Error::Media {
                location: location.to_owned(),
                reason: "camera index must be a number".into(),
            }),
            None => Ok(Self::File(PathBuf::from(location))),
        }
    }
}

/// One decoded frame and how long it stays on screen. A zero delay means
/// "hold forever" (still images).
#[derive(Clone, Debug)]
pub struct ClipFrame {
    pub image: RgbaImage,
    pub delay: Duration,
}

/// Fully decoded frames of a file.
#[derive(Clone, Debug)]
pub struct Clip {
    frames: Vec<ClipFrame>,
}

impl Clip {
    pub fn from_frames(frames: Vec<ClipFrame>) -> Result<Self, Error> {
        if frames.is_empty() {
            return Err(Error::Media { location: "<memory>".into(), reason: "clip has no frames".into() });
        }
        Ok(Self { frames })
    }

    /// Decode a file: animated GIFs frame by frame, anything else as a still.
    pub fn decode(path: &Path) -> Result<Self, Error> {
        let fail = |reason: String| Error::Media { location: path.display().to_string(), reason };

        let frames = if ImageFormat::from_path(path).ok() == Some(ImageFormat::Gif) {
            let file = File::open(path).map_err(|e| fail(e.to_string()))?;
            let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| fail(e.to_string()))?;
            decoder
                .into_frames()
                .collect_frames()
                .map_err(|e| fail(e.to_string()))?
                .into_iter()
                .map(|frame| {
                    let (numer, denom) = frame.delay().numer_denom_ms();
                    let delay = Duration::from_millis((numer / denom.max(1)) as u64);
                    let delay = if delay.is_zero() { ZERO_DELAY_FALLBACK } else { delay };
                    ClipFrame { image: frame.into_buffer(), delay }
                })
                .collect()
        } else {
            let image = image::open(path).map_err(|e| fail(e.to_string()))?.to_rgba8();
            vec![ClipFrame { image, delay: Duration::ZERO }]
        };

        Self::from_frames(frames).map_err(|_| fail("file has no frames".into()))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&ClipFrame> {
        self.frames.get(index)
    }

    pub fn duration(&self) -> Duration {
        self.frames.iter().map(|f| f.delay).sum()
    }
}

pub enum Media {
    Clip(Clip),
    Camera(CameraCapture),
}

impl std::fmt::Debug for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Media::Clip(clip) => write!(f, "Clip({} frames)", clip.len()),
            Media::Camera(cam) => write!(f, "Camera({:?})", cam.resolution()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RuntimeOptions {
    /// Resolution requested from cameras.
    pub camera_size: (u32, u32),
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self { camera_size: (640, 480) }
    }
}

pub struct MediaRuntime {
    output: NativeOutput,
    options: RuntimeOptions,
    players_created: usize,
    released: bool,
}

impl MediaRuntime {
    pub fn acquire(options: RuntimeOptions) -> Self {
        let output = NativeOutput::default();
        info!(platform = output.platform(), capture = ?output.capture_api(), "media runtime acquired");
        Self { output, options, players_created: 0, released: false }
    }

    pub fn output(&self) -> &NativeOutput {
        &self.output
    }

    /// A new player drawing into `area` of the window, not embedded yet.
    pub fn new_player(&mut self, area: Viewport) -> Player {
        self.players_created += 1;
        Player::new(self.players_created, area)
    }

    pub fn players_created(&self) -> usize {
        self.players_created
    }

    pub fn open(&self, location: &str) -> Result<Media, Error> {
        match MediaLocation::parse(location)? {
            MediaLocation::Camera(index) => {
                let (w, h) = self.options.camera_size;
                let cam = CameraCapture::open(index, w, h, self.output.capture_api())?;
                Ok(Media::Camera(cam))
            }
            MediaLocation::File(path) => {
                let clip = Clip::decode(&path)?;
                info!(path = %path.display(), frames = clip.len(), duration_ms = clip.duration().as_millis() as u64, "clip decoded");
                Ok(Media::Clip(clip))
            }
        }
    }

    /// One player per location, each in its own area, media already set.
    /// Stops at the first location that cannot be opened.
    pub fn open_players(&mut self, areas: &[Viewport], locations: &[String]) -> Result<Vec<Player>, Error> {
        let mut players = Vec::with_capacity(locations.len());
        for (&area, location) in areas.iter().zip(locations) {
            let media = self.open(location)?;
            let mut player = self.new_player(area);
            player.set_media(media);
            players.push(player);
        }
        Ok(players)
    }

    pub fn release(mut self) {
        self.released = true;
        info!(players = self.players_created, "media runtime released");
    }
}

impl Drop for MediaRuntime {
    fn drop(&mut self) {
        if !self.released {
            warn!(players = self.players_created, "media runtime dropped without release()");
        }
    }
}
