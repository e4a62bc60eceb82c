// One video player: media, a playback state machine and the frame on screen.
// Visual: the player's viewport shows the clip (or camera) scaled to fit,
// black while stopped.

use std::time::Duration;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::{debug, info};

use crate::embed::{VideoOutput, VideoSurface, WindowHandle};
use crate::error::Error;
use crate::media::Media;
use crate::types::{FrameBuffer, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    Ended,
}

/// Toolbar actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Play,
    Pause,
    Stop,
}

#[derive(Debug)]
pub struct Player {
    id: usize,
    media: Option<Media>,
    state: PlaybackState,
    surface: VideoSurface,
    index: usize,      // current clip frame
    elapsed: Duration, // time spent on the current frame
    current: FrameBuffer,
}

impl Player {
    /// Players come from `MediaRuntime::new_player`.
    pub(crate) fn new(id: usize, area: Viewport) -> Self {
        Self {
            id,
            media: None,
            state: PlaybackState::Stopped,
            surface: VideoSurface::new(area),
            index: 0,
            elapsed: Duration::ZERO,
            current: FrameBuffer::new(area.width, area.height),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    pub fn area(&self) -> Viewport {
        self.surface.area()
    }

    pub fn is_embedded(&self) -> bool {
        self.surface.is_embedded()
    }

    /// The frame to show, already sized to the player's area.
    pub fn frame(&self) -> &FrameBuffer {
        &self.current
    }

    /// Clip frame index being shown (0 for cameras).
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn embed(&mut self, output: &impl VideoOutput, handle: &WindowHandle) -> bool {
        output.embed(&mut self.surface, handle)
    }

    /// Replace the media; the player goes back to `Stopped`.
    pub fn set_media(&mut self, media: Media) {
        debug!(player = self.id, ?media, "media set");
        self.media = Some(media);
        self.stop();
    }

    pub fn play(&mut self) -> Result<(), Error> {
        if self.media.is_none() {
            return Err(Error::NoMedia);
        }
        if matches!(self.state, PlaybackState::Stopped | PlaybackState::Ended) {
            self.rewind();
        }
        self.set_state(PlaybackState::Playing);
        self.refresh()
    }

    /// Toggle between playing and paused; other states are left alone.
    pub fn pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.set_state(PlaybackState::Paused),
            PlaybackState::Paused => self.set_state(PlaybackState::Playing),
            _ => {}
        }
    }

    pub fn stop(&mut self) {
        self.rewind();
        self.current.fill(0);
        self.set_state(PlaybackState::Stopped);
    }

    pub fn apply(&mut self, control: Control) -> Result<(), Error> {
        match control {
            Control::Play => self.play(),
            Control::Pause => {
                self.pause();
                Ok(())
            }
            Control::Stop => {
                self.stop();
                Ok(())
            }
        }
    }

    /// Move playback forward by `dt`. Returns true when the visible frame changed.
    pub fn advance(&mut self, dt: Duration) -> Result<bool, Error> {
        if self.state != PlaybackState::Playing {
            return Ok(false);
        }
        let Some(media) = &self.media else {
            return Ok(false);
        };
        match media {
            Media::Camera(_) => {
                self.refresh()?;
                Ok(true)
            }
            Media::Clip(clip) => {
                let before = self.index;
                let mut ended = false;
                self.elapsed += dt;
                while let Some(frame) = clip.frame(self.index) {
                    if frame.delay.is_zero() || self.elapsed < frame.delay {
                        break; // still image, or this frame is not done yet
                    }
                    if self.index + 1 == clip.len() {
                        ended = true;
                        break;
                    }
                    self.elapsed -= frame.delay;
                    self.index += 1;
                }
                if ended {
                    self.set_state(PlaybackState::Ended);
                }
                if self.index != before {
                    self.refresh()?;
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    fn rewind(&mut self) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            info!(player = self.id, from = ?self.state, to = ?state, "playback state");
            self.state = state;
        }
    }

    // Re-render `current` from the media at the current position.
    fn refresh(&mut self) -> Result<(), Error> {
        let area = self.surface.area();
        match &mut self.media {
            Some(Media::Clip(clip)) => {
                if let Some(frame) = clip.frame(self.index) {
                    self.current = scale_to_fit(&frame.image, area.width, area.height);
                }
            }
            Some(Media::Camera(cam)) => {
                let fb = cam.next_frame()?;
                self.current = scale_framebuffer(&fb, area.width, area.height);
            }
            None => {}
        }
        Ok(())
    }
}

/// Letterbox `image` into a black `width` x `height` frame, keeping its aspect.
/// Visual: the clip fills the player as much as it can without stretching.
pub fn scale_to_fit(image: &RgbaImage, width: usize, height: usize) -> FrameBuffer {
    let mut out = FrameBuffer::new(width, height);
    let (iw, ih) = image.dimensions();
    if iw == 0 || ih == 0 || width == 0 || height == 0 {
        return out;
    }
    let scale = (width as f32 / iw as f32).min(height as f32 / ih as f32);
    let sw = ((iw as f32 * scale).round() as u32).clamp(1, width as u32);
    let sh = ((ih as f32 * scale).round() as u32).clamp(1, height as u32);
    let scaled = if (sw, sh) == (iw, ih) {
        image.clone()
    } else {
        imageops::resize(image, sw, sh, FilterType::Triangle)
    };

    // Transparent GIF pixels end up over black.
    let ox = (width - sw as usize) / 2;
    let oy = (height - sh as usize) / 2;
    for (x, y, p) in scaled.enumerate_pixels() {
        let a = p[3] as u32;
        let ch = |c: u8| (c as u32 * a + 127) / 255;
        out.pixels[(oy + y as usize) * width + ox + x as usize] = (ch(p[0]) << 16) | (ch(p[1]) << 8) | ch(p[2]);
    }
    out
}

fn scale_framebuffer(fb: &FrameBuffer, width: usize, height: usize) -> FrameBuffer {
    if fb.width == width && fb.height == height {
        return fb.clone();
    }
    let image = RgbaImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let p = fb.pixels[y as usize * fb.width + x as usize];
        image::Rgba([(p >> 16) as u8, (p >> 8) as u8, p as u8, 255])
    });
    scale_to_fit(&image, width, height)
}
