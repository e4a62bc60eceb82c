// Settings: an optional TOML file, then command-line flags on top.

use std::path::{Path, PathBuf};

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sketch::CanvasStyle;
use crate::types::Rgba;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Window size for the highlighter; ignored by multi-video-paint, whose
    /// window is sized from its players and canvas.
    pub window_width: usize,
    pub window_height: usize,
    /// Margin around the highlighter canvas.
    pub border: usize,
    /// Player size; unset means 400x400 above a canvas, 320x200 without one.
    pub player_width: Option<usize>,
    pub player_height: Option<usize>,
    pub canvas_height: usize,
    /// Upper bound on window refreshes per second.
    pub fps: usize,
    /// Requested camera resolution for `camera:<n>` media.
    pub camera_width: u32,
    pub camera_height: u32,
    pub debug_logging: bool,
    /// Canvas look; anything left out comes from the app's own preset.
    pub background: Option<Rgba>,
    pub brush_width: Option<f32>,
    pub opacity: Option<f32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 400,
            window_height: 400,
            border: 3,
            player_width: None,
            player_height: None,
            canvas_height: 400,
            fps: 60,
            camera_width: 640,
            camera_height: 480,
            debug_logging: false,
            background: None,
            brush_width: None,
            opacity: None,
        }
    }
}

impl Settings {
    /// Read a settings file. Missing keys take their defaults; an empty
    /// file is the same as no file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content).map_err(|e| match e {
            Error::Config(reason) => Error::Config(format!("{}: {reason}", path.display())),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<Self, Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    fn validate(&self) -> Result<(), Error> {
        if self.fps == 0 {
            return Err(Error::Config("fps must be at least 1".into()));
        }
        if let Some(opacity) = self.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(Error::Config(format!("opacity {opacity} is outside 0..=1")));
            }
        }
        if self.brush_width.is_some_and(|w| !w.is_finite() || w <= 0.0) {
            return Err(Error::Config("brush_width must be a positive number".into()));
        }
        Ok(())
    }

    /// Size of one video area in multi-video-paint.
    pub fn player_size(&self, with_canvas: bool) -> (usize, usize) {
        let (w, h) = if with_canvas { (400, 400) } else { (320, 200) };
        (self.player_width.unwrap_or(w), self.player_height.unwrap_or(h))
    }

    /// `preset` with whatever the settings override.
    pub fn canvas_style(&self, preset: CanvasStyle) -> CanvasStyle {
        CanvasStyle {
            background: self.background.unwrap_or(preset.background),
            brush_width: self.brush_width.unwrap_or(preset.brush_width),
            opacity: self.opacity.unwrap_or(preset.opacity),
        }
    }

    /// File first (when given), then the flags.
    pub fn resolve(flags: &CommonArgs) -> Result<Self, Error> {
        let mut settings = match &flags.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        flags.apply(&mut settings);
        settings.validate()?;
        Ok(settings)
    }
}

/// Flags shared by both binaries.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// TOML settings file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log at debug level (RUST_LOG can refine it).
    #[arg(short, long)]
    pub debug: bool,

    /// Stroke width in pixels.
    #[arg(long, value_name = "PX")]
    pub brush_width: Option<f32>,

    /// Stroke opacity, 0..1.
    #[arg(long, value_name = "ALPHA")]
    pub opacity: Option<f32>,

    /// Window refresh cap.
    #[arg(long)]
    pub fps: Option<usize>,
}

impl CommonArgs {
    fn apply(&self, settings: &mut Settings) {
        if self.debug {
            settings.debug_logging = true;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if self.brush_width.is_some() {
            settings.brush_width = self.brush_width;
        }
        if self.opacity.is_some() {
            settings.opacity = self.opacity;
        }
    }
}
