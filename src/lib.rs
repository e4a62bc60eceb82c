//! Freehand highlighter canvas and a multi-video player that shares it.
//!
//! The drawing core is small: [`stroke::Canvas`] records strokes,
//! [`render::render`] turns them into [`render::DrawCommand`]s and
//! [`raster`] paints those into a window framebuffer. Everything else is
//! the window, the players and the glue between them.

pub mod camera;
pub mod config;
pub mod dispatch;
pub mod draw;
pub mod embed;
pub mod error;
pub mod input;
pub mod layout;
pub mod logging;
pub mod media;
pub mod player;
pub mod raster;
pub mod render;
pub mod sketch;
pub mod stroke;
pub mod studio;
pub mod types;

pub use error::{Error, Result};
