// Core value types shared by the recorder, the renderer and the window.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Pixel at (x, y), or None outside the frame.
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Copy `src` into this frame with its top-left corner at `dst`.
    /// Visual: the source image appears at that spot; parts outside are cut off.
    pub fn blit(&mut self, src: &FrameBuffer, dst: Viewport) {
        let w = src.width.min(dst.width).min(self.width.saturating_sub(dst.x));
        let h = src.height.min(dst.height).min(self.height.saturating_sub(dst.y));
        for row in 0..h {
            let from = row * src.width;
            let to = (dst.y + row) * self.width + dst.x;
            self.pixels[to..to + w].copy_from_slice(&src.pixels[from..from + w]);
        }
    }

    /// Fill a rectangle (clipped to the frame) with one color.
    pub fn fill_rect(&mut self, rect: Viewport, color: u32) {
        let x1 = (rect.x + rect.width).min(self.width);
        let y1 = (rect.y + rect.height).min(self.height);
        for y in rect.y.min(y1)..y1 {
            let row = y * self.width;
            self.pixels[row + rect.x.min(x1)..row + x1].fill(color);
        }
    }
}

/// A rectangular region of the window, in window pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && py >= self.y as f32
            && px < (self.x + self.width) as f32
            && py < (self.y + self.height) as f32
    }

    /// Window coordinates -> coordinates relative to this region's top-left.
    pub fn to_local(&self, px: f32, py: f32) -> Point {
        Point::new(px - self.x as f32, py - self.y as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when the whole region lies inside a `width` x `height` window.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x + self.width <= width && self.y + self.height <= height
    }
}

/// A recorded pointer sample in canvas pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Color with straight (non-premultiplied) alpha, every component in 0.0..=1.0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pack the color channels as 0x00RRGGBB, ignoring alpha.
    pub fn to_pixel(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    /// Source-over of this color onto an opaque 0x00RRGGBB pixel.
    /// Visual: alpha 1.0 replaces the pixel, 0.5 mixes half of each.
    pub fn over(self, dst: u32) -> u32 {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |src: f32, shift: u32| {
            let d = ((dst >> shift) & 0xFF) as f32 / 255.0;
            let v = src.clamp(0.0, 1.0) * a + d * (1.0 - a);
            ((v * 255.0).round() as u32).min(255) << shift
        };
        mix(self.r, 16) | mix(self.g, 8) | mix(self.b, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_packing_matches_minifb_layout() {
        assert_eq!(Rgba::new(1.0, 0.0, 0.0, 1.0).to_pixel(), 0x00FF_0000);
        assert_eq!(Rgba::WHITE.to_pixel(), 0x00FF_FFFF);
        assert_eq!(Rgba::BLACK.to_pixel(), 0);
    }

    #[test]
    fn half_alpha_mixes_evenly() {
        let red = Rgba::new(1.0, 0.0, 0.0, 0.5);
        assert_eq!(red.over(0x0000_0000), 0x0080_0000);
        assert_eq!(Rgba::WHITE.over(0x0012_3456), 0x00FF_FFFF);
    }

    #[test]
    fn blit_clips_at_the_frame_edge() {
        let mut dst = FrameBuffer::new(4, 4);
        let mut src = FrameBuffer::new(3, 3);
        src.fill(0x00AB_CDEF);
        dst.blit(&src, Viewport::new(2, 2, 3, 3));
        assert_eq!(dst.get(3, 3), Some(0x00AB_CDEF));
        assert_eq!(dst.get(1, 1), Some(0));
        assert_eq!(dst.pixels.iter().filter(|&&p| p != 0).count(), 4);
    }

    #[test]
    fn viewport_hit_testing_and_local_coords() {
        let vp = Viewport::new(10, 20, 100, 50);
        assert!(vp.contains(10.0, 20.0));
        assert!(!vp.contains(110.0, 20.0));
        assert_eq!(vp.to_local(15.0, 25.0), Point::new(5.0, 5.0));
        assert!(vp.fits_within(110, 70));
        assert!(!vp.fits_within(109, 70));
    }
}
