// Software backend for DrawCommand lists.
// Visual outcomes:
// - `Clear` paints the whole canvas region in the background color.
// - Each `Stroke` lays down a thick line with rounded ends and corners.
// - A translucent stroke tints what is under it once, even where the path
//   crosses itself; a second stroke on top tints again (highlighter look).

use crate::render::{DrawCommand, LineCap};
use crate::types::{FrameBuffer, Point, Rgba, Viewport};

/// Graphics state carried between commands, like a 2D context.
///
/// Joins are always round: coverage is a union of per-segment capsules, so
/// `SetLineJoin` is accepted and ignored.
pub struct Raster<'a> {
    fb: &'a mut FrameBuffer,
    region: Viewport, // where the canvas lives inside `fb`
    color: Rgba,
    width: f32,
    cap: LineCap,
    path: Vec<Point>,
    coverage: Vec<bool>, // scratch, reused across strokes
}

impl<'a> Raster<'a> {
    /// Draw into `region` of `fb`. Command coordinates are relative to the
    /// region's top-left corner; anything outside it is clipped.
    pub fn new(fb: &'a mut FrameBuffer, region: Viewport) -> Self {
        // Never let the region poke out of the framebuffer.
        let width = region.width.min(fb.width.saturating_sub(region.x));
        let height = region.height.min(fb.height.saturating_sub(region.y));
        Self {
            fb,
            region: Viewport::new(region.x, region.y, width, height),
            color: Rgba::BLACK,
            width: 2.0,
            cap: LineCap::Butt,
            path: Vec::new(),
            coverage: Vec::new(),
        }
    }

    pub fn execute(&mut self, commands: &[DrawCommand]) {
        for cmd in commands {
            self.apply(cmd);
        }
    }

    pub fn apply(&mut self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Clear(color) => {
                let pixel = color.over(0);
                self.fb.fill_rect(self.region, pixel);
            }
            DrawCommand::NewPath => self.path.clear(),
            DrawCommand::SetColor(color) => self.color = *color,
            DrawCommand::SetLineWidth(width) => self.width = *width,
            DrawCommand::SetLineCap(cap) => self.cap = *cap,
            DrawCommand::SetLineJoin(_) => {}
            DrawCommand::LineTo(p) => self.path.push(*p),
            DrawCommand::Stroke => {
                self.stroke_path();
                self.path.clear(); // stroking consumes the path
            }
        }
    }

    fn stroke_path(&mut self) {
        // A single point only moves the pen: nothing to paint.
        if self.path.len() < 2 || self.width <= 0.0 || self.region.is_empty() {
            return;
        }
        let r = self.width / 2.0;
        let (w, h) = (self.region.width as i32, self.region.height as i32);

        /* 1) Bounding box of the whole path, grown by the pen radius (plus a
              square-cap extension), clipped to the canvas region. */
        let grow = r * std::f32::consts::SQRT_2 + 1.0;
        let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for p in &self.path {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        let bx0 = ((x0 - grow).floor() as i32).clamp(0, w);
        let by0 = ((y0 - grow).floor() as i32).clamp(0, h);
        let bx1 = ((x1 + grow).ceil() as i32).clamp(0, w);
        let by1 = ((y1 + grow).ceil() as i32).clamp(0, h);
        if bx1 <= bx0 || by1 <= by0 {
            return; // entirely off-canvas
        }
        let bw = (bx1 - bx0) as usize;
        let bh = (by1 - by0) as usize;

        /* 2) Union coverage of every segment (a capsule per segment gives
              round joins for free). Only the path ends get the cap style. */
        self.coverage.clear();
        self.coverage.resize(bw * bh, false);
        let last = self.path.len() - 2;
        for (i, seg) in self.path.windows(2).enumerate() {
            let (a, b) = (seg[0], seg[1]);
            let start_cap = if i == 0 { Some(self.cap) } else { None };
            let end_cap = if i == last { Some(self.cap) } else { None };

            let sx0 = ((a.x.min(b.x) - grow).floor() as i32).max(bx0);
            let sy0 = ((a.y.min(b.y) - grow).floor() as i32).max(by0);
            let sx1 = ((a.x.max(b.x) + grow).ceil() as i32).min(bx1);
            let sy1 = ((a.y.max(b.y) + grow).ceil() as i32).min(by1);
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let idx = (y - by0) as usize * bw + (x - bx0) as usize;
                    if self.coverage[idx] {
                        continue;
                    }
                    // Sample at the pixel center.
                    let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                    if segment_covers(p, a, b, r, start_cap, end_cap) {
                        self.coverage[idx] = true;
                    }
                }
            }
        }

        /* 3) Composite the covered pixels once with the stroke color. */
        let color = self.color;
        for row in 0..bh {
            let fy = self.region.y + by0 as usize + row;
            for col in 0..bw {
                if !self.coverage[row * bw + col] {
                    continue;
                }
                let fx = self.region.x + bx0 as usize + col;
                let idx = fy * self.fb.width + fx;
                self.fb.pixels[idx] = color.over(self.fb.pixels[idx]);
            }
        }
    }
}

/// Is `p` inside the pen footprint of segment a->b with radius `r`?
/// `None` for a cap means the end is a joint with another segment (round).
fn segment_covers(
    p: Point,
    a: Point,
    b: Point,
    r: f32,
    start_cap: Option<LineCap>,
    end_cap: Option<LineCap>,
) -> bool {
    let (vx, vy) = (b.x - a.x, b.y - a.y);
    let (wx, wy) = (p.x - a.x, p.y - a.y);
    let len_sq = vx * vx + vy * vy;
    let r_sq = r * r;

    if len_sq <= f32::EPSILON {
        // Zero-length segment: only round ends leave a dot.
        let round = |cap: Option<LineCap>| matches!(cap, None | Some(LineCap::Round));
        return round(start_cap) && round(end_cap) && wx * wx + wy * wy <= r_sq;
    }

    let len = len_sq.sqrt();
    let t = (wx * vx + wy * vy) / len_sq;
    let perp = (wx * vy - wy * vx).abs() / len;

    let end_ok = |cap: Option<LineCap>, overshoot: f32, dist_sq: f32| match cap {
        None | Some(LineCap::Round) => dist_sq <= r_sq,
        Some(LineCap::Butt) => false,
        Some(LineCap::Square) => overshoot <= r && perp <= r,
    };

    if t < 0.0 {
        end_ok(start_cap, -t * len, wx * wx + wy * wy)
    } else if t > 1.0 {
        let (ex, ey) = (p.x - b.x, p.y - b.y);
        end_ok(end_cap, (t - 1.0) * len, ex * ex + ey * ey)
    } else {
        perp <= r
    }
}

/// Render a command list into `region` of `fb` in one go.
pub fn paint(fb: &mut FrameBuffer, region: Viewport, commands: &[DrawCommand]) {
    Raster::new(fb, region).execute(commands);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LineJoin, render};
    use crate::stroke::Stroke;

    fn stroke(width: f32, color: Rgba, points: &[(f32, f32)]) -> Stroke {
        let mut s = Stroke::new(width, color);
        s.points = points.iter().copied().map(Point::from).collect();
        s
    }

    fn canvas(w: usize, h: usize) -> (FrameBuffer, Viewport) {
        (FrameBuffer::new(w, h), Viewport::new(0, 0, w, h))
    }

    #[test]
    fn clear_fills_only_the_region() {
        let mut fb = FrameBuffer::new(10, 10);
        paint(&mut fb, Viewport::new(2, 2, 3, 3), &[DrawCommand::Clear(Rgba::WHITE)]);
        assert_eq!(fb.pixels.iter().filter(|&&p| p == 0x00FF_FFFF).count(), 9);
        assert_eq!(fb.get(2, 2), Some(0x00FF_FFFF));
        assert_eq!(fb.get(5, 5), Some(0));
    }

    #[test]
    fn horizontal_stroke_has_the_pen_width() {
        let (mut fb, vp) = canvas(40, 40);
        let cmds = render(&[stroke(6.0, Rgba::WHITE, &[(10.0, 20.0), (30.0, 20.0)])], Rgba::BLACK);
        paint(&mut fb, vp, &cmds);

        // Column through the middle: 6 px tall band around y = 20.
        let lit: Vec<usize> = (0..40).filter(|&y| fb.get(20, y) == Some(0x00FF_FFFF)).collect();
        assert_eq!(lit, (17..23).collect::<Vec<_>>());
        // Round cap reaches past the end point by about the radius.
        assert_eq!(fb.get(31, 20), Some(0x00FF_FFFF));
        assert_eq!(fb.get(35, 20), Some(0));
    }

    #[test]
    fn butt_cap_stops_at_the_end_point() {
        let (mut fb, vp) = canvas(40, 40);
        paint(
            &mut fb,
            vp,
            &[
                DrawCommand::SetColor(Rgba::WHITE),
                DrawCommand::SetLineWidth(6.0),
                DrawCommand::SetLineCap(LineCap::Butt),
                DrawCommand::LineTo(Point::new(10.0, 20.0)),
                DrawCommand::LineTo(Point::new(30.0, 20.0)),
                DrawCommand::Stroke,
            ],
        );
        assert_eq!(fb.get(29, 20), Some(0x00FF_FFFF));
        assert_eq!(fb.get(31, 20), Some(0));
        assert_eq!(fb.get(8, 20), Some(0));
    }

    #[test]
    fn single_point_leaves_no_mark() {
        let (mut fb, vp) = canvas(20, 20);
        let cmds = render(&[stroke(12.0, Rgba::WHITE, &[(10.0, 10.0)])], Rgba::BLACK);
        paint(&mut fb, vp, &cmds);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn self_overlap_does_not_darken_but_separate_strokes_do() {
        let ink = Rgba::new(1.0, 0.0, 0.0, 0.5);
        let there_and_back = &[(5.0, 10.0), (25.0, 10.0), (5.0, 10.0)];

        let (mut fb, vp) = canvas(30, 20);
        paint(&mut fb, vp, &render(&[stroke(4.0, ink, there_and_back)], Rgba::BLACK));
        assert_eq!(fb.get(15, 10), Some(0x0080_0000));

        let (mut fb, vp) = canvas(30, 20);
        let two = [stroke(4.0, ink, &[(5.0, 10.0), (25.0, 10.0)]), stroke(4.0, ink, &[(5.0, 10.0), (25.0, 10.0)])];
        paint(&mut fb, vp, &render(&two, Rgba::BLACK));
        let red = fb.get(15, 10).map(|p| (p >> 16) & 0xFF);
        assert!(matches!(red, Some(r) if r > 0x80 && r < 0xFF));
    }

    #[test]
    fn every_join_style_draws_round() {
        let corner = |join: LineJoin| {
            let (mut fb, vp) = canvas(40, 40);
            paint(
                &mut fb,
                vp,
                &[
                    DrawCommand::SetColor(Rgba::WHITE),
                    DrawCommand::SetLineWidth(8.0),
                    DrawCommand::SetLineJoin(join),
                    DrawCommand::LineTo(Point::new(5.0, 30.0)),
                    DrawCommand::LineTo(Point::new(20.0, 10.0)),
                    DrawCommand::LineTo(Point::new(35.0, 30.0)),
                    DrawCommand::Stroke,
                ],
            );
            fb
        };
        let round = corner(LineJoin::Round);
        assert_eq!(corner(LineJoin::Miter), round);
        assert_eq!(corner(LineJoin::Bevel), round);
        // No miter spike above the apex.
        assert_eq!(round.get(20, 4), Some(0));
    }

    #[test]
    fn drawing_is_clipped_to_the_region() {
        let mut fb = FrameBuffer::new(30, 30);
        let region = Viewport::new(10, 10, 10, 10);
        let cmds = render(&[stroke(8.0, Rgba::WHITE, &[(-20.0, 5.0), (40.0, 5.0)])], Rgba::BLACK);
        paint(&mut fb, region, &cmds);
        assert_eq!(fb.get(15, 15), Some(0x00FF_FFFF));
        assert_eq!(fb.get(5, 15), Some(0));
        assert_eq!(fb.get(25, 15), Some(0));
    }

    #[test]
    fn later_strokes_paint_over_earlier_ones() {
        let (mut fb, vp) = canvas(20, 20);
        let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
        let blue = Rgba::new(0.0, 0.0, 1.0, 1.0);
        let strokes = [
            stroke(6.0, red, &[(2.0, 10.0), (18.0, 10.0)]),
            stroke(6.0, blue, &[(10.0, 2.0), (10.0, 18.0)]),
        ];
        paint(&mut fb, vp, &render(&strokes, Rgba::BLACK));
        assert_eq!(fb.get(10, 10), Some(0x0000_00FF));
        assert_eq!(fb.get(3, 10), Some(0x00FF_0000));
    }
}
