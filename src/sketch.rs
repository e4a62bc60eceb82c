// The drawing surface behind both apps: a Canvas, the brush it paints with,
// and the standard pointer bindings.
// Visual: hold the left button and drag to draw a random-colored highlighter
// line; click the right button to wipe everything.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::dispatch::{DispatchTable, Response};
use crate::input::{Button, EventKind, PointerEvent};
use crate::raster;
use crate::render::{DrawCommand, render};
use crate::stroke::Canvas;
use crate::types::{FrameBuffer, Rgba, Viewport};

/// Background and brush defaults for one app variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasStyle {
    pub background: Rgba,
    pub brush_width: f32,
    /// Alpha given to every new stroke's random color.
    pub opacity: f32,
}

impl CanvasStyle {
    /// Black paper, half-transparent ink: overlapping strokes blend.
    pub const fn highlighter() -> Self {
        Self { background: Rgba::BLACK, brush_width: 12.0, opacity: 0.5 }
    }

    /// White paper, opaque ink (the canvas under the video players).
    pub const fn whiteboard() -> Self {
        Self { background: Rgba::WHITE, brush_width: 12.0, opacity: 1.0 }
    }
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self::highlighter()
    }
}

pub struct Sketchpad {
    canvas: Canvas,
    style: CanvasStyle,
    rng: StdRng,
}

impl Sketchpad {
    pub fn new(style: CanvasStyle) -> Self {
        Self { canvas: Canvas::new(), style, rng: StdRng::from_entropy() }
    }

    /// Same as `new` but with reproducible stroke colors.
    pub fn with_seed(style: CanvasStyle, seed: u64) -> Self {
        Self { canvas: Canvas::new(), style, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn style(&self) -> &CanvasStyle {
        &self.style
    }

    /// A fresh color for a new stroke: random RGB, the style's opacity.
    pub fn random_color(&mut self) -> Rgba {
        Rgba::new(self.rng.r#gen(), self.rng.r#gen(), self.rng.r#gen(), self.style.opacity)
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        render(self.canvas.strokes(), self.style.background)
    }

    /// Repaint the canvas into `region` of the window buffer.
    pub fn paint(&self, fb: &mut FrameBuffer, region: Viewport) {
        raster::paint(fb, region, &self.commands());
    }

    /// Press/drag/release bindings; event coordinates are canvas-local.
    pub fn dispatch_table() -> DispatchTable<Sketchpad> {
        DispatchTable::new()
            .on(EventKind::Press, Self::on_press)
            .on(EventKind::Drag, Self::on_drag)
            .on(EventKind::Release, Self::on_release)
    }

    fn on_press(pad: &mut Sketchpad, ev: &PointerEvent) -> Response {
        match ev.button {
            Some(Button::Primary) => {
                let color = pad.random_color();
                pad.canvas.begin_stroke(pad.style.brush_width, color);
                pad.canvas.add_point(ev.x, ev.y);
                debug!(strokes = pad.canvas.strokes().len(), x = ev.x, y = ev.y, "stroke begun");
                Response::Repaint
            }
            Some(Button::Secondary) => {
                pad.canvas.clear();
                debug!("canvas cleared");
                Response::Repaint
            }
            _ => Response::Ignored,
        }
    }

    fn on_drag(pad: &mut Sketchpad, ev: &PointerEvent) -> Response {
        if ev.button != Some(Button::Primary) || !pad.canvas.is_active() {
            return Response::Ignored;
        }
        pad.canvas.add_point(ev.x, ev.y);
        Response::Repaint
    }

    fn on_release(pad: &mut Sketchpad, ev: &PointerEvent) -> Response {
        if ev.button == Some(Button::Primary) {
            pad.canvas.end_stroke();
        }
        Response::Repaint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    #[test]
    fn colors_use_the_style_opacity() {
        let mut pad = Sketchpad::with_seed(CanvasStyle::highlighter(), 7);
        for _ in 0..20 {
            let c = pad.random_color();
            assert_eq!(c.a, 0.5);
            assert!((0.0..1.0).contains(&c.r) && (0.0..1.0).contains(&c.g) && (0.0..1.0).contains(&c.b));
        }
    }

    #[test]
    fn same_seed_same_colors() {
        let mut a = Sketchpad::with_seed(CanvasStyle::whiteboard(), 42);
        let mut b = Sketchpad::with_seed(CanvasStyle::whiteboard(), 42);
        assert_eq!(a.random_color(), b.random_color());
    }

    #[test]
    fn default_bindings_draw_and_clear() {
        let table = Sketchpad::dispatch_table();
        let mut pad = Sketchpad::with_seed(CanvasStyle::highlighter(), 1);

        table.dispatch(&mut pad, &PointerEvent::press(Button::Primary, 10.0, 10.0));
        table.dispatch(&mut pad, &PointerEvent::drag(Some(Button::Primary), 20.0, 10.0));
        table.dispatch(&mut pad, &PointerEvent::drag(None, 30.0, 10.0));
        let r = table.dispatch(&mut pad, &PointerEvent::release(Button::Primary, 20.0, 10.0));
        assert_eq!(r, Response::Repaint);

        let strokes = pad.canvas().strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].points, vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]);
        assert_eq!(strokes[0].width, 12.0);

        table.dispatch(&mut pad, &PointerEvent::press(Button::Secondary, 0.0, 0.0));
        assert!(pad.canvas().is_empty());
        assert_eq!(pad.commands(), vec![DrawCommand::Clear(Rgba::BLACK)]);
    }

    #[test]
    fn drag_after_clear_while_held_does_nothing() {
        let table = Sketchpad::dispatch_table();
        let mut pad = Sketchpad::with_seed(CanvasStyle::highlighter(), 1);
        table.dispatch(&mut pad, &PointerEvent::press(Button::Primary, 1.0, 1.0));
        table.dispatch(&mut pad, &PointerEvent::press(Button::Secondary, 1.0, 1.0));
        let r = table.dispatch(&mut pad, &PointerEvent::drag(Some(Button::Primary), 2.0, 2.0));
        assert_eq!(r, Response::Ignored);
        assert!(pad.canvas().is_empty());
    }
}
