// Stroke recorder: pointer-drag samples become ordered per-stroke point lists.

use crate::types::{Point, Rgba};

/// One continuous drag. Width and color are fixed when the stroke begins.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub width: f32,
    pub color: Rgba,
}

impl Stroke {
    pub fn new(width: f32, color: Rgba) -> Self {
        Self { points: Vec::new(), width, color }
    }
}

/// All strokes of one drawing surface, in creation (= draw) order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Canvas {
    strokes: Vec<Stroke>,
    // The last stroke takes points only while this is set.
    active: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty stroke; it receives every `add_point` until `end_stroke` or `clear`.
    pub fn begin_stroke(&mut self, width: f32, color: Rgba) {
        self.strokes.push(Stroke::new(width, color));
        self.active = true;
    }

    /// Append to the active stroke. Without one this does nothing: a drag can
    /// arrive with no button held.
    pub fn add_point(&mut self, x: f32, y: f32) {
        if !self.active {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(Point::new(x, y));
        }
    }

    pub fn end_stroke(&mut self) {
        self.active = false;
    }

    /// Drop every stroke. No undo.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.active = false;
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        if self.active { self.strokes.last() } else { None }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba = Rgba::new(0.2, 0.4, 0.6, 0.5);

    #[test]
    fn points_go_to_the_latest_stroke_only() {
        let mut canvas = Canvas::new();
        canvas.begin_stroke(12.0, INK);
        canvas.add_point(1.0, 1.0);
        canvas.begin_stroke(4.0, INK);
        canvas.add_point(2.0, 2.0);
        canvas.add_point(3.0, 3.0);

        let strokes = canvas.strokes();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].points, vec![Point::new(1.0, 1.0)]);
        assert_eq!(strokes[1].points.len(), 2);
        assert_eq!(strokes[1].width, 4.0);
    }

    #[test]
    fn add_point_without_a_stroke_is_a_no_op() {
        let mut canvas = Canvas::new();
        canvas.add_point(5.0, 5.0);
        assert!(canvas.is_empty());
        assert!(canvas.active_stroke().is_none());
    }

    #[test]
    fn ended_stroke_stops_taking_points() {
        let mut canvas = Canvas::new();
        canvas.begin_stroke(12.0, INK);
        canvas.add_point(1.0, 1.0);
        canvas.end_stroke();
        canvas.add_point(9.0, 9.0);
        assert_eq!(canvas.strokes()[0].points.len(), 1);
        assert!(!canvas.is_active());
    }

    #[test]
    fn clear_resets_everything() {
        let mut canvas = Canvas::new();
        canvas.begin_stroke(12.0, INK);
        canvas.add_point(1.0, 1.0);
        canvas.clear();
        canvas.add_point(2.0, 2.0);
        assert!(canvas.is_empty());
        assert!(!canvas.is_active());
    }
}
