// Canvas renderer: strokes -> backend-neutral drawing commands.
// Visual: a cleared background, then every stroke painted in creation order
// so later strokes sit on top of earlier ones.

use crate::stroke::Stroke;
use crate::types::{Point, Rgba};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// One drawing primitive, in the order a 2D backend should apply it.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Paint the whole surface with an opaque color.
    Clear(Rgba),
    /// Forget the current path.
    NewPath,
    SetColor(Rgba),
    SetLineWidth(f32),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    /// Extend the path; the first point of a path only moves the pen.
    LineTo(Point),
    /// Paint the current path with the current color, width, cap and join.
    Stroke,
}

/// Build the command list for one repaint. Only reads `strokes`, so calling
/// it twice on the same list yields the same commands.
pub fn render(strokes: &[Stroke], background: Rgba) -> Vec<DrawCommand> {
    let per_stroke: usize = strokes.iter().map(|s| s.points.len() + 6).sum();
    let mut out = Vec::with_capacity(1 + per_stroke);

    out.push(DrawCommand::Clear(background));
    for stroke in strokes {
        out.push(DrawCommand::NewPath);
        out.push(DrawCommand::SetColor(stroke.color));
        out.push(DrawCommand::SetLineWidth(stroke.width));
        out.push(DrawCommand::SetLineCap(LineCap::Round));
        out.push(DrawCommand::SetLineJoin(LineJoin::Round));
        out.extend(stroke.points.iter().copied().map(DrawCommand::LineTo));
        out.push(DrawCommand::Stroke);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(color: Rgba, points: &[(f32, f32)]) -> Stroke {
        let mut s = Stroke::new(12.0, color);
        s.points = points.iter().copied().map(Point::from).collect();
        s
    }

    #[test]
    fn empty_canvas_renders_only_the_background() {
        assert_eq!(render(&[], Rgba::BLACK), vec![DrawCommand::Clear(Rgba::BLACK)]);
    }

    #[test]
    fn one_stroke_expands_to_its_path() {
        let ink = Rgba::new(0.1, 0.2, 0.3, 0.5);
        let cmds = render(&[stroke(ink, &[(10.0, 10.0), (20.0, 10.0)])], Rgba::WHITE);
        assert_eq!(
            cmds,
            vec![
                DrawCommand::Clear(Rgba::WHITE),
                DrawCommand::NewPath,
                DrawCommand::SetColor(ink),
                DrawCommand::SetLineWidth(12.0),
                DrawCommand::SetLineCap(LineCap::Round),
                DrawCommand::SetLineJoin(LineJoin::Round),
                DrawCommand::LineTo(Point::new(10.0, 10.0)),
                DrawCommand::LineTo(Point::new(20.0, 10.0)),
                DrawCommand::Stroke,
            ]
        );
    }

    #[test]
    fn pointless_stroke_still_renders_without_error() {
        let cmds = render(&[stroke(Rgba::WHITE, &[])], Rgba::BLACK);
        assert_eq!(cmds.len(), 7);
        assert_eq!(cmds.last(), Some(&DrawCommand::Stroke));
    }
}
