use highlighter_pen::dispatch::DispatchTable;
use highlighter_pen::input::{Button, PointerEvent};
use highlighter_pen::render::{DrawCommand, render};
use highlighter_pen::sketch::{CanvasStyle, Sketchpad};
use highlighter_pen::stroke::Canvas;
use highlighter_pen::types::{Point, Rgba};

fn pad() -> (Sketchpad, DispatchTable<Sketchpad>) {
    (Sketchpad::with_seed(CanvasStyle::highlighter(), 11), Sketchpad::dispatch_table())
}

fn feed(pad: &mut Sketchpad, table: &DispatchTable<Sketchpad>, events: &[PointerEvent]) {
    table.dispatch_all(pad, events);
}

#[test]
fn press_drag_release_builds_one_stroke() {
    let (mut pad, table) = pad();
    feed(
        &mut pad,
        &table,
        &[
            PointerEvent::press(Button::Primary, 10.0, 10.0),
            PointerEvent::drag(Some(Button::Primary), 20.0, 10.0),
            PointerEvent::drag(Some(Button::Primary), 20.0, 20.0),
            PointerEvent::release(Button::Primary, 20.0, 20.0),
        ],
    );
    let strokes = pad.canvas().strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(
        strokes[0].points,
        vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(20.0, 20.0)]
    );
    assert_eq!(strokes[0].width, 12.0);

    feed(
        &mut pad,
        &table,
        &[PointerEvent::press(Button::Primary, 5.0, 5.0), PointerEvent::press(Button::Secondary, 5.0, 5.0)],
    );
    assert!(pad.canvas().strokes().is_empty());
}

#[test]
fn stroke_and_point_counts_follow_the_event_stream() {
    let (mut pad, table) = pad();
    // (press, drags before the next press)
    let plan = [(1.0, 3), (50.0, 0), (100.0, 7), (150.0, 1)];
    for &(x, drags) in &plan {
        let mut events = vec![PointerEvent::press(Button::Primary, x, 0.0)];
        events.extend((1..=drags).map(|i| PointerEvent::drag(Some(Button::Primary), x, i as f32)));
        // Hover moves after release must not add points.
        events.push(PointerEvent::release(Button::Primary, x, drags as f32));
        events.push(PointerEvent::drag(None, x + 1.0, 0.0));
        feed(&mut pad, &table, &events);
    }

    let strokes = pad.canvas().strokes();
    assert_eq!(strokes.len(), plan.len());
    for (stroke, &(_, drags)) in strokes.iter().zip(&plan) {
        assert_eq!(stroke.points.len(), 1 + drags);
    }
}

#[test]
fn cleared_canvas_renders_only_the_background() {
    let (mut pad, table) = pad();
    feed(
        &mut pad,
        &table,
        &[
            PointerEvent::press(Button::Primary, 1.0, 1.0),
            PointerEvent::drag(Some(Button::Primary), 2.0, 2.0),
            PointerEvent::release(Button::Primary, 2.0, 2.0),
            PointerEvent::press(Button::Secondary, 2.0, 2.0),
        ],
    );
    assert_eq!(pad.commands(), vec![DrawCommand::Clear(CanvasStyle::highlighter().background)]);
}

#[test]
fn rendering_twice_gives_the_same_commands() {
    let (mut pad, table) = pad();
    feed(
        &mut pad,
        &table,
        &[
            PointerEvent::press(Button::Primary, 1.0, 1.0),
            PointerEvent::drag(Some(Button::Primary), 8.0, 3.0),
            PointerEvent::release(Button::Primary, 8.0, 3.0),
            PointerEvent::press(Button::Primary, 4.0, 4.0),
        ],
    );
    assert_eq!(pad.commands(), pad.commands());
}

#[test]
fn strokes_render_in_creation_order() {
    let mut canvas = Canvas::new();
    let colors = [
        Rgba::new(1.0, 0.0, 0.0, 0.5), // A
        Rgba::new(0.0, 1.0, 0.0, 0.5), // B
        Rgba::new(0.0, 0.0, 1.0, 0.5), // C
    ];
    for (i, color) in colors.iter().enumerate() {
        canvas.begin_stroke(12.0, *color);
        canvas.add_point(i as f32, 0.0);
        canvas.add_point(i as f32, 10.0);
        canvas.end_stroke();
    }

    let cmds = render(canvas.strokes(), Rgba::BLACK);
    assert_eq!(cmds[0], DrawCommand::Clear(Rgba::BLACK));
    let order: Vec<Rgba> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCommand::SetColor(color) => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(order, colors);
    assert_eq!(cmds.iter().filter(|c| **c == DrawCommand::Stroke).count(), 3);
}

#[test]
fn add_point_before_any_stroke_changes_nothing() {
    let mut canvas = Canvas::new();
    canvas.add_point(3.0, 4.0);
    assert_eq!(canvas, Canvas::new());
}
