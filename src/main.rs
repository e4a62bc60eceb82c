// What you SEE:
// • A black canvas inside a thin window border.
// • Hold Left Mouse and drag: a half-transparent line in a random color
//   follows the pointer; crossing lines blend like highlighter ink.
// • Right Mouse clears the canvas. ESC quits.

use anyhow::Context;
use clap::Parser;
use highlighter_pen::config::{CommonArgs, Settings};
use highlighter_pen::draw::Drawer;
use highlighter_pen::input::PointerTracker;
use highlighter_pen::layout::Layout;
use highlighter_pen::logging;
use highlighter_pen::sketch::{CanvasStyle, Sketchpad};
use highlighter_pen::studio::Studio;
use highlighter_pen::types::FrameBuffer;
use tracing::info;

/// Freehand highlighter pen.
#[derive(Parser, Debug)]
#[command(name = "highlighter", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Window width in pixels.
    #[arg(long)]
    width: Option<usize>,

    /// Window height in pixels.
    #[arg(long)]
    height: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli.common).context("loading settings")?;
    logging::init(settings.debug_logging);

    /* --- Window + canvas setup ---
       Visual: window opens showing an empty canvas. */
    let width = cli.width.unwrap_or(settings.window_width);
    let height = cli.height.unwrap_or(settings.window_height);
    let style = settings.canvas_style(CanvasStyle::highlighter());
    info!(width, height, ?style, "starting highlighter");

    let layout = Layout::highlighter(width, height, settings.border);
    let mut studio = Studio::new(layout, Some(Sketchpad::new(style)), Vec::new());
    let mut drawer = Drawer::new("Highlighter", width, height, settings.fps).context("opening window")?;
    let mut tracker = PointerTracker::new();

    // The image you actually see each frame.
    let mut screen = FrameBuffer::new(width, height);
    studio.compose(&mut screen, true);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Mouse state -> press/drag/release -> strokes.
        let events = tracker.sample(drawer.mouse_pos(), drawer.buttons());
        studio.handle(&events);

        // 2) Repaint the canvas if a stroke changed, then show it.
        studio.compose(&mut screen, false);
        drawer.present(&screen).context("presenting frame")?;
    }

    let strokes = studio.sketchpad().map_or(0, |pad| pad.canvas().strokes().len());
    info!(strokes, "highlighter closed");
    Ok(())
}
