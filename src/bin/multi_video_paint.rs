// What you SEE:
// • One video per MEDIA argument, side by side, each with PLAY / PAUSE / STOP
//   buttons and a status label underneath.
// • Below them a white canvas: drag with Left Mouse to draw, Right Mouse clears.
// • ESC quits.
//
// MEDIA is a GIF clip, a still image, or `camera:<index>` for a live camera.

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use highlighter_pen::config::{CommonArgs, Settings};
use highlighter_pen::draw::Drawer;
use highlighter_pen::input::PointerTracker;
use highlighter_pen::layout::Layout;
use highlighter_pen::logging;
use highlighter_pen::media::{MediaRuntime, RuntimeOptions};
use highlighter_pen::sketch::{CanvasStyle, Sketchpad};
use highlighter_pen::studio::Studio;
use highlighter_pen::types::FrameBuffer;
use tracing::{debug, info, warn};

/// Multi video player + paint.
#[derive(Parser, Debug)]
#[command(name = "multi-video-paint", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Only the players, no canvas.
    #[arg(long)]
    no_canvas: bool,

    /// Clips, stills or `camera:<index>`; at least one.
    #[arg(required = true, value_name = "MEDIA")]
    media: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli.common).context("loading settings")?;
    logging::init(settings.debug_logging);

    /* --- Media runtime: one per process, released on the way out --- */
    let mut runtime = MediaRuntime::acquire(RuntimeOptions {
        camera_size: (settings.camera_width, settings.camera_height),
    });

    let canvas_height = (!cli.no_canvas).then_some(settings.canvas_height);
    let layout = Layout::multi_video(cli.media.len(), settings.player_size(!cli.no_canvas), canvas_height);

    /* --- One player per media argument, in its slot --- */
    let areas: Vec<_> = layout.players.iter().map(|slot| slot.video).collect();
    let players = match runtime.open_players(&areas, &cli.media) {
        Ok(players) => players,
        Err(e) => {
            runtime.release();
            return Err(e).context("opening media");
        }
    };

    let pad = canvas_height.map(|_| Sketchpad::new(settings.canvas_style(CanvasStyle::whiteboard())));
    let (width, height) = (layout.width, layout.height);
    let mut studio = Studio::new(layout, pad, players);

    let title = if cli.no_canvas { "multi video player" } else { "multi video player + paint" };
    let mut drawer = Drawer::new(title, width, height, settings.fps).context("opening window")?;

    /* --- Embed the players into the window --- */
    let embedded = studio.embed_players(runtime.output(), &drawer.window_handle());
    if embedded < cli.media.len() {
        warn!(embedded, total = cli.media.len(), "some players could not be embedded");
    }
    info!(players = embedded, width, height, canvas = canvas_height.is_some(), "window ready");

    let mut screen = FrameBuffer::new(width, height);
    let mut tracker = PointerTracker::new();
    studio.compose(&mut screen, true);

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut last_frame_time = Instant::now();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = now - last_frame_time;
        last_frame_time = now;

        // 1) Input: toolbar clicks and canvas strokes.
        let events = tracker.sample(drawer.mouse_pos(), drawer.buttons());
        studio.handle(&events);

        // 2) Playback clocks move on; new frames land in the players.
        studio.tick(dt);

        // 3) Compose videos, toolbars and (if dirty) the canvas; present.
        studio.compose(&mut screen, false);
        drawer.present(&screen).context("presenting frame")?;

        // 4) FPS once per second.
        frames_this_second += 1;
        let since = now.duration_since(last_fps_time);
        if since >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / since.as_secs_f32();
            debug!(fps, "frame rate");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    // Players (and any camera streams) go before the runtime.
    drop(studio);
    runtime.release();
    Ok(())
}
