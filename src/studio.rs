// Everything one window shows, and the routing of pointer events to it.
// Presses go to whatever region they land in; once a press starts on the
// canvas, drags and the release keep going to the canvas until the button is
// let go, even if the pointer wanders over a video.

use std::time::Duration;

use tracing::{debug, warn};

use crate::dispatch::{DispatchTable, Response};
use crate::draw::{draw_button, draw_text_5x7};
use crate::embed::{VideoOutput, WindowHandle};
use crate::input::{Button, EventKind, PointerEvent};
use crate::layout::Layout;
use crate::player::{Control, PlaybackState, Player};
use crate::sketch::Sketchpad;
use crate::types::FrameBuffer;

/// Window background around and between the widgets.
pub const CHROME: u32 = 0x00D6_D6D6;
const TOOLBAR_FILL: u32 = 0x0030_3030;
const TOOLBAR_TEXT: u32 = 0x00F0_F0F0;

pub struct Studio {
    layout: Layout,
    pad: Option<Sketchpad>,
    table: DispatchTable<Sketchpad>,
    players: Vec<Player>,
    canvas_grab: bool, // primary went down on the canvas and is still held
    canvas_dirty: bool,
}

impl Studio {
    /// `players[i]` is shown in `layout.players[i]`; extra players are ignored.
    pub fn new(layout: Layout, pad: Option<Sketchpad>, players: Vec<Player>) -> Self {
        if players.len() > layout.players.len() {
            warn!(players = players.len(), slots = layout.players.len(), "more players than slots");
        }
        Self {
            layout,
            pad,
            table: Sketchpad::dispatch_table(),
            players,
            canvas_grab: false,
            canvas_dirty: true,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sketchpad(&self) -> Option<&Sketchpad> {
        self.pad.as_ref()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Bind every player to the window; returns how many succeeded.
    pub fn embed_players(&mut self, output: &impl VideoOutput, handle: &WindowHandle) -> usize {
        self.players.iter_mut().map(|p| p.embed(output, handle)).filter(|&ok| ok).count()
    }

    /// Route one frame's pointer events. Returns true when the canvas needs a repaint.
    pub fn handle(&mut self, events: &[PointerEvent]) -> bool {
        for ev in events {
            match ev.kind {
                EventKind::Press if self.layout.in_canvas(ev.x, ev.y) => {
                    if ev.button == Some(Button::Primary) {
                        self.canvas_grab = true;
                    }
                    self.send_to_canvas(ev);
                }
                EventKind::Press => {
                    if ev.button == Some(Button::Primary) {
                        self.press_controls(ev.x, ev.y);
                    }
                }
                EventKind::Drag if self.canvas_grab => self.send_to_canvas(ev),
                EventKind::Drag => {}
                EventKind::Release => {
                    if self.canvas_grab && ev.button == Some(Button::Primary) {
                        self.canvas_grab = false;
                        self.send_to_canvas(ev);
                    }
                }
            }
        }
        self.canvas_dirty
    }

    fn send_to_canvas(&mut self, ev: &PointerEvent) {
        let (Some(pad), Some(area)) = (self.pad.as_mut(), self.layout.canvas) else {
            return;
        };
        let local = ev.offset(area.x as f32, area.y as f32);
        if self.table.dispatch(pad, &local) == Response::Repaint {
            self.canvas_dirty = true;
        }
    }

    fn press_controls(&mut self, x: f32, y: f32) {
        let hit = self
            .layout
            .players
            .iter()
            .zip(self.players.iter_mut())
            .find_map(|(slot, player)| slot.hit(x, y).map(|control| (player, control)));
        if let Some((player, control)) = hit {
            debug!(player = player.id(), ?control, "toolbar");
            if let Err(e) = player.apply(control) {
                warn!(player = player.id(), error = %e, "toolbar action failed");
            }
        }
    }

    /// Advance every player by `dt`. A player whose media fails is stopped.
    pub fn tick(&mut self, dt: Duration) {
        for player in &mut self.players {
            if let Err(e) = player.advance(dt) {
                warn!(player = player.id(), error = %e, "playback failed; stopping");
                player.stop();
            }
        }
    }

    /// Draw the window: videos and toolbars every call, the canvas only when
    /// something changed it (or `force` is set, e.g. the first frame).
    pub fn compose(&mut self, fb: &mut FrameBuffer, force: bool) {
        if force {
            fb.fill(CHROME);
        }
        for (slot, player) in self.layout.players.iter().zip(&self.players) {
            // A player that never got a window shows nothing.
            if player.is_embedded() {
                fb.blit(player.frame(), slot.video);
            }

            fb.fill_rect(slot.controls, CHROME);
            for (control, rect) in slot.buttons() {
                draw_button(fb, rect, control_label(control), TOOLBAR_FILL, TOOLBAR_TEXT);
            }
            let status = slot.status_area();
            let fits = (status.width.saturating_sub(4) + 1) / 6;
            let label: String = format!("#{} {}", player.id(), status_label(player)).chars().take(fits).collect();
            draw_text_5x7(fb, status.x as i32 + 4, status.y as i32 + (status.height as i32 - 7) / 2, &label, TOOLBAR_FILL);
        }

        if let (Some(pad), Some(area)) = (&self.pad, self.layout.canvas) {
            if self.canvas_dirty || force {
                pad.paint(fb, area);
                self.canvas_dirty = false;
            }
        }
    }
}

fn control_label(control: Control) -> &'static str {
    match control {
        Control::Play => "PLAY",
        Control::Pause => "PAUSE",
        Control::Stop => "STOP",
    }
}

pub fn status_label(player: &Player) -> &'static str {
    if !player.has_media() {
        return "NO MEDIA";
    }
    match player.state() {
        PlaybackState::Stopped => "STOPPED",
        PlaybackState::Playing => "PLAYING",
        PlaybackState::Paused => "PAUSED",
        PlaybackState::Ended => "ENDED",
    }
}
