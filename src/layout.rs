// Where everything sits in the window.
// Visual (multi-video-paint):
//   +---------+---------+
//   | video 1 | video 2 |
//   |[PLAY][PAUSE][STOP]|
//   +---------+---------+
//   |      canvas       |
//   +-------------------+

use crate::player::Control;
use crate::types::Viewport;

/// Height of a player's toolbar strip.
pub const CONTROL_BAR_HEIGHT: usize = 24;
const BUTTON_WIDTH: usize = 48;
const BUTTON_GAP: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerSlot {
    pub video: Viewport,
    pub controls: Viewport,
}

impl PlayerSlot {
    /// Button rectangles in toolbar order.
    pub fn buttons(&self) -> [(Control, Viewport); 3] {
        let y = self.controls.y + 2;
        let h = self.controls.height.saturating_sub(4);
        let at = |i: usize| Viewport::new(self.controls.x + BUTTON_GAP + i * (BUTTON_WIDTH + BUTTON_GAP), y, BUTTON_WIDTH, h);
        [(Control::Play, at(0)), (Control::Pause, at(1)), (Control::Stop, at(2))]
    }

    /// Free space right of the buttons, for the status label.
    pub fn status_area(&self) -> Viewport {
        let used = BUTTON_GAP + 3 * (BUTTON_WIDTH + BUTTON_GAP);
        Viewport::new(
            self.controls.x + used.min(self.controls.width),
            self.controls.y,
            self.controls.width.saturating_sub(used),
            self.controls.height,
        )
    }

    pub fn hit(&self, x: f32, y: f32) -> Option<Control> {
        self.buttons().into_iter().find(|(_, rect)| rect.contains(x, y)).map(|(c, _)| c)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub canvas: Option<Viewport>,
    pub players: Vec<PlayerSlot>,
}

impl Layout {
    /// A single canvas filling the window inside a `border` px margin.
    pub fn highlighter(width: usize, height: usize, border: usize) -> Self {
        let canvas = Viewport::new(
            border,
            border,
            width.saturating_sub(2 * border),
            height.saturating_sub(2 * border),
        );
        Self { width, height, canvas: Some(canvas), players: Vec::new() }
    }

    /// `count` players of `player_size` in a row, then (optionally) a canvas
    /// of `canvas_height` spanning the full width underneath.
    pub fn multi_video(count: usize, player_size: (usize, usize), canvas_height: Option<usize>) -> Self {
        let (pw, ph) = player_size;
        let row_height = if count == 0 { 0 } else { ph + CONTROL_BAR_HEIGHT };
        let players = (0..count)
            .map(|i| PlayerSlot {
                video: Viewport::new(i * pw, 0, pw, ph),
                controls: Viewport::new(i * pw, ph, pw, CONTROL_BAR_HEIGHT),
            })
            .collect();

        // Never narrower than the toolbar of one player.
        let min_width = BUTTON_GAP + 3 * (BUTTON_WIDTH + BUTTON_GAP);
        let width = (count * pw).max(min_width);
        let canvas = canvas_height.map(|h| Viewport::new(0, row_height, width, h));
        let height = row_height + canvas_height.unwrap_or(0);
        Self { width, height, canvas, players }
    }

    pub fn in_canvas(&self, x: f32, y: f32) -> bool {
        self.canvas.is_some_and(|c| c.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlighter_canvas_respects_the_border() {
        let layout = Layout::highlighter(400, 400, 3);
        assert_eq!(layout.canvas, Some(Viewport::new(3, 3, 394, 394)));
        assert!(layout.in_canvas(3.0, 3.0));
        assert!(!layout.in_canvas(1.0, 200.0));
    }

    #[test]
    fn players_sit_in_a_row_above_the_canvas() {
        let layout = Layout::multi_video(2, (400, 400), Some(400));
        assert_eq!((layout.width, layout.height), (800, 400 + CONTROL_BAR_HEIGHT + 400));
        assert_eq!(layout.players[1].video, Viewport::new(400, 0, 400, 400));
        assert_eq!(layout.players[1].controls.y, 400);
        assert_eq!(layout.canvas, Some(Viewport::new(0, 424, 800, 400)));
    }

    #[test]
    fn video_only_layout_has_no_canvas() {
        let layout = Layout::multi_video(1, (320, 200), None);
        assert_eq!(layout.canvas, None);
        assert_eq!(layout.height, 200 + CONTROL_BAR_HEIGHT);
        assert!(!layout.in_canvas(10.0, 10.0));
    }

    #[test]
    fn toolbar_hit_testing() {
        let layout = Layout::multi_video(1, (400, 400), None);
        let slot = &layout.players[0];
        let [(_, play), (_, pause), (_, stop)] = slot.buttons();
        assert_eq!(slot.hit(play.x as f32 + 1.0, play.y as f32 + 1.0), Some(Control::Play));
        assert_eq!(slot.hit(pause.x as f32 + 1.0, pause.y as f32 + 1.0), Some(Control::Pause));
        assert_eq!(slot.hit(stop.x as f32 + 1.0, stop.y as f32 + 1.0), Some(Control::Stop));
        assert_eq!(slot.hit(399.0, 410.0), None);
        assert!(slot.status_area().x > stop.x);
    }
}
