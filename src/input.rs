// Pointer events from a polled window.
// minifb only tells us "where is the mouse" and "is this button down" once per
// frame; the tracker turns that into press / drag / release events.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Press,
    Drag,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

/// Drag events carry the held button, or `None` for a plain hover move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub button: Option<Button>,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn press(button: Button, x: f32, y: f32) -> Self {
        Self { kind: EventKind::Press, button: Some(button), x, y }
    }

    pub fn drag(button: Option<Button>, x: f32, y: f32) -> Self {
        Self { kind: EventKind::Drag, button, x, y }
    }

    pub fn release(button: Button, x: f32, y: f32) -> Self {
        Self { kind: EventKind::Release, button: Some(button), x, y }
    }

    /// Same event, coordinates shifted by (-dx, -dy).
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self { x: self.x - dx, y: self.y - dy, ..self }
    }
}

/// Which buttons are down this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl ButtonState {
    fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Primary => self.primary,
            Button::Secondary => self.secondary,
            Button::Middle => self.middle,
        }
    }
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    last_pos: Option<(f32, f32)>,
    last_buttons: ButtonState,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of polled state; returns the events it implies, in the
    /// order press, drag, release.
    pub fn sample(&mut self, pos: Option<(f32, f32)>, buttons: ButtonState) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        // Without a position (pointer left the window) keep the last one.
        let Some((x, y)) = pos.or(self.last_pos) else {
            self.last_buttons = buttons;
            return events;
        };
        const ORDER: [Button; 3] = [Button::Primary, Button::Secondary, Button::Middle];

        for button in ORDER {
            if buttons.is_down(button) && !self.last_buttons.is_down(button) {
                events.push(PointerEvent::press(button, x, y));
            }
        }

        let moved = self.last_pos.is_some_and(|last| last != (x, y));
        if moved {
            let held = ORDER
                .into_iter()
                .find(|&b| buttons.is_down(b) && self.last_buttons.is_down(b));
            events.push(PointerEvent::drag(held, x, y));
        }

        for button in ORDER {
            if !buttons.is_down(button) && self.last_buttons.is_down(button) {
                events.push(PointerEvent::release(button, x, y));
            }
        }

        self.last_pos = Some((x, y));
        self.last_buttons = buttons;
        events
    }
}
