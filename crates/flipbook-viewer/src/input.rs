//! Keyboard input for playback.
//!
//! Bridges winit keyboard events to the window-independent [`KeySymbol`]s the
//! playback engine understands.

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use flipbook_anim::KeySymbol;

/// Converts a winit logical key to a bindable symbol.
fn convert_key(key: &Key) -> Option<KeySymbol> {
    match key {
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeySymbol::from_char(c),
                _ => None,
            }
        },
        Key::Named(named) => Some(match named {
            NamedKey::ArrowUp => KeySymbol::Up,
            NamedKey::ArrowDown => KeySymbol::Down,
            NamedKey::ArrowLeft => KeySymbol::Left,
            NamedKey::ArrowRight => KeySymbol::Right,
            NamedKey::Space => KeySymbol::Space,
            NamedKey::Enter => KeySymbol::Enter,
            NamedKey::Tab => KeySymbol::Tab,
            _ => return None,
        }),
        _ => None,
    }
}

/// A discrete key transition for the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key went down
    Pressed(KeySymbol),
    /// Key went up
    Released(KeySymbol),
}

/// Collects key transitions between redraws.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Transitions not yet handed to the session
    pending: Vec<KeyAction>,
    /// Whether Escape was pressed
    quit_requested: bool,
}

impl InputHandler {
    /// Create a new input handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a winit window event. Returns true if the event was a key
    /// transition for playback.
    ///
    /// Presses are dropped while a text field has focus; releases always pass
    /// so a held clip cannot get stuck.
    pub fn handle_event(&mut self, event: &WindowEvent, text_focus: bool) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event.logical_key, event.state, event.repeat, text_focus)
            },
            _ => false,
        }
    }

    fn handle_key(
        &mut self,
        key: &Key,
        state: ElementState,
        repeat: bool,
        text_focus: bool,
    ) -> bool {
        let pressed = state == ElementState::Pressed;

        if pressed && !text_focus && *key == Key::Named(NamedKey::Escape) {
            self.quit_requested = true;
            return false;
        }

        let Some(symbol) = convert_key(key) else {
            return false;
        };

        let action = if pressed {
            if repeat || text_focus {
                return false;
            }
            KeyAction::Pressed(symbol)
        } else {
            KeyAction::Released(symbol)
        };
        self.pending.push(action);
        true
    }

    /// Take the transitions collected since the last call, in order.
    pub fn drain(&mut self) -> Vec<KeyAction> {
        std::mem::take(&mut self.pending)
    }

    /// Whether the user asked to quit.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
