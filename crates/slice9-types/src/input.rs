//! Platform-agnostic input event types.
//!
//! Every backend maps its native input to these events. The scene and the
//! event loop never see raw platform input.

/// A platform-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Any key pressed.
    KeyPress,
    /// The drawable area changed size.
    Resized { width: u32, height: u32 },
    /// User requested quit (window close, etc.).
    Quit,
}

impl InputEvent {
    /// Whether this event ends the session.
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Quit | Self::KeyPress)
    }
}
