use slice9_core::PanelScene;
use slice9_core::input::InputEvent;

/// Result of handling a single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
}

/// Handle one event: quit or any key ends the session, a resize
/// re-lays out the scene.
pub fn handle_event(event: &InputEvent, scene: &mut PanelScene) -> InputResult {
    match event {
        InputEvent::Resized { width, height } => {
            scene.resize(*width, *height);
            InputResult::Continue
        },
        e if e.is_exit() => {
            log::info!("Exit requested ({e:?})");
            InputResult::Quit
        },
        _ => InputResult::Continue,
    }
}
