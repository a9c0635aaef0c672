pub mod help;
pub mod log;
pub mod plot;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::widgets::WidgetRef;

pub use self::log::Logs;
pub use self::plot::{Plot, PlotConfig};

/// A widget that can react to terminal events
pub trait Component: WidgetRef {
    /// **Returns** whether the event was consumed
    fn handle_ui_event(&mut self, event: &Event) -> bool;
}

/// Takes an event, checks if it is a key press event, and returns the [`KeyCode`]
pub(super) fn event_keycode(event: &Event) -> Option<KeyCode> {
    let Event::Key(key) = event else {
        return None;
    };

    (key.kind == KeyEventKind::Press).then_some(key.code)
}
