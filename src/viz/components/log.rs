use crossterm::event::{Event, KeyCode};
use log::LevelFilter;
use ratatui::{prelude::*, widgets::WidgetRef};
use tui_logger::{TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

use super::{event_keycode, Component};

/// Key bindings of the log pane as `(key, description)`, in the order the help popup lists them
pub const KEYS: [(&str, &str); 9] = [
    ("  s  ", "Toggle the target selector"),
    ("  f  ", "Focus on the selected target only"),
    ("⬆ / ⬇", "Switch log target"),
    ("⬅ / ➡", "Show one level less/more for the target"),
    ("- / +", "Capture one level less/more for the target"),
    ("PgUp ", "Enter page mode and scroll up"),
    ("PgDn ", "Scroll down in page mode"),
    (" Esc ", "Leave page mode"),
    ("Space", "Hide targets whose filter is off"),
];

/// Captured log records, browsable by target
///
/// Every record the experiment emits is kept; `display_level` only sets what is shown until the
/// user widens or narrows it per target.
pub struct Logs {
    state: TuiWidgetState,
}

impl Logs {
    pub fn new(display_level: LevelFilter) -> Self {
        Self {
            state: TuiWidgetState::new().set_default_display_level(display_level),
        }
    }
}

impl Default for Logs {
    fn default() -> Self {
        Self::new(LevelFilter::Info)
    }
}

/// Translate a key into the log widget's own navigation event
fn widget_event(key: KeyCode) -> Option<TuiWidgetEvent> {
    let event = match key {
        KeyCode::Char('s') => TuiWidgetEvent::HideKey,
        KeyCode::Char('f') => TuiWidgetEvent::FocusKey,
        KeyCode::Up => TuiWidgetEvent::UpKey,
        KeyCode::Down => TuiWidgetEvent::DownKey,
        KeyCode::Left => TuiWidgetEvent::LeftKey,
        KeyCode::Right => TuiWidgetEvent::RightKey,
        KeyCode::Char('-' | '_') => TuiWidgetEvent::MinusKey,
        KeyCode::Char('+' | '=') => TuiWidgetEvent::PlusKey,
        KeyCode::PageUp => TuiWidgetEvent::PrevPageKey,
        KeyCode::PageDown => TuiWidgetEvent::NextPageKey,
        KeyCode::Esc => TuiWidgetEvent::EscapeKey,
        KeyCode::Char(' ') => TuiWidgetEvent::SpaceKey,
        _ => return None,
    };
    Some(event)
}

impl WidgetRef for Logs {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        TuiLoggerSmartWidget::default()
            .style(Style::default().white())
            .style_error(Style::default().light_red())
            .style_warn(Style::default().light_yellow())
            .style_info(Style::default().cyan())
            .style_debug(Style::default().dark_gray())
            .output_separator(' ')
            .state(&self.state)
            .render(area, buf);
    }
}

impl Component for Logs {
    fn handle_ui_event(&mut self, event: &Event) -> bool {
        match event_keycode(event).and_then(widget_event) {
            Some(action) => {
                self.state.transition(action);
                true
            }
            None => false,
        }
    }
}
