use std::{
    io,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode};
use log::info;
use ratatui::{prelude::*, widgets::*};

use super::{
    components::{event_keycode, help::render_help, Component, Logs, Plot, PlotConfig},
    tui::Tui,
    Update,
};

const TABS: [&str; 2] = ["Plot", "Logs"];

#[derive(Default, Clone, Copy, PartialEq, Eq)]
enum State {
    #[default]
    Running,
    Finished,
    Quit,
}

/// The root TUI component which holds the dashboard state and runs the render loop
pub(super) struct App {
    state: State,
    progress: usize,
    total: usize,
    selected_tab: usize,
    show_help: bool,
    plot: Plot,
    logs: Logs,
}

impl App {
    pub fn new(plot: PlotConfig, total: usize) -> Self {
        Self {
            state: State::default(),
            progress: 0,
            total,
            selected_tab: 0,
            show_help: false,
            plot: Plot::new(plot),
            logs: Logs::default(),
        }
    }

    /// Initialize the terminal and run the main loop until the user quits
    ///
    /// Restores the terminal on exit
    pub fn run(&mut self, rx: Receiver<Update>) -> io::Result<()> {
        let mut tui = Tui::enter()?;

        while self.state != State::Quit {
            if self.state == State::Running {
                self.drain(&rx);
            }

            tui.draw(|frame| frame.render_widget(&*self, frame.size()))?;

            if event::poll(Duration::from_millis(16))? {
                let event = event::read()?;
                self.handle_event(&event);
            }
        }

        Ok(())
    }

    fn drain(&mut self, rx: &Receiver<Update>) {
        loop {
            match rx.try_recv() {
                Ok(Update { progress, curves }) => {
                    self.progress = progress;
                    self.plot.update(curves);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("Run finished, press q to exit");
                    self.state = State::Finished;
                    break;
                }
            }
        }
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(key) = event_keycode(event) else {
            return;
        };

        match key {
            KeyCode::Char('q') => self.state = State::Quit,
            KeyCode::Char('h') => self.show_help = !self.show_help,
            KeyCode::Tab => self.selected_tab = (self.selected_tab + 1) % TABS.len(),
            _ if self.selected_tab == 1 => {
                self.logs.handle_ui_event(event);
            }
            _ => {}
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [menu_area, main_area, progress_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Tabs::new(TABS)
            .block(Block::default().padding(Padding::uniform(1)))
            .white()
            .bold()
            .highlight_style(Style::default().light_green())
            .select(self.selected_tab)
            .render(menu_area, buf);

        match self.selected_tab {
            0 => self.plot.render_ref(main_area, buf),
            _ => self.logs.render_ref(main_area, buf),
        }

        let title = match self.state {
            State::Finished => "Finished, press q to exit",
            _ => "Progress",
        };
        let ratio = if self.total == 0 {
            1.0
        } else {
            (self.progress as f64 / self.total as f64).min(1.0)
        };
        Gauge::default()
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title(title),
            )
            .gauge_style(Color::Cyan)
            .label(format!("{} / {}", self.progress, self.total))
            .ratio(ratio)
            .render(progress_area, buf);

        if self.show_help {
            render_help(area, buf, self.selected_tab);
        }
    }
}
