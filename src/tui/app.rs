use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::form::EditModal;
use crate::submit::Payload;

use super::action::Action;
use super::error::AppError;
use super::screens::{EditState, draw_edit};
use super::widgets::{StatusBarContext, draw_status_bar};

/// Top-level application state.
pub struct App {
    edit: EditState,
    committed: Option<Payload>,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` around an opened modal.
    pub fn new(modal: EditModal) -> Self {
        let should_quit = !modal.is_open();
        Self {
            edit: EditState::new(modal),
            committed: None,
            should_quit,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());
        draw_edit(&self.edit, frame, main_area);
        draw_status_bar(
            &StatusBarContext::from_modal(self.edit.modal()),
            frame,
            status_area,
        );
    }

    /// Handles a key event by forwarding it to the edit screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.edit.handle_key(key) {
            Action::None => {}
            Action::Commit(payload) => {
                self.committed = Some(payload);
                self.should_quit = true;
            }
            Action::Close => self.should_quit = true,
        }
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The payload committed by the modal, if any.
    pub fn committed(&self) -> Option<&Payload> {
        self.committed.as_ref()
    }

    /// Takes the committed payload out of the app.
    pub fn take_committed(&mut self) -> Option<Payload> {
        self.committed.take()
    }
}
