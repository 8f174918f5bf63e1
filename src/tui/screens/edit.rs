//! Edit screen: the modal's form, its Save control and the typed
//! confirmation popup.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use serde_json::Value;

use crate::form::{EditModal, ModalMsg, ModalOutcome};
use crate::tui::action::Action;
use crate::tui::widgets::form::{draw_form, form_height};

/// State for the edit screen.
#[derive(Debug, Clone)]
pub struct EditState {
    modal: EditModal,
    focus: usize,
    error: Option<String>,
}

impl EditState {
    /// Wraps an already opened modal. Focus starts on the first field.
    pub fn new(modal: EditModal) -> Self {
        Self {
            modal,
            focus: 0,
            error: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.modal.is_confirming() {
            return self.handle_confirm_key(key);
        }
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.focus_prev();
                Action::None
            }
            KeyCode::Char(ch) => {
                self.edit_focused(|value| value.push(ch));
                Action::None
            }
            KeyCode::Backspace => {
                self.edit_focused(|value| {
                    value.pop();
                });
                Action::None
            }
            KeyCode::Enter => self.dispatch(ModalMsg::Save),
            KeyCode::Esc => self.dispatch(ModalMsg::Close),
            _ => Action::None,
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Action {
        let typed = self
            .modal
            .gate()
            .map(|g| g.typed().to_string())
            .unwrap_or_default();
        match key.code {
            KeyCode::Char(ch) => {
                let mut text = typed;
                text.push(ch);
                self.dispatch(ModalMsg::ConfirmText(text))
            }
            KeyCode::Backspace => {
                let mut text = typed;
                text.pop();
                self.dispatch(ModalMsg::ConfirmText(text))
            }
            KeyCode::Enter => self.dispatch(ModalMsg::Confirm),
            KeyCode::Esc => self.dispatch(ModalMsg::CancelConfirmation),
            _ => Action::None,
        }
    }

    fn dispatch(&mut self, msg: ModalMsg) -> Action {
        match self.modal.apply(msg) {
            ModalOutcome::None => Action::None,
            ModalOutcome::Commit(payload) => Action::Commit(payload),
            ModalOutcome::Rejected(err) => {
                self.error = Some(err.to_string());
                Action::None
            }
            ModalOutcome::Closed => Action::Close,
        }
    }

    fn edit_focused(&mut self, change: impl FnOnce(&mut String)) {
        let Some(field) = self
            .modal
            .form()
            .and_then(|state| state.form().field(self.focus))
        else {
            return;
        };
        let key = field.spec.key.to_string();
        let mut value = field.value.clone();
        change(&mut value);
        self.error = None;
        self.dispatch(ModalMsg::Edit { key, value });
    }

    fn field_count(&self) -> usize {
        self.modal.form().map_or(0, |state| state.form().len())
    }

    fn focus_next(&mut self) {
        let len = self.field_count();
        if len == 0 {
            return;
        }
        self.focus = (self.focus + 1) % len;
    }

    fn focus_prev(&mut self) {
        let len = self.field_count();
        if len == 0 {
            return;
        }
        self.focus = (self.focus + len - 1) % len;
    }

    /// Index of the focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Returns a reference to the modal for rendering.
    pub fn modal(&self) -> &EditModal {
        &self.modal
    }

    /// Message from the last rejected commit, cleared by the next edit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Renders a seed value for the read-only header.
fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn control_hint(label: &str, enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled(
            format!("[{label}]"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("[{label} disabled]"),
            Style::default().fg(Color::DarkGray),
        )
    }
}

/// Renders the edit screen, with the confirmation popup on top while it is
/// showing.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_edit(state: &EditState, frame: &mut Frame, area: Rect) {
    let Some(form_state) = state.modal().form() else {
        return;
    };
    let schema = form_state.schema();

    let block = Block::default()
        .title(format!(" {} ", schema.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_height = u16::try_from(schema.display_keys().len()).unwrap_or(u16::MAX);
    let [header_area, form_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(header_height),
        Constraint::Length(form_height(form_state.form())),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let header: Vec<Line> = schema
        .display_keys()
        .iter()
        .map(|key| {
            Line::from(vec![
                Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
                Span::raw(display_value(form_state.seed().get(*key))),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(header), header_area);

    draw_form(form_state.form(), state.focus(), frame, form_area);

    if let Some(err) = state.error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer = Paragraph::new(Line::from(vec![
        control_hint("Enter: Save", state.modal().can_save()),
        Span::styled(
            "  Tab/Shift+Tab: next/prev  Esc: close",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(footer, footer_area);

    if let Some(gate) = state.modal().gate().filter(|g| g.is_awaiting()) {
        let [popup_area] = Layout::vertical([Constraint::Length(7)])
            .flex(Flex::Center)
            .areas(area);
        let [popup_area] = Layout::horizontal([Constraint::Length(50)])
            .flex(Flex::Center)
            .areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let popup = Block::default()
            .title(" Please confirm ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let lines = vec![
            Line::from(format!("Type \"{}\" to confirm this update.", gate.literal())),
            Line::from(""),
            Line::from(vec![
                Span::raw("> "),
                Span::raw(gate.typed().to_string()),
                Span::styled(
                    "\u{2588}",
                    Style::default().add_modifier(Modifier::SLOW_BLINK),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                control_hint("Enter: Update", state.modal().can_confirm()),
                Span::styled("  Esc: cancel", Style::default().fg(Color::DarkGray)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(popup), popup_area);
    }
}
