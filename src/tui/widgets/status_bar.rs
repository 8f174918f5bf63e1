//! Status bar widget: one-line summary of the open modal.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::form::EditModal;

/// Data passed to the status bar widget; decoupled from [`EditModal`] so it
/// can be built directly in tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Resource kind being edited (`event` / `lease`).
    pub resource: String,
    /// Number of fields currently failing validation.
    pub invalid: usize,
    /// Whether the confirmation prompt is showing.
    pub confirming: bool,
}

impl StatusBarContext {
    /// Snapshot of `modal`; empty when the modal is closed.
    pub fn from_modal(modal: &EditModal) -> Self {
        let Some(form) = modal.form() else {
            return Self::default();
        };
        Self {
            resource: form.schema().to_string(),
            invalid: form.validity().invalid_keys().len(),
            confirming: modal.is_confirming(),
        }
    }
}

/// Renders a one-line status bar.
///
/// Display format (left-aligned):
/// - `lease  CONFIRMING` while the prompt is showing (Yellow)
/// - `lease  READY` when every field is valid (Green)
/// - `lease  2 invalid` otherwise (Red)
///
/// Renders nothing if `ctx.resource` is empty (no open modal).
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    if ctx.resource.is_empty() {
        return;
    }

    let cyan = Style::default().fg(Color::Cyan);

    let mut spans = vec![
        Span::styled(ctx.resource.clone(), cyan),
        Span::styled("  ", cyan),
    ];

    if ctx.confirming {
        spans.push(Span::styled("CONFIRMING", Style::default().fg(Color::Yellow)));
    } else if ctx.invalid == 0 {
        spans.push(Span::styled("READY", Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(
            format!("{} invalid", ctx.invalid),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
