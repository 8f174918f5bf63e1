//! Form widget: one bordered input per field, errors inline.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::form::Form;

/// Rows taken by one field: top border, input, bottom border.
pub const ROW_HEIGHT: u16 = 3;

/// Height needed to render every field of `form`.
pub fn form_height(form: &Form) -> u16 {
    u16::try_from(form.len())
        .unwrap_or(u16::MAX)
        .saturating_mul(ROW_HEIGHT)
}

/// Renders a form within the given area, highlighting the field at `focus`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, focus: usize, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = form
        .fields()
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields().iter().enumerate() {
        let is_focused = i == focus;
        let error = field.error();

        let border_color = if error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let block = Block::default()
            .title(field.spec.label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = if field.value.is_empty() && !is_focused {
            vec![Span::styled(
                field.spec.placeholder,
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            vec![Span::raw(field.value.as_str())]
        };
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, rows[i]);

        // Error sits on the bottom border of its row
        if let Some(err) = error {
            let error_line = Paragraph::new(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red),
            ));
            let err_area = Rect {
                x: rows[i].x + 2,
                y: rows[i].y + ROW_HEIGHT.saturating_sub(1),
                width: rows[i].width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}
