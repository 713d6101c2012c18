//! "Add person" form — right panel on the form screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{Form, FormField};

/// Render `form` into `area`.
pub fn draw(f: &mut Frame, area: Rect, form: &Form) {
  let block = Block::default()
    .title(" Add New Person ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let mut lines = vec![
    text_line("Name", &form.name, form.focus == FormField::Name),
    text_line("Age", &form.age, form.focus == FormField::Age),
    field_line(
      "Kind",
      format!("‹ {} ›", form.kind),
      form.focus == FormField::Kind,
    ),
  ];

  if let Some(label) = form.extra_label() {
    lines.push(text_line(label, form.extra_text(), form.focus == FormField::Extra));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    "Enter to add, Esc to cancel",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines).block(block), area);
}

/// A text input; the focused one shows a trailing cursor.
fn text_line(label: &str, value: &str, focused: bool) -> Line<'static> {
  let cursor = if focused { "_" } else { "" };
  field_line(label, format!("{value}{cursor}"), focused)
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
  let label_style = if focused {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Cyan)
  };

  Line::from(vec![
    Span::styled(format!("{label:<9}"), label_style),
    Span::raw(value),
  ])
}
