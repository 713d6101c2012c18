//! Person card — right panel on the list screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use roster_core::person::Person;

/// Render the card for `person` into `area`.
pub fn draw(f: &mut Frame, area: Rect, person: Option<&Person>) {
  let Some(person) = person else {
    let block = Block::default()
      .title(" Card ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("No people yet. Press a to add one.")
        .style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let block = Block::default()
    .title(format!(" {} ({}) ", person.name, person.kind))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

  let mut lines = vec![
    Line::from(vec![
      Span::styled("Age: ", label),
      Span::raw(person.age.to_string()),
    ]),
    Line::from(""),
    Line::from(Span::styled(
      person.introduce(),
      Style::default().add_modifier(Modifier::ITALIC),
    )),
  ];

  if let Some((name, value)) = person.extra_field() {
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
      Span::styled(format!("{name}: "), label),
      Span::raw(value.to_string()),
    ]));
  }

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    format!("Added {}", person.created_at.format("%Y-%m-%d %H:%M")),
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}
