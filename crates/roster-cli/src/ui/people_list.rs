//! People list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};
use roster_core::person::PersonKind;

use crate::app::App;

/// Render the people list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = if app.loading {
    " People (loading…) ".to_string()
  } else if app.offline {
    format!(" People ({}, sample) ", app.people.len())
  } else {
    format!(" People ({}) ", app.people.len())
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = app
    .people
    .iter()
    .map(|person| {
      let kind_style = match person.kind {
        PersonKind::Person => Style::default().fg(Color::Gray),
        PersonKind::Student => Style::default().fg(Color::Green),
        PersonKind::Teacher => Style::default().fg(Color::Magenta),
      };
      ListItem::new(Line::from(vec![
        Span::raw(person.name.clone()),
        Span::styled(format!(" ({})", person.kind), kind_style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(if app.people.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .block(block)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    area,
    &mut state,
  );
}
