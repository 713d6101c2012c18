//! Application state machine and event dispatcher.

use std::sync::Arc;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use roster_core::person::{NewPerson, Person, PersonKind};
use uuid::Uuid;

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the people list; right pane shows the selected card.
  List,
  /// Focus on the "add person" form in the right pane.
  Form,
}

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
  Name,
  Age,
  Kind,
  /// Major for students, subject for teachers. Hidden for plain people.
  Extra,
}

/// The "add person" form. Keeps both optional texts so switching kind back
/// and forth does not lose input.
#[derive(Debug, Clone)]
pub struct Form {
  pub name:    String,
  pub age:     String,
  pub kind:    PersonKind,
  pub major:   String,
  pub subject: String,
  pub focus:   FormField,
}

impl Default for Form {
  fn default() -> Self {
    Self {
      name:    String::new(),
      age:     String::new(),
      kind:    PersonKind::Person,
      major:   String::new(),
      subject: String::new(),
      focus:   FormField::Name,
    }
  }
}

impl Form {
  /// Fields currently shown, in tab order.
  pub fn visible_fields(&self) -> &'static [FormField] {
    match self.kind {
      PersonKind::Person => &[FormField::Name, FormField::Age, FormField::Kind],
      PersonKind::Student | PersonKind::Teacher => {
        &[FormField::Name, FormField::Age, FormField::Kind, FormField::Extra]
      }
    }
  }

  /// Label of the optional field for the selected kind.
  pub fn extra_label(&self) -> Option<&'static str> {
    match self.kind {
      PersonKind::Person => None,
      PersonKind::Student => Some("Major"),
      PersonKind::Teacher => Some("Subject"),
    }
  }

  /// Current text of the optional field for the selected kind.
  pub fn extra_text(&self) -> &str {
    match self.kind {
      PersonKind::Person => "",
      PersonKind::Student => &self.major,
      PersonKind::Teacher => &self.subject,
    }
  }

  pub fn focus_next(&mut self) { self.move_focus(1); }

  pub fn focus_prev(&mut self) { self.move_focus(-1); }

  fn move_focus(&mut self, step: isize) {
    let fields = self.visible_fields();
    let len = fields.len() as isize;
    let at = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
    self.focus = fields[(at + step).rem_euclid(len) as usize];
  }

  /// The text buffer behind the focused field, if it is a text field.
  fn focused_text(&mut self) -> Option<&mut String> {
    match (self.focus, self.kind) {
      (FormField::Name, _) => Some(&mut self.name),
      (FormField::Age, _) => Some(&mut self.age),
      (FormField::Extra, PersonKind::Student) => Some(&mut self.major),
      (FormField::Extra, PersonKind::Teacher) => Some(&mut self.subject),
      _ => None,
    }
  }

  /// Build the create request, or a message explaining what is missing.
  pub fn to_new_person(&self) -> Result<NewPerson, &'static str> {
    let name = self.name.trim();
    let age = self.age.trim();
    if name.is_empty() || age.is_empty() {
      return Err("Please fill all required fields");
    }
    let age: i64 = age.parse().map_err(|_| "Age must be a whole number")?;

    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.trim().to_owned());
    Ok(NewPerson::new(
      name,
      age as f64,
      self.kind,
      non_empty(&self.major),
      non_empty(&self.subject),
    ))
  }
}

// ─── Sample data ──────────────────────────────────────────────────────────────

/// Records shown when the server cannot be reached.
pub fn sample_people() -> Vec<Person> {
  let sample = |name: &str, age, kind, major: Option<&str>, subject: Option<&str>| Person {
    id: Uuid::nil(),
    name: name.to_owned(),
    age,
    kind,
    major: major.map(str::to_owned),
    subject: subject.map(str::to_owned),
    created_at: Utc::now(),
  };
  vec![
    sample("Alex Johnson", 30.0, PersonKind::Person, None, None),
    sample("Emma Watson", 20.0, PersonKind::Student, Some("Computer Science"), None),
    sample("Dr. James Wilson", 45.0, PersonKind::Teacher, None, Some("Mathematics")),
  ]
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Records from the last successful fetch, or the sample set.
  pub people: Vec<Person>,

  /// `true` while `people` holds the sample set.
  pub offline: bool,

  /// A fetch is queued or in flight. The event loop draws a frame and then
  /// runs [`App::load_people`] whenever this is set.
  pub loading: bool,

  /// Shown above the body while the last fetch failed.
  pub error_banner: Option<String>,

  /// Cursor position within `people`.
  pub list_cursor: usize,

  /// The "add person" form.
  pub form: Form,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with an empty list and the first fetch queued.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::List,
      people: Vec::new(),
      offline: false,
      loading: true,
      error_banner: None,
      list_cursor: 0,
      form: Form::default(),
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch every record. Falls back to [`sample_people`] and raises the error
  /// banner if the server is unreachable.
  pub async fn load_people(&mut self) {
    self.loading = true;
    match self.client.list_people().await {
      Ok(people) => {
        self.people = people;
        self.offline = false;
        self.error_banner = None;
      }
      Err(e) => {
        tracing::warn!(error = %e, "fetching people failed");
        self.people = sample_people();
        self.offline = true;
        self.error_banner = Some(format!(
          "Failed to load data. Make sure the backend is running at {}.",
          self.client.base_url()
        ));
      }
    }
    self.loading = false;
    self.list_cursor = self.list_cursor.min(self.people.len().saturating_sub(1));
  }

  /// Queue a full re-fetch for the next turn of the event loop.
  pub fn request_reload(&mut self) { self.loading = true; }

  /// The record under the list cursor, if any.
  pub fn selected(&self) -> Option<&Person> { self.people.get(self.list_cursor) }

  // ── Mutations ─────────────────────────────────────────────────────────────

  async fn submit_form(&mut self) {
    let input = match self.form.to_new_person() {
      Ok(input) => input,
      Err(msg) => {
        self.status_msg = msg.to_string();
        return;
      }
    };

    match self.client.create_person(&input).await {
      Ok(person) => {
        tracing::info!(id = %person.id, "person added");
        self.form = Form::default();
        self.screen = Screen::List;
        self.status_msg.clear();
        self.list_cursor = 0;
        self.request_reload();
      }
      Err(e) => self.status_msg = format!("Failed to add person: {e}"),
    }
  }

  async fn delete_selected(&mut self) {
    if self.offline {
      self.status_msg = "Sample records cannot be deleted".into();
      return;
    }
    let Some(id) = self.selected().map(|p| p.id) else {
      return;
    };

    match self.client.delete_person(id).await {
      Ok(()) => {
        tracing::info!(%id, "person deleted");
        self.request_reload();
      }
      Err(e) => self.status_msg = format!("Failed to delete person: {e}"),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::List => self.handle_list_key(key).await,
      Screen::Form => {
        self.handle_form_key(key).await;
        true
      }
    }
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        if self.list_cursor + 1 < self.people.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Char('a') => {
        self.screen = Screen::Form;
        self.status_msg.clear();
      }
      KeyCode::Char('d') | KeyCode::Delete => self.delete_selected().await,
      KeyCode::Char('r') => self.request_reload(),

      _ => {}
    }
    true
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.screen = Screen::List;
        self.status_msg.clear();
      }
      KeyCode::Enter => self.submit_form().await,
      KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
      KeyCode::Left if self.form.focus == FormField::Kind => {
        self.form.kind = self.form.kind.prev();
      }
      KeyCode::Right | KeyCode::Char(' ') if self.form.focus == FormField::Kind => {
        self.form.kind = self.form.kind.next();
      }
      KeyCode::Backspace => {
        if let Some(text) = self.form.focused_text() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.form.focused_text() {
          text.push(c);
        }
      }
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use roster_store_sqlite::SqliteStore;
  use tokio::net::TcpListener;

  use crate::client::ApiConfig;

  use super::*;

  /// An [`App`] talking to a live server over an empty in-memory store.
  async fn app_with_server() -> App {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, roster_server::app(Arc::new(store))).await.unwrap();
    });

    let client = ApiClient::new(ApiConfig { base_url: format!("http://{addr}") }).unwrap();
    App::new(client)
  }

  fn filled(kind: PersonKind) -> Form {
    Form {
      name: "Ada".into(),
      age: "29".into(),
      kind,
      major: "Physics".into(),
      subject: "Math".into(),
      ..Form::default()
    }
  }

  #[test]
  fn request_carries_only_the_field_matching_kind() {
    let teacher = filled(PersonKind::Teacher).to_new_person().unwrap();
    assert_eq!(teacher.major, None);
    assert_eq!(teacher.subject.as_deref(), Some("Math"));

    let person = filled(PersonKind::Person).to_new_person().unwrap();
    assert_eq!(person.major, None);
    assert_eq!(person.subject, None);
  }

  #[test]
  fn required_fields_are_checked() {
    let mut form = filled(PersonKind::Person);
    form.age.clear();
    assert_eq!(form.to_new_person(), Err("Please fill all required fields"));

    form.age = "twenty".into();
    assert_eq!(form.to_new_person(), Err("Age must be a whole number"));
  }

  #[test]
  fn extra_field_is_hidden_for_plain_people() {
    let mut form = Form { focus: FormField::Kind, ..Form::default() };
    form.focus_next();
    assert_eq!(form.focus, FormField::Name);

    form.kind = PersonKind::Student;
    form.focus = FormField::Kind;
    form.focus_next();
    assert_eq!(form.focus, FormField::Extra);
    assert_eq!(form.extra_label(), Some("Major"));
  }

  #[test]
  fn typing_goes_to_the_kind_specific_buffer() {
    let mut form = Form { kind: PersonKind::Teacher, focus: FormField::Extra, ..Form::default() };
    form.focused_text().unwrap().push_str("Art");
    assert_eq!(form.subject, "Art");
    assert!(form.major.is_empty());

    form.focus = FormField::Kind;
    assert!(form.focused_text().is_none());
  }

  #[test]
  fn sample_set_covers_every_kind() {
    let samples = sample_people();
    let kinds: Vec<_> = samples.iter().map(|p| p.kind).collect();
    assert_eq!(kinds, [PersonKind::Person, PersonKind::Student, PersonKind::Teacher]);
    assert_eq!(
      samples[1].introduce(),
      "Hello, my name is Emma Watson and I'm studying Computer Science."
    );
  }

  #[tokio::test]
  async fn unreachable_server_falls_back_to_samples() {
    let client = ApiClient::new(ApiConfig { base_url: "http://127.0.0.1:9".into() }).unwrap();
    let mut app = App::new(client);
    app.load_people().await;

    assert!(!app.loading);
    assert!(app.offline);
    assert!(app.error_banner.is_some());
    assert_eq!(app.people.len(), 3);

    app.delete_selected().await;
    assert_eq!(app.status_msg, "Sample records cannot be deleted");
    assert_eq!(app.people.len(), 3);
  }

  #[tokio::test]
  async fn first_fetch_is_queued_and_cleared() {
    let mut app = app_with_server().await;
    assert!(app.loading);
    assert!(app.people.is_empty());

    app.load_people().await;
    assert!(!app.loading);
    assert!(!app.offline);
    assert!(app.error_banner.is_none());
    assert!(app.people.is_empty());
  }

  #[tokio::test]
  async fn submit_queues_a_full_refetch() {
    let mut app = app_with_server().await;
    app.load_people().await;

    // Written behind the app's back; only a full re-fetch can surface it.
    let other = NewPerson::new("Alex", 30.0, PersonKind::Person, None, None);
    app.client.create_person(&other).await.unwrap();

    app.screen = Screen::Form;
    app.form = filled(PersonKind::Student);
    app.submit_form().await;
    assert_eq!(app.screen, Screen::List);
    assert!(app.loading);
    assert!(app.form.name.is_empty());

    app.load_people().await;
    assert!(!app.loading);
    assert!(!app.offline);
    let names: Vec<_> = app.people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ada", "Alex"]);
    assert_eq!(app.people[0].major.as_deref(), Some("Physics"));
    assert_eq!(app.people[0].subject, None);
    assert_ne!(app.people[0].id, Uuid::nil());
  }

  #[tokio::test]
  async fn delete_queues_a_full_refetch() {
    let mut app = app_with_server().await;
    for name in ["Alex", "Emma"] {
      let input = NewPerson::new(name, 30.0, PersonKind::Person, None, None);
      app.client.create_person(&input).await.unwrap();
    }
    app.load_people().await;
    assert_eq!(app.people.len(), 2);

    app.list_cursor = 1;
    app.delete_selected().await;
    assert!(app.loading);
    assert_eq!(app.people.len(), 2);

    app.load_people().await;
    assert!(!app.offline);
    let names: Vec<_> = app.people.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Emma"]);
    assert_eq!(app.list_cursor, 0);
  }

  #[tokio::test]
  async fn reload_key_queues_a_fetch() {
    let mut app = app_with_server().await;
    app.load_people().await;

    assert!(app.handle_key(KeyEvent::from(KeyCode::Char('r'))).await);
    assert!(app.loading);
  }
}
