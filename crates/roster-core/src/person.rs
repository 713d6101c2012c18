//! The person record and its variant discriminant.
//!
//! There is a single persisted entity. Students and teachers are not separate
//! types; they are people whose `kind` makes one of the optional fields
//! meaningful.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Which variant a record represents. Selects whether `major` or `subject`
/// carries a value.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum PersonKind {
  #[default]
  Person,
  Student,
  Teacher,
}

impl PersonKind {
  /// Parse the wire representation, mapping failures to [`Error::UnknownKind`].
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownKind(s.to_owned()))
  }

  /// The kind after this one, wrapping around.
  pub fn next(self) -> Self {
    match self {
      Self::Person => Self::Student,
      Self::Student => Self::Teacher,
      Self::Teacher => Self::Person,
    }
  }

  /// The kind before this one, wrapping around.
  pub fn prev(self) -> Self {
    match self {
      Self::Person => Self::Teacher,
      Self::Student => Self::Person,
      Self::Teacher => Self::Student,
    }
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A persisted person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:         Uuid,
  pub name:       String,
  /// Any finite number; fractional ages are kept as given.
  #[serde(serialize_with = "serialize_age")]
  pub age:        f64,
  pub kind:       PersonKind,
  /// Only meaningful for [`PersonKind::Student`].
  pub major:      Option<String>,
  /// Only meaningful for [`PersonKind::Teacher`].
  pub subject:    Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

impl Person {
  /// The self-introduction shown on a record's card.
  ///
  /// A student without a major, or a teacher without a subject, introduces
  /// themselves like a plain person.
  pub fn introduce(&self) -> String {
    let base = format!("Hello, my name is {}", self.name);
    match (self.kind, self.major.as_deref(), self.subject.as_deref()) {
      (PersonKind::Student, Some(major), _) => {
        format!("{base} and I'm studying {major}.")
      }
      (PersonKind::Teacher, _, Some(subject)) => {
        format!("{base} and I teach {subject}.")
      }
      _ => format!("{base}."),
    }
  }

  /// The variant-specific `(label, value)` pair, if the kind has one.
  pub fn extra_field(&self) -> Option<(&'static str, &str)> {
    match self.kind {
      PersonKind::Person => None,
      PersonKind::Student => {
        Some(("Major", self.major.as_deref().unwrap_or_default()))
      }
      PersonKind::Teacher => {
        Some(("Teaching", self.subject.as_deref().unwrap_or_default()))
      }
    }
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::PersonStore::insert`].
/// `id` and `created_at` are always set by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPerson {
  pub name:    String,
  #[serde(serialize_with = "serialize_age")]
  pub age:     f64,
  pub kind:    PersonKind,
  pub major:   Option<String>,
  pub subject: Option<String>,
}

impl NewPerson {
  /// Build an insert payload, keeping `major` only for students and
  /// `subject` only for teachers.
  pub fn new(
    name: impl Into<String>,
    age: f64,
    kind: PersonKind,
    major: Option<String>,
    subject: Option<String>,
  ) -> Self {
    Self {
      name: name.into(),
      age,
      kind,
      major: major.filter(|_| kind == PersonKind::Student),
      subject: subject.filter(|_| kind == PersonKind::Teacher),
    }
  }
}

/// Whole ages go on the wire as JSON integers (`29`, not `29.0`).
fn serialize_age<S>(age: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
  S: Serializer,
{
  const EXACT: f64 = 9_007_199_254_740_992.0;
  if age.fract() == 0.0 && age.abs() < EXACT {
    serializer.serialize_i64(*age as i64)
  } else {
    serializer.serialize_f64(*age)
  }
}
