//! Partial updates.
//!
//! A JSON update body distinguishes a missing key ("leave it alone") from an
//! explicit `null` ("clear it"). [`Patch`] makes that third state explicit for
//! the nullable fields of a [`Person`].

use serde::{Deserialize, Deserializer};

use crate::person::{Person, PersonKind};

// ─── Patch ───────────────────────────────────────────────────────────────────

/// One nullable field of a partial update.
///
/// Use with `#[serde(default)]` so an absent key becomes
/// [`Patch::Unchanged`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
  /// The key was absent.
  #[default]
  Unchanged,
  /// The key was present with a `null` value.
  Clear,
  /// The key was present with a value.
  Set(T),
}

impl<T> Patch<T> {
  /// Write this patch into `slot`.
  pub fn apply(self, slot: &mut Option<T>) {
    match self {
      Self::Unchanged => {}
      Self::Clear => *slot = None,
      Self::Set(v) => *slot = Some(v),
    }
  }
}

impl<T> From<Option<T>> for Patch<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => Self::Set(v),
      None => Self::Clear,
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Self::from)
  }
}

// ─── PersonPatch ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::PersonStore::update`]. `None` / `Unchanged`
/// fields are left as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
  pub name:    Option<String>,
  pub age:     Option<f64>,
  pub kind:    Option<PersonKind>,
  pub major:   Patch<String>,
  pub subject: Patch<String>,
}

impl PersonPatch {
  /// Merge into `person`. `major` and `subject` are written as given; they
  /// are not re-derived from `kind`.
  pub fn apply_to(self, person: &mut Person) {
    if let Some(name) = self.name {
      person.name = name;
    }
    if let Some(age) = self.age {
      person.age = age;
    }
    if let Some(kind) = self.kind {
      person.kind = kind;
    }
    self.major.apply(&mut person.major);
    self.subject.apply(&mut person.subject);
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;

  fn student() -> Person {
    Person {
      id:         Uuid::new_v4(),
      name:       "Emma".into(),
      age:        20.0,
      kind:       PersonKind::Student,
      major:      Some("CS".into()),
      subject:    None,
      created_at: Utc::now(),
    }
  }

  #[derive(Debug, Deserialize)]
  struct Body {
    #[serde(default)]
    major:   Patch<String>,
    #[serde(default)]
    subject: Patch<String>,
  }

  #[test]
  fn absent_null_and_value_are_distinct() {
    let body: Body = serde_json::from_str(r#"{"major": null, "subject": "Math"}"#).unwrap();
    assert_eq!(body.major, Patch::Clear);
    assert_eq!(body.subject, Patch::Set("Math".into()));

    let empty: Body = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.major, Patch::Unchanged);
    assert_eq!(empty.subject, Patch::Unchanged);
  }

  #[test]
  fn age_only_patch_leaves_other_fields() {
    let mut p = student();
    let before = p.clone();
    PersonPatch { age: Some(29.5), ..Default::default() }.apply_to(&mut p);

    assert_eq!(p.age, 29.5);
    assert_eq!(p.name, before.name);
    assert_eq!(p.kind, before.kind);
    assert_eq!(p.major, before.major);
    assert_eq!(p.subject, before.subject);
  }

  #[test]
  fn clear_removes_value() {
    let mut p = student();
    PersonPatch { major: Patch::Clear, ..Default::default() }.apply_to(&mut p);
    assert_eq!(p.major, None);
  }

  #[test]
  fn kind_change_does_not_touch_optional_fields() {
    let mut p = student();
    PersonPatch { kind: Some(PersonKind::Teacher), ..Default::default() }
      .apply_to(&mut p);
    assert_eq!(p.kind, PersonKind::Teacher);
    assert_eq!(p.major.as_deref(), Some("CS"));
    assert_eq!(p.subject, None);
  }
}
