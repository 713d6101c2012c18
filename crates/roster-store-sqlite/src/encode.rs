//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed nanosecond fraction
//! and a `Z` suffix, so that string order matches time order. UUIDs are stored
//! as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use roster_core::person::{Person, PersonKind};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── PersonKind ───────────────────────────────────────────────────────────────

pub fn encode_kind(k: PersonKind) -> &'static str { k.into() }

pub fn decode_kind(s: &str) -> Result<PersonKind> { Ok(PersonKind::parse(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw column values read directly from a `people` row.
pub struct RawPerson {
  pub id:         String,
  pub name:       String,
  pub age:        f64,
  pub kind:       String,
  pub major:      Option<String>,
  pub subject:    Option<String>,
  pub created_at: String,
}

impl RawPerson {
  /// Read a row selected as `id, name, age, kind, major, subject, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      age:        row.get(2)?,
      kind:       row.get(3)?,
      major:      row.get(4)?,
      subject:    row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      age:        self.age,
      kind:       decode_kind(&self.kind)?,
      major:      self.major,
      subject:    self.subject,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
