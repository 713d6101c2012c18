//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  patch::PersonPatch,
  person::{NewPerson, Person},
  store::PersonStore,
};

use crate::{
  Result,
  encode::{RawPerson, encode_dt, encode_kind, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(?path, "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Every clone of this store fails with a
  /// database error afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewPerson) -> Result<Person> {
    let person = Person {
      id:         Uuid::new_v4(),
      name:       input.name,
      age:        input.age,
      kind:       input.kind,
      major:      input.major,
      subject:    input.subject,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(person.id);
    let name     = person.name.clone();
    let age      = person.age;
    let kind_str = encode_kind(person.kind);
    let major    = person.major.clone();
    let subject  = person.subject.clone();
    let at_str   = encode_dt(person.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (id, name, age, kind, major, subject, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, name, age, kind_str, major, subject, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(person)
  }

  async fn find_all(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, age, kind, major, subject, created_at
           FROM people
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name, age, kind, major, subject, created_at
               FROM people WHERE id = ?1",
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn update(&self, id: Uuid, patch: PersonPatch) -> Result<Option<Person>> {
    // Read, merge in memory, write the full row back. Concurrent writers to
    // the same id race; the last write wins.
    let Some(mut person) = self.find_by_id(id).await? else {
      return Ok(None);
    };
    patch.apply_to(&mut person);

    let id_str   = encode_uuid(person.id);
    let name     = person.name.clone();
    let age      = person.age;
    let kind_str = encode_kind(person.kind);
    let major    = person.major.clone();
    let subject  = person.subject.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE people
           SET name = ?2, age = ?3, kind = ?4, major = ?5, subject = ?6
           WHERE id = ?1",
          rusqlite::params![id_str, name, age, kind_str, major, subject],
        )?)
      })
      .await?;

    // The row may have been deleted between the read and the write.
    Ok((changed > 0).then_some(person))
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    Ok(changed > 0)
  }
}
