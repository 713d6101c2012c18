//! The person resource service: validation and variant rules over a
//! [`PersonStore`].
//!
//! Each operation maps store failures to one [`ApiError`] kind. Reads and
//! deletes report them as internal errors; create and update report them as
//! validation errors.

use std::sync::Arc;

use roster_core::{
  patch::{Patch, PersonPatch},
  person::{NewPerson, Person, PersonKind},
  store::PersonStore,
};
use serde::{
  Deserialize,
  Deserializer,
  de::{self, Unexpected},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── Request bodies ───────────────────────────────────────────────────────────

/// JSON body accepted by `POST /people`. Every field is optional on the wire;
/// presence is checked by [`PersonService::create`].
///
/// `type` is read as a synonym for `kind`. A body carrying both keys is
/// rejected as a duplicate field.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePerson {
  pub name:    Option<String>,
  #[serde(default, deserialize_with = "number_or_numeric_string")]
  pub age:     Option<f64>,
  #[serde(alias = "type")]
  pub kind:    Option<String>,
  pub major:   Option<String>,
  pub subject: Option<String>,
}

/// JSON body accepted by `PUT /people/{id}`.
///
/// `name`, `age` and `kind` are ignored when absent, `null`, empty or zero.
/// `major` and `subject` are cleared by an explicit `null`. `type` behaves as
/// on [`CreatePerson`].
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePerson {
  pub name:    Option<String>,
  #[serde(default, deserialize_with = "number_or_numeric_string")]
  pub age:     Option<f64>,
  #[serde(alias = "type")]
  pub kind:    Option<String>,
  #[serde(default)]
  pub major:   Patch<String>,
  #[serde(default)]
  pub subject: Patch<String>,
}

/// Accepts a JSON number or a string holding one. An empty string reads as
/// absent.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Number(f64),
    Text(String),
  }

  match Option::<Raw>::deserialize(deserializer)? {
    None => Ok(None),
    Some(Raw::Number(n)) => Ok(Some(n)),
    Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
    Some(Raw::Text(s)) => s
      .trim()
      .parse::<f64>()
      .ok()
      .filter(|n| n.is_finite())
      .map(Some)
      .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&s), &"a number")),
  }
}

// ─── Service ──────────────────────────────────────────────────────────────────

/// Request handlers for person records, generic over the backing store.
///
/// Holds no state besides the shared store handle; cloning is cheap.
pub struct PersonService<S> {
  store: Arc<S>,
}

impl<S> Clone for PersonService<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store) }
  }
}

impl<S> PersonService<S>
where
  S: PersonStore,
{
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All records, newest first.
  pub async fn list(&self) -> Result<Vec<Person>, ApiError> {
    self.store.find_all().await.map_err(|e| {
      tracing::warn!(error = %e, "listing people failed");
      ApiError::store(e)
    })
  }

  /// One record. A malformed id is reported as not found.
  pub async fn get(&self, id: &str) -> Result<Person, ApiError> {
    let id = parse_id(id)?;
    self
      .store
      .find_by_id(id)
      .await
      .map_err(|e| {
        tracing::warn!(%id, error = %e, "fetching person failed");
        ApiError::store(e)
      })?
      .ok_or_else(ApiError::person_not_found)
  }

  /// Validate `body`, derive the variant fields from `kind`, and insert.
  pub async fn create(&self, body: CreatePerson) -> Result<Person, ApiError> {
    let (Some(name), Some(age), Some(kind)) = (
      body.name.filter(|n| !n.is_empty()),
      body.age.filter(|a| *a != 0.0),
      body.kind.filter(|k| !k.is_empty()),
    ) else {
      return Err(ApiError::Validation(
        "Name, age, and kind are required".to_string(),
      ));
    };
    let kind = parse_kind(&kind)?;

    let input = NewPerson::new(name, age, kind, body.major, body.subject);
    let person = self.store.insert(input).await.map_err(|e| {
      tracing::warn!(error = %e, "inserting person failed");
      ApiError::Validation(e.to_string())
    })?;

    tracing::info!(id = %person.id, kind = %person.kind, "person created");
    Ok(person)
  }

  /// Merge the supplied fields into an existing record.
  ///
  /// `major` and `subject` are taken as given; a `kind` change does not
  /// re-derive them.
  pub async fn update(&self, id: &str, body: UpdatePerson) -> Result<Person, ApiError> {
    let id = parse_id(id)?;
    let rejected = |e: S::Error| {
      tracing::warn!(%id, error = %e, "updating person failed");
      ApiError::Validation(e.to_string())
    };

    if self.store.find_by_id(id).await.map_err(rejected)?.is_none() {
      return Err(ApiError::person_not_found());
    }

    let patch = PersonPatch {
      name:    body.name.filter(|n| !n.is_empty()),
      age:     body.age.filter(|a| *a != 0.0),
      kind:    body
        .kind
        .filter(|k| !k.is_empty())
        .map(|k| parse_kind(&k))
        .transpose()?,
      major:   body.major,
      subject: body.subject,
    };

    let person = self
      .store
      .update(id, patch)
      .await
      .map_err(rejected)?
      .ok_or_else(ApiError::person_not_found)?;

    tracing::info!(%id, "person updated");
    Ok(person)
  }

  /// Hard-delete a record.
  pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
    let id = parse_id(id)?;
    let deleted = self.store.delete(id).await.map_err(|e| {
      tracing::warn!(%id, error = %e, "deleting person failed");
      ApiError::store(e)
    })?;

    if !deleted {
      return Err(ApiError::person_not_found());
    }
    tracing::info!(%id, "person deleted");
    Ok(())
  }
}

fn parse_id(id: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(id).map_err(|_| ApiError::person_not_found())
}

fn parse_kind(kind: &str) -> Result<PersonKind, ApiError> {
  PersonKind::parse(kind).map_err(|e| ApiError::Validation(e.to_string()))
}
