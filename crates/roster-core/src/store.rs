//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, `roster-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  patch::PersonPatch,
  person::{NewPerson, Person},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a keyed collection of person records.
///
/// There are no multi-record transactions. Concurrent updates to one record
/// are last-write-wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record. The store assigns `id` and `created_at`.
  fn insert(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Every record, most recently created first. Records created at the same
  /// instant come out in reverse insertion order.
  fn find_all(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Point lookup. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Merge `patch` into the stored record and persist it.
  ///
  /// Returns the merged record, or `None` if `id` does not resolve.
  fn update(
    &self,
    id: Uuid,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Remove a record permanently. Returns `false` if it did not exist.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
