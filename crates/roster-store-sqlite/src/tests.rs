//! Integration tests for `SqliteStore` against an in-memory database.

use roster_core::{
  patch::{Patch, PersonPatch},
  person::{NewPerson, PersonKind},
  store::PersonStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn student(name: &str) -> NewPerson {
  NewPerson::new(name, 20.0, PersonKind::Student, Some("Computer Science".into()), None)
}

fn teacher(name: &str) -> NewPerson {
  NewPerson::new(name, 45.0, PersonKind::Teacher, None, Some("Mathematics".into()))
}

// ─── Insert / lookup ─────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_by_id() {
  let s = store().await;

  let person = s.insert(student("Emma Watson")).await.unwrap();
  assert_eq!(person.kind, PersonKind::Student);

  let fetched = s.find_by_id(person.id).await.unwrap();
  assert_eq!(fetched, Some(person));
}

#[tokio::test]
async fn fractional_age_is_stored_exactly() {
  let s = store().await;
  let person = s
    .insert(NewPerson::new("Ada", 29.5, PersonKind::Person, None, None))
    .await
    .unwrap();

  let fetched = s.find_by_id(person.id).await.unwrap().unwrap();
  assert_eq!(fetched.age, 29.5);
}

#[tokio::test]
async fn insert_assigns_distinct_ids() {
  let s = store().await;
  let a = s.insert(student("A")).await.unwrap();
  let b = s.insert(student("B")).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn find_by_id_missing_returns_none() {
  let s = store().await;
  let result = s.find_by_id(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn empty_name_violates_schema() {
  let s = store().await;
  let result = s.insert(NewPerson::new("", 30.0, PersonKind::Person, None, None)).await;
  assert!(result.is_err());
  assert!(s.find_all().await.unwrap().is_empty());
}

// ─── Ordering ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_all_newest_first() {
  let s = store().await;
  for name in ["first", "second", "third"] {
    s.insert(student(name)).await.unwrap();
  }

  let all = s.find_all().await.unwrap();
  let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["third", "second", "first"]);
  assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn find_all_interleaves_kinds_by_creation() {
  let s = store().await;
  s.insert(student("first")).await.unwrap();
  s.insert(teacher("second")).await.unwrap();
  s.insert(student("third")).await.unwrap();

  let kinds: Vec<_> = s.find_all().await.unwrap().into_iter().map(|p| p.kind).collect();
  assert_eq!(kinds, [PersonKind::Student, PersonKind::Teacher, PersonKind::Student]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_merges_only_supplied_fields() {
  let s = store().await;
  let original = s.insert(student("Emma")).await.unwrap();

  let patch = PersonPatch { age: Some(31.0), ..Default::default() };
  let updated = s.update(original.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.age, 31.0);
  assert_eq!(updated.name, original.name);
  assert_eq!(updated.kind, original.kind);
  assert_eq!(updated.major, original.major);
  assert_eq!(updated.created_at, original.created_at);

  let stored = s.find_by_id(original.id).await.unwrap().unwrap();
  assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_can_clear_nullable_fields() {
  let s = store().await;
  let original = s.insert(student("Emma")).await.unwrap();

  let patch = PersonPatch { major: Patch::Clear, ..Default::default() };
  let updated = s.update(original.id, patch).await.unwrap().unwrap();
  assert_eq!(updated.major, None);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let patch = PersonPatch { age: Some(1.0), ..Default::default() };
  assert!(s.update(Uuid::new_v4(), patch).await.unwrap().is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_record() {
  let s = store().await;
  let keep = s.insert(student("keep")).await.unwrap();
  let gone = s.insert(teacher("gone")).await.unwrap();

  assert!(s.delete(gone.id).await.unwrap());
  assert!(s.find_by_id(gone.id).await.unwrap().is_none());

  let all = s.find_all().await.unwrap();
  assert_eq!(all, vec![keep]);
}

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete(Uuid::new_v4()).await.unwrap());
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn closed_store_reports_errors() {
  let s = store().await;
  s.clone().close().await.unwrap();

  assert!(s.find_all().await.is_err());
  assert!(s.insert(student("late")).await.is_err());
}
