//! Handlers for `/people` endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `GET`    | `/people`       | Newest first |
//! | `GET`    | `/people/{id}`  | 404 if not found |
//! | `POST`   | `/people`       | Body: [`CreatePerson`]; returns 201 + stored record |
//! | `PUT`    | `/people/{id}`  | Body: [`UpdatePerson`] |
//! | `DELETE` | `/people/{id}`  | Returns `{"message":"Person deleted"}` |

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{person::Person, store::PersonStore};
use serde_json::{Value, json};

use crate::{
  error::ApiError,
  service::{CreatePerson, PersonService, UpdatePerson},
};

/// `GET /people`
pub async fn list<S>(
  State(service): State<PersonService<S>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
{
  Ok(Json(service.list().await?))
}

/// `GET /people/{id}`
pub async fn get_one<S>(
  State(service): State<PersonService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
{
  Ok(Json(service.get(&id).await?))
}

/// `POST /people` — returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(service): State<PersonService<S>>,
  body: Result<Json<CreatePerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
  let person = service.create(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

/// `PUT /people/{id}`
pub async fn update_one<S>(
  State(service): State<PersonService<S>>,
  Path(id): Path<String>,
  body: Result<Json<UpdatePerson>, JsonRejection>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
{
  let Json(body) = body.map_err(|e| ApiError::Validation(e.body_text()))?;
  Ok(Json(service.update(&id, body).await?))
}

/// `DELETE /people/{id}`
pub async fn delete_one<S>(
  State(service): State<PersonService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: PersonStore,
{
  service.delete(&id).await?;
  Ok(Json(json!({ "message": "Person deleted" })))
}
