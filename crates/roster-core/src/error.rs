//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("`{0}` is not a valid kind (expected Person, Student, or Teacher)")]
  UnknownKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
