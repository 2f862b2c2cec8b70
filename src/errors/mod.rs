use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Field-keyed validation messages, e.g. `{"name": ["Name is required"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message of the first field, used as the summary line.
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .values()
            .next()
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> ServiceResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_message().unwrap_or("Invalid input"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Tournament,
    Player,
    Match,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Tournament => "Tournament",
            Entity::Player => "Player",
            Entity::Match => "Match",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(FieldErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ServiceError::Validation(FieldErrors::single(field, message))
    }

    pub fn not_found(entity: Entity, id: i64) -> Self {
        ServiceError::NotFound { entity, id }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
