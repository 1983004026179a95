//! Campers: rows, creation input, and the PATCH model.

use super::{require_in_range, require_non_empty};
use crate::error::ValidationError;
use serde::Deserialize;
use std::ops::RangeInclusive;

/// Allowed camper ages, inclusive.
pub const AGE_RANGE: RangeInclusive<i64> = 8..=18;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Camper {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Body of `POST /campers`.
#[derive(Clone, Debug, Deserialize)]
pub struct NewCamper {
    pub name: String,
    pub age: i64,
}

impl NewCamper {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_in_range("age", self.age, &AGE_RANGE)
    }
}

/// Fields a client may change on an existing camper. `None` leaves the field as is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CamperPatch {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl Camper {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)?;
        require_in_range("age", self.age, &AGE_RANGE)
    }

    /// Validates the patched values and only then writes them; on error `self` is untouched.
    pub fn apply(&mut self, patch: CamperPatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            require_non_empty("name", name)?;
        }
        if let Some(age) = patch.age {
            require_in_range("age", age, &AGE_RANGE)?;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        Ok(())
    }
}
