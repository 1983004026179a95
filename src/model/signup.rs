//! Signups: rows linking a camper to an activity at an hour of the day.

use super::require_in_range;
use crate::error::ValidationError;
use serde::Deserialize;
use std::ops::RangeInclusive;

/// Hour of day a signup is for.
pub const TIME_RANGE: RangeInclusive<i64> = 0..=23;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Signup {
    pub id: i64,
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
}

/// Body of `POST /signups`. Whether the referenced rows exist is checked by the store.
#[derive(Clone, Debug, Deserialize)]
pub struct NewSignup {
    pub time: i64,
    pub camper_id: i64,
    pub activity_id: i64,
}

impl NewSignup {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_in_range("time", self.time, &TIME_RANGE)
    }
}
