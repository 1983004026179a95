//! Entities and their field rules. Validation is explicit: every constructor and update
//! returns a `Result` and nothing reaches storage without passing it.

mod activity;
mod camper;
mod signup;

pub use activity::{Activity, NewActivity};
pub use camper::{Camper, CamperPatch, NewCamper, AGE_RANGE};
pub use signup::{NewSignup, Signup, TIME_RANGE};

use crate::error::ValidationError;
use std::ops::RangeInclusive;

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn require_in_range(
    field: &'static str,
    value: i64,
    range: &RangeInclusive<i64>,
) -> Result<(), ValidationError> {
    if !range.contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            value,
        });
    }
    Ok(())
}
