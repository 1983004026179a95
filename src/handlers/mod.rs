//! HTTP handlers for campers, activities, and signups.

pub mod activities;
pub mod campers;
pub mod signups;

#[cfg(test)]
mod tests;

use crate::error::AppError;

/// A path id that is not an integer cannot name a row, so it is reported as not found.
fn parse_id(id_str: &str, entity: &'static str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::NotFound(entity))
}
