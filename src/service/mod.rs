//! Persistence seam and request checks.

mod crud;
mod validation;
pub use crud::{CampRepository, SqliteRepository};
pub use validation::{RequestValidator, CAMPER_PATCHABLE};
