//! Activities: rows and the seeding input.

use super::require_non_empty;
use crate::error::ValidationError;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub difficulty: i64,
}

/// Activities are not created over HTTP; this is the seeding path.
#[derive(Clone, Debug)]
pub struct NewActivity {
    pub name: String,
    pub difficulty: i64,
}

impl NewActivity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("name", &self.name)
    }
}
