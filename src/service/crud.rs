//! Repository trait and its SQLite implementation.

use crate::error::{AppError, ValidationError};
use crate::model::{Activity, Camper, NewActivity, NewCamper, NewSignup, Signup};
use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::SqlitePool;

/// Everything the handlers need from storage. Held as a trait object in `AppState`.
///
/// Write methods run the model's validation before issuing any SQL.
#[async_trait]
pub trait CampRepository: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    async fn list_campers(&self) -> Result<Vec<Camper>, AppError>;
    async fn find_camper(&self, id: i64) -> Result<Option<Camper>, AppError>;
    async fn insert_camper(&self, new: &NewCamper) -> Result<Camper, AppError>;
    /// Persist name and age of an existing camper. `None` if the row is gone.
    async fn update_camper(&self, camper: &Camper) -> Result<Option<Camper>, AppError>;
    /// Signups of one camper, each paired with its activity, in id order.
    async fn signups_for_camper(&self, camper_id: i64) -> Result<Vec<(Signup, Activity)>, AppError>;

    async fn list_activities(&self) -> Result<Vec<Activity>, AppError>;
    async fn find_activity(&self, id: i64) -> Result<Option<Activity>, AppError>;
    async fn insert_activity(&self, new: &NewActivity) -> Result<Activity, AppError>;
    /// Delete an activity and, through the cascade, its signups. `false` if no such row.
    async fn delete_activity(&self, id: i64) -> Result<bool, AppError>;

    /// Insert a signup and read it back with its camper and activity in the same transaction.
    /// Unknown camper or activity ids come back as a validation error.
    async fn insert_signup(&self, new: &NewSignup) -> Result<(Signup, Camper, Activity), AppError>;
}

const SQL_LIST_CAMPERS: &str = "SELECT id, name, age FROM campers ORDER BY id";
const SQL_FIND_CAMPER: &str = "SELECT id, name, age FROM campers WHERE id = ?";
const SQL_INSERT_CAMPER: &str = "INSERT INTO campers (name, age) VALUES (?, ?) RETURNING id, name, age";
const SQL_UPDATE_CAMPER: &str = "UPDATE campers SET name = ?, age = ? WHERE id = ? RETURNING id, name, age";

const SQL_LIST_ACTIVITIES: &str = "SELECT id, name, difficulty FROM activities ORDER BY id";
const SQL_FIND_ACTIVITY: &str = "SELECT id, name, difficulty FROM activities WHERE id = ?";
const SQL_INSERT_ACTIVITY: &str =
    "INSERT INTO activities (name, difficulty) VALUES (?, ?) RETURNING id, name, difficulty";
const SQL_DELETE_ACTIVITY: &str = "DELETE FROM activities WHERE id = ?";

const SQL_INSERT_SIGNUP: &str = "INSERT INTO signups (time, camper_id, activity_id) VALUES (?, ?, ?) \
     RETURNING id, time, camper_id, activity_id";
const SQL_SIGNUP_DETAIL: &str = r#"
SELECT
  s.id,
  s.time,
  s.camper_id,
  s.activity_id,
  c.name AS camper_name,
  c.age AS camper_age,
  a.name AS activity_name,
  a.difficulty AS activity_difficulty
FROM signups s
JOIN campers c ON c.id = s.camper_id
JOIN activities a ON a.id = s.activity_id
WHERE s.id = ?
"#;
const SQL_SIGNUPS_FOR_CAMPER: &str = r#"
SELECT
  s.id,
  s.time,
  s.camper_id,
  s.activity_id,
  a.name AS activity_name,
  a.difficulty AS activity_difficulty
FROM signups s
JOIN activities a ON a.id = s.activity_id
WHERE s.camper_id = ?
ORDER BY s.id
"#;

#[derive(sqlx::FromRow)]
struct CamperSignupRow {
    id: i64,
    time: i64,
    camper_id: i64,
    activity_id: i64,
    activity_name: String,
    activity_difficulty: i64,
}

impl From<CamperSignupRow> for (Signup, Activity) {
    fn from(r: CamperSignupRow) -> Self {
        (
            Signup {
                id: r.id,
                time: r.time,
                camper_id: r.camper_id,
                activity_id: r.activity_id,
            },
            Activity {
                id: r.activity_id,
                name: r.activity_name,
                difficulty: r.activity_difficulty,
            },
        )
    }
}

#[derive(sqlx::FromRow)]
struct SignupDetailRow {
    id: i64,
    time: i64,
    camper_id: i64,
    activity_id: i64,
    camper_name: String,
    camper_age: i64,
    activity_name: String,
    activity_difficulty: i64,
}

impl From<SignupDetailRow> for (Signup, Camper, Activity) {
    fn from(r: SignupDetailRow) -> Self {
        (
            Signup {
                id: r.id,
                time: r.time,
                camper_id: r.camper_id,
                activity_id: r.activity_id,
            },
            Camper {
                id: r.camper_id,
                name: r.camper_name,
                age: r.camper_age,
            },
            Activity {
                id: r.activity_id,
                name: r.activity_name,
                difficulty: r.activity_difficulty,
            },
        )
    }
}

#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CampRepository for SqliteRepository {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_campers(&self) -> Result<Vec<Camper>, AppError> {
        tracing::debug!(sql = SQL_LIST_CAMPERS, "query");
        let rows = sqlx::query_as::<_, Camper>(SQL_LIST_CAMPERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_camper(&self, id: i64) -> Result<Option<Camper>, AppError> {
        tracing::debug!(sql = SQL_FIND_CAMPER, id, "query");
        let row = sqlx::query_as::<_, Camper>(SQL_FIND_CAMPER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_camper(&self, new: &NewCamper) -> Result<Camper, AppError> {
        new.validate()?;
        tracing::debug!(sql = SQL_INSERT_CAMPER, "query");
        sqlx::query_as::<_, Camper>(SQL_INSERT_CAMPER)
            .bind(&new.name)
            .bind(new.age)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update_camper(&self, camper: &Camper) -> Result<Option<Camper>, AppError> {
        camper.validate()?;
        tracing::debug!(sql = SQL_UPDATE_CAMPER, id = camper.id, "query");
        sqlx::query_as::<_, Camper>(SQL_UPDATE_CAMPER)
            .bind(&camper.name)
            .bind(camper.age)
            .bind(camper.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn signups_for_camper(&self, camper_id: i64) -> Result<Vec<(Signup, Activity)>, AppError> {
        tracing::debug!(sql = SQL_SIGNUPS_FOR_CAMPER, camper_id, "query");
        let rows = sqlx::query_as::<_, CamperSignupRow>(SQL_SIGNUPS_FOR_CAMPER)
            .bind(camper_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        tracing::debug!(sql = SQL_LIST_ACTIVITIES, "query");
        let rows = sqlx::query_as::<_, Activity>(SQL_LIST_ACTIVITIES)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_activity(&self, id: i64) -> Result<Option<Activity>, AppError> {
        tracing::debug!(sql = SQL_FIND_ACTIVITY, id, "query");
        let row = sqlx::query_as::<_, Activity>(SQL_FIND_ACTIVITY)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_activity(&self, new: &NewActivity) -> Result<Activity, AppError> {
        new.validate()?;
        tracing::debug!(sql = SQL_INSERT_ACTIVITY, "query");
        sqlx::query_as::<_, Activity>(SQL_INSERT_ACTIVITY)
            .bind(&new.name)
            .bind(new.difficulty)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn delete_activity(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(sql = SQL_DELETE_ACTIVITY, id, "query");
        let res = sqlx::query(SQL_DELETE_ACTIVITY)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn insert_signup(&self, new: &NewSignup) -> Result<(Signup, Camper, Activity), AppError> {
        new.validate()?;
        let mut tx = self.pool.begin().await?;
        tracing::debug!(sql = SQL_INSERT_SIGNUP, "query (tx)");
        let signup = sqlx::query_as::<_, Signup>(SQL_INSERT_SIGNUP)
            .bind(new.time)
            .bind(new.camper_id)
            .bind(new.activity_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify)?;
        tracing::debug!(sql = SQL_SIGNUP_DETAIL, id = signup.id, "query (tx)");
        let row = sqlx::query_as::<_, SignupDetailRow>(SQL_SIGNUP_DETAIL)
            .bind(signup.id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row.into())
    }
}

/// Constraint violations raised by the database count as validation failures.
fn classify(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        match db.kind() {
            ErrorKind::ForeignKeyViolation | ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                return AppError::Validation(ValidationError::Constraint(db.message().to_string()));
            }
            _ => {}
        }
    }
    AppError::Db(e)
}
