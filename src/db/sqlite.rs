use crate::db::models::{AdminCredential, Application, NewApplication};
use crate::db::schema::SQLITE_INIT;
use crate::error::IntakeError;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct IntakeStorage {
    pool: SqlitePool,
}

/// Open (creating if missing) the database at `database_url` and initialize the schema.
pub async fn connect(database_url: &str) -> Result<IntakeStorage, IntakeError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    let storage = IntakeStorage::new(pool);
    storage.init_schema().await?;
    Ok(storage)
}

impl IntakeStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), IntakeError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Append a submission. The id and `submitted_at` are assigned here, never by the caller,
    /// and come back exactly as stored.
    pub async fn insert_application(&self, app: NewApplication) -> Result<Application, IntakeError> {
        let submitted_at = timestamp(Utc::now());
        let result = sqlx::query(
            r#"
            INSERT INTO applications (
                name, email, mobile, gender, degree,
                experience, how_know, resume, position, submitted_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&app.name)
        .bind(&app.email)
        .bind(&app.mobile)
        .bind(&app.gender)
        .bind(&app.degree)
        .bind(&app.experience)
        .bind(&app.how_know)
        .bind(&app.resume)
        .bind(&app.position)
        .bind(&submitted_at)
        .execute(&self.pool)
        .await?;
        Ok(app.into_stored(result.last_insert_rowid(), parse_timestamp(&submitted_at)?))
    }

    /// Whole table, most recent first. Equal timestamps fall back to id order.
    pub async fn list_applications(&self) -> Result<Vec<Application>, IntakeError> {
        let rows = sqlx::query(
            r#"SELECT id, name, email, mobile, gender, degree, experience,
               how_know, resume, position, submitted_at
               FROM applications ORDER BY submitted_at DESC, id DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_application).collect()
    }

    pub async fn find_admin(&self, username: &str) -> Result<Option<AdminCredential>, IntakeError> {
        let row = sqlx::query(
            "SELECT id, username, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_admin).transpose()
    }

    /// Insert the admin row unless `username` already exists. Returns whether a row was written.
    pub async fn seed_admin_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, IntakeError> {
        if self.find_admin(username).await?.is_some() {
            return Ok(false);
        }
        let result = sqlx::query(
            r#"INSERT INTO users (username, password, created_at) VALUES (?, ?, ?)
               ON CONFLICT(username) DO NOTHING"#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    fn row_to_application(row: SqliteRow) -> Result<Application, IntakeError> {
        let submitted_at: String = row.try_get("submitted_at")?;
        Ok(Application {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            mobile: row.try_get("mobile")?,
            gender: row.try_get("gender")?,
            degree: row.try_get("degree")?,
            experience: row.try_get("experience")?,
            how_know: row.try_get("how_know")?,
            resume: row.try_get("resume")?,
            position: row.try_get("position")?,
            submitted_at: parse_timestamp(&submitted_at)?,
        })
    }

    fn row_to_admin(row: SqliteRow) -> Result<AdminCredential, IntakeError> {
        let created_at: String = row.try_get("created_at")?;
        Ok(AdminCredential {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password")?,
            created_at: parse_timestamp(&created_at)?,
        })
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, IntakeError> {
    let parsed = DateTime::parse_from_rfc3339(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(parsed.with_timezone(&Utc))
}
