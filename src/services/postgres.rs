use crate::models::{Connection, ConnectionStatus, UserProfile};
use crate::services::store::{ConnectionStore, ProfileStore, StoreError, StoreResult};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for StoreError {
    fn from(err: PostgresError) -> Self {
        match err {
            PostgresError::SqlxError(sqlx::Error::RowNotFound) => {
                StoreError::NotFound("row".to_string())
            }
            PostgresError::SqlxError(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        PostgresError::from(err).into()
    }
}

/// Connection status as stored in the `connection_status` enum type
#[derive(Debug, Clone, Copy, sqlx::Type)]
#[sqlx(type_name = "connection_status", rename_all = "UPPERCASE")]
pub enum StatusColumn {
    Pending,
    Accepted,
}

impl From<ConnectionStatus> for StatusColumn {
    fn from(value: ConnectionStatus) -> Self {
        match value {
            ConnectionStatus::Pending => StatusColumn::Pending,
            ConnectionStatus::Accepted => StatusColumn::Accepted,
        }
    }
}

impl From<StatusColumn> for ConnectionStatus {
    fn from(value: StatusColumn) -> Self {
        match value {
            StatusColumn::Pending => ConnectionStatus::Pending,
            StatusColumn::Accepted => ConnectionStatus::Accepted,
        }
    }
}

const PROFILE_COLUMNS: &str = "id, name, email, year, college, skills, availability, \
     linkedin_url, is_onboarded, created_at, updated_at";

const CONNECTION_COLUMNS: &str = "id, requester_id, receiver_id, status, created_at";

/// PostgreSQL client backing both the profile and connection stores
///
/// Profiles are written by the account/onboarding side of the product;
/// this client reads them and applies profile updates. Connections are
/// fully owned here, with symmetric uniqueness enforced by an index over
/// the ordered pair.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn profile_from_row(row: &PgRow) -> Result<UserProfile, sqlx::Error> {
    Ok(UserProfile {
        id: row.try_get("id")?,
        name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
        email: row.try_get::<Option<String>, _>("email")?.unwrap_or_default(),
        year: row.try_get::<Option<String>, _>("year")?.unwrap_or_default(),
        college: row.try_get::<Option<String>, _>("college")?.unwrap_or_default(),
        skills: row.try_get("skills")?,
        availability: row.try_get::<Option<String>, _>("availability")?.unwrap_or_default(),
        linkedin_url: row.try_get("linkedin_url")?,
        is_onboarded: row.try_get("is_onboarded")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn connection_from_row(row: &PgRow) -> Result<Connection, sqlx::Error> {
    let status: StatusColumn = row.try_get("status")?;
    Ok(Connection {
        id: row.try_get("id")?,
        requester_id: row.try_get("requester_id")?,
        receiver_id: row.try_get("receiver_id")?,
        status: status.into(),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait::async_trait]
impl ProfileStore for PostgresClient {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(profile_from_row).transpose()?)
    }

    async fn scan_eligible(&self, exclude_id: &str) -> StoreResult<Vec<UserProfile>> {
        let query = format!(
            r#"
            SELECT {}
            FROM users
            WHERE id <> $1
              AND is_onboarded
              AND TRIM(COALESCE(year, '')) <> ''
              AND TRIM(COALESCE(college, '')) <> ''
              AND cardinality(skills) > 0
            ORDER BY created_at ASC, id ASC
            "#,
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(exclude_id)
            .fetch_all(&self.pool)
            .await?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Scanned {} eligible profiles", profiles.len());

        Ok(profiles)
    }

    async fn update(&self, profile: &UserProfile) -> StoreResult<UserProfile> {
        let query = format!(
            r#"
            UPDATE users SET
                year = $2,
                college = $3,
                skills = $4,
                availability = $5,
                linkedin_url = $6,
                is_onboarded = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(&profile.id)
            .bind(&profile.year)
            .bind(&profile.college)
            .bind(&profile.skills)
            .bind(&profile.availability)
            .bind(&profile.linkedin_url)
            .bind(profile.is_onboarded)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("User {}", profile.id)))?;

        Ok(profile_from_row(&row)?)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> StoreResult<bool> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

#[async_trait::async_trait]
impl ConnectionStore for PostgresClient {
    async fn find_by_pair(&self, a: &str, b: &str) -> StoreResult<Option<Connection>> {
        let query = format!(
            r#"
            SELECT {}
            FROM connections
            WHERE (requester_id = $1 AND receiver_id = $2)
               OR (requester_id = $2 AND receiver_id = $1)
            LIMIT 1
            "#,
            CONNECTION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(a)
            .bind(b)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(connection_from_row).transpose()?)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Connection>> {
        let query = format!("SELECT {} FROM connections WHERE id = $1", CONNECTION_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(connection_from_row).transpose()?)
    }

    /// Insert a connection; the pair index turns a racing duplicate into a
    /// unique violation, reported as `StoreError::Conflict`.
    async fn create(&self, connection: Connection) -> StoreResult<Connection> {
        let query = r#"
            INSERT INTO connections (id, requester_id, receiver_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(&connection.id)
            .bind(&connection.requester_id)
            .bind(&connection.receiver_id)
            .bind(StatusColumn::from(connection.status))
            .bind(connection.created_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Created connection {}: {} -> {}",
            connection.id,
            connection.requester_id,
            connection.receiver_id
        );

        Ok(connection)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        status: ConnectionStatus,
    ) -> StoreResult<Vec<Connection>> {
        let query = format!(
            r#"
            SELECT {}
            FROM connections
            WHERE (requester_id = $1 OR receiver_id = $1)
              AND status = $2
            ORDER BY created_at DESC
            "#,
            CONNECTION_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(StatusColumn::from(status))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(connection_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM connections WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("Connection {}", id)));
        }

        tracing::info!("Deleted connection {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_column_conversion() {
        let column = StatusColumn::from(ConnectionStatus::Accepted);
        assert_eq!(format!("{:?}", column), "Accepted");
        assert_eq!(ConnectionStatus::from(StatusColumn::Pending), ConnectionStatus::Pending);
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_reverse_pair_conflicts() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let client = PostgresClient::from_settings(&url, Some(2), Some(1), None, None)
            .await
            .expect("Failed to connect");

        for id in ["pg_test_a", "pg_test_b"] {
            sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
                .bind(id)
                .execute(&client.pool)
                .await
                .unwrap();
        }

        let first = Connection::accepted("pg_test_a", "pg_test_b");
        let first_id = first.id.clone();
        client.create(first).await.unwrap();

        let second = client.create(Connection::accepted("pg_test_b", "pg_test_a")).await;
        assert!(matches!(second, Err(StoreError::Conflict(_))));

        client.delete(&first_id).await.unwrap();
    }
}
