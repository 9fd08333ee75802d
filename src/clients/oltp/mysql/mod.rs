use crate::clients::oltp::{Connector, Store};
use crate::error::{ConnectionError, QueryError};
use crate::workload::{Team, User};
use async_trait::async_trait;
use ringlog::debug;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

const PROBE: &str = "SELECT 1";
const RANDOM_TEAM: &str = "SELECT team_id, name FROM team ORDER BY RAND() LIMIT 1";
const INSERT_USER: &str = "INSERT INTO user (team_id, name, email) VALUES (?, ?, ?)";
const INSERT_TEAM: &str = "INSERT INTO team (team_id, user_id, name) VALUES (?, ?, ?)";
const SELECT_EMAIL: &str = "SELECT email FROM user WHERE user_id = ?";

/// Opens one [`MysqlStore`] per worker against a single endpoint.
pub struct MysqlConnector {
    endpoint: String,
}

impl MysqlConnector {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Connector for MysqlConnector {
    type Store = MysqlStore;

    async fn connect(&self) -> Result<MysqlStore, ConnectionError> {
        MysqlStore::connect(&self.endpoint).await
    }
}

/// A worker's handle to the database. The pool is capped at a single
/// connection so each worker drives exactly one session.
pub struct MysqlStore {
    pool: MySqlPool,
}

impl MysqlStore {
    /// Dials the endpoint and checks the connection with a round trip.
    pub async fn connect(endpoint: &str) -> Result<Self, ConnectionError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(endpoint)
            .await
            .map_err(ConnectionError::Dial)?;

        sqlx::query(PROBE)
            .execute(&pool)
            .await
            .map_err(ConnectionError::Probe)?;

        debug!("connected to mysql endpoint");

        Ok(Self { pool })
    }
}

#[async_trait]
impl Store for MysqlStore {
    async fn random_team(&self) -> Result<Option<Team>, QueryError> {
        let row = sqlx::query_as::<_, (String, String)>(RANDOM_TEAM)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueryError::new(RANDOM_TEAM, e))?;

        Ok(row.map(|(team_id, name)| Team { team_id, name }))
    }

    async fn insert_user(&self, user: &User) -> Result<u64, QueryError> {
        let result = sqlx::query(INSERT_USER)
            .bind(&user.team_id)
            .bind(&user.name)
            .bind(&user.email)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryError::new(INSERT_USER, e))?;

        Ok(result.last_insert_id())
    }

    async fn insert_team(&self, team: &Team, user_id: u64) -> Result<(), QueryError> {
        sqlx::query(INSERT_TEAM)
            .bind(&team.team_id)
            .bind(user_id)
            .bind(&team.name)
            .execute(&self.pool)
            .await
            .map_err(|e| QueryError::new(INSERT_TEAM, e))?;

        Ok(())
    }

    async fn select_email(&self, user_id: u64) -> Result<Option<String>, QueryError> {
        // email is nullable in the schema, a NULL reads the same as a miss
        let email = sqlx::query_scalar::<_, Option<String>>(SELECT_EMAIL)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| QueryError::new(SELECT_EMAIL, e))?;

        Ok(email.flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The temporary table shadows any real `user` table and only lives on the
    // store's single connection.
    #[tokio::test]
    #[ignore = "requires a MySQL server at DATABASE_URL"]
    async fn null_email_is_not_an_error() {
        let url = std::env::var("DATABASE_URL").unwrap();
        let store = MysqlStore::connect(&url).await.unwrap();

        sqlx::query(
            "CREATE TEMPORARY TABLE user (\
                user_id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY, \
                team_id VARCHAR(16), name VARCHAR(32), email VARCHAR(64) NULL)",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let user_id =
            sqlx::query("INSERT INTO user (team_id, name, email) VALUES ('t', 'n', NULL)")
                .execute(&store.pool)
                .await
                .unwrap()
                .last_insert_id();

        assert_eq!(store.select_email(user_id).await.unwrap(), None);
        assert_eq!(store.select_email(user_id + 1).await.unwrap(), None);
    }
}
