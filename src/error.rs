use thiserror::Error;

/// Errors detected while building the [`crate::config::Config`]. These are
/// fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Args(#[from] clap::Error),
    #[error("num_threads must be >= 1, got: {0}")]
    InvalidThreads(i64),
    #[error("Unknown mode: {0}")]
    InvalidMode(String),
    #[error("invalid value for `{name}`: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("DATABASE_URL not specified")]
    MissingDatabaseUrl,
}

impl ConfigError {
    /// Process exit status for this error. A missing connection string is
    /// reported distinctly from bad flags.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingDatabaseUrl => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("error connecting to db: {0}")]
    Dial(#[source] sqlx::Error),
    #[error("db liveness probe failed: {0}")]
    Probe(#[source] sqlx::Error),
}

/// A failed statement, carrying the statement text for context.
#[derive(Debug, Error)]
#[error("error executing `{query}`: {source}")]
pub struct QueryError {
    pub query: &'static str,
    #[source]
    pub source: sqlx::Error,
}

impl QueryError {
    pub fn new(query: &'static str, source: sqlx::Error) -> Self {
        Self { query, source }
    }
}

/// Terminal error for a single worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error(transparent)]
    Query(#[from] QueryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(ConfigError::MissingDatabaseUrl.exit_code(), 2);
        assert_eq!(ConfigError::InvalidThreads(0).exit_code(), 1);
        assert_eq!(ConfigError::InvalidMode("scan".into()).exit_code(), 1);
    }

    #[test]
    fn query_error_names_statement() {
        let e = QueryError::new("SELECT 1", sqlx::Error::PoolTimedOut);
        assert!(e.to_string().contains("SELECT 1"));
    }
}
