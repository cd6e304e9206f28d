use crate::executor::QueryResult;
use crate::types::{DbConnectionConfig, SqlValue};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("{0}")]
    Execution(String),

    #[error("not connected")]
    NotConnected,

    #[error("catalog query `{query}` returned {actual} column(s), expected {expected}")]
    SchemaMismatch {
        query: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("catalog query `{query}`: column {column} {message}")]
    Decode {
        query: &'static str,
        column: usize,
        message: String,
    },

    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Query executor over one live database session.
///
/// Placeholders are Oracle positional binds (`:1`). Implementations must not
/// retry; a failure is returned to the caller as-is.
#[async_trait]
pub trait DbConnection: Send + Sync {
    fn config(&self) -> &DbConnectionConfig;

    async fn connect(&mut self) -> DbResult<()>;

    async fn disconnect(&mut self) -> DbResult<()>;

    async fn query(&self, sql: &str, params: Option<Vec<SqlValue>>) -> DbResult<QueryResult>;
}
