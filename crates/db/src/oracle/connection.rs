use std::sync::{Arc, Mutex};
use std::time::Instant;

use ::oracle::sql_type::{OracleType, ToSql};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::connection::{DbConnection, DbError, DbResult};
use crate::executor::QueryResult;
use crate::types::{DbConnectionConfig, SqlValue};

impl From<::oracle::Error> for DbError {
    fn from(e: ::oracle::Error) -> Self {
        DbError::Execution(e.to_string())
    }
}

/// Oracle session backed by the blocking `oracle` driver.
///
/// Driver calls run on tokio's blocking pool; the handle sits behind a mutex
/// so statements on one session never overlap.
pub struct OracleDbConnection {
    config: DbConnectionConfig,
    conn: Option<Arc<Mutex<::oracle::Connection>>>,
}

impl OracleDbConnection {
    pub fn new(config: DbConnectionConfig) -> Self {
        Self { config, conn: None }
    }

    fn handle(&self) -> DbResult<Arc<Mutex<::oracle::Connection>>> {
        self.conn.clone().ok_or(DbError::NotConnected)
    }
}

#[async_trait]
impl DbConnection for OracleDbConnection {
    fn config(&self) -> &DbConnectionConfig {
        &self.config
    }

    async fn connect(&mut self) -> DbResult<()> {
        let config = self.config.clone();
        let connect_string = config.connect_string();
        info!(user = %config.username, target = %connect_string, "connecting");

        let conn = tokio::task::spawn_blocking(move || {
            ::oracle::Connection::connect(&config.username, &config.password, &connect_string)
        })
        .await
        .map_err(|e| DbError::Connection(e.to_string()))?
        .map_err(|e| DbError::Connection(e.to_string()))?;

        self.conn = Some(Arc::new(Mutex::new(conn)));
        Ok(())
    }

    async fn disconnect(&mut self) -> DbResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };
        info!(user = %self.config.username, "closing session");

        tokio::task::spawn_blocking(move || -> DbResult<()> {
            let guard = conn
                .lock()
                .map_err(|_| DbError::Connection("session lock poisoned".to_string()))?;
            guard.close()?;
            Ok(())
        })
        .await
        .map_err(|e| DbError::Connection(e.to_string()))?
    }

    async fn query(&self, sql: &str, params: Option<Vec<SqlValue>>) -> DbResult<QueryResult> {
        let conn = self.handle()?;
        let sql = sql.to_string();
        let params = params.unwrap_or_default();

        tokio::task::spawn_blocking(move || run_query(&conn, &sql, &params))
            .await
            .map_err(|e| DbError::Execution(e.to_string()))?
    }
}

fn run_query(conn: &Mutex<::oracle::Connection>, sql: &str, params: &[SqlValue]) -> DbResult<QueryResult> {
    let guard = conn
        .lock()
        .map_err(|_| DbError::Execution("session lock poisoned".to_string()))?;

    let binds: Vec<Box<dyn ToSql>> = params.iter().map(to_bind).collect();
    let bind_refs: Vec<&dyn ToSql> = binds.iter().map(|b| b.as_ref()).collect();

    let started = Instant::now();
    let result_set = guard.query(sql, &bind_refs)?;
    let columns: Vec<String> = result_set
        .column_info()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut rows = Vec::new();
    for row in result_set {
        let row = row?;
        let values = row
            .sql_values()
            .iter()
            .map(decode_value)
            .collect::<DbResult<Vec<_>>>()?;
        rows.push(values);
    }

    let elapsed_ms = started.elapsed().as_millis();
    debug!(rows = rows.len(), elapsed_ms, "statement finished");

    Ok(QueryResult {
        sql: sql.to_string(),
        columns,
        rows,
        elapsed_ms,
    })
}

fn to_bind(value: &SqlValue) -> Box<dyn ToSql> {
    match value {
        SqlValue::Null => Box::new(Option::<String>::None),
        SqlValue::Number(n) => match n.to_i64() {
            Some(i) if n.fract().is_zero() => Box::new(i),
            _ => Box::new(n.to_string()),
        },
        SqlValue::Float(f) => Box::new(*f),
        SqlValue::String(s) => Box::new(s.clone()),
        SqlValue::DateTime(dt) => Box::new(*dt),
        SqlValue::Bytes(b) => Box::new(b.clone()),
    }
}

fn decode_value(value: &::oracle::SqlValue) -> DbResult<SqlValue> {
    if value.is_null()? {
        return Ok(SqlValue::Null);
    }

    let decoded = match value.oracle_type()? {
        OracleType::Number(_, _) | OracleType::Int64 | OracleType::UInt64 => {
            let text: String = value.get()?;
            match text.parse::<Decimal>().or_else(|_| Decimal::from_scientific(&text)) {
                Ok(n) => SqlValue::Number(n),
                Err(_) => text
                    .parse::<f64>()
                    .map(SqlValue::Float)
                    .unwrap_or(SqlValue::String(text)),
            }
        }
        OracleType::BinaryFloat | OracleType::BinaryDouble | OracleType::Float(_) => {
            SqlValue::Float(value.get()?)
        }
        OracleType::Date
        | OracleType::Timestamp(_)
        | OracleType::TimestampTZ(_)
        | OracleType::TimestampLTZ(_) => SqlValue::DateTime(value.get::<NaiveDateTime>()?),
        OracleType::Raw(_) | OracleType::LongRaw | OracleType::BLOB => SqlValue::Bytes(value.get()?),
        _ => SqlValue::String(value.get()?),
    };
    Ok(decoded)
}
