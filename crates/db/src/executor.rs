use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::connection::{DbError, DbResult};
use crate::types::SqlValue;

/// Rows returned by a single statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub sql: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
    pub elapsed_ms: u128,
}

impl QueryResult {
    pub fn new(sql: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            sql: sql.into(),
            columns,
            rows,
            elapsed_ms: 0,
        }
    }

    /// Checks every row against the arity `query` declares and wraps it for typed access.
    pub fn shaped(&self, query: &'static str, arity: usize) -> DbResult<Vec<CatalogRow<'_>>> {
        self.rows
            .iter()
            .map(|row| CatalogRow::new(query, arity, row))
            .collect()
    }
}

/// A row whose width has been validated; accessors decode single cells.
#[derive(Debug, Clone, Copy)]
pub struct CatalogRow<'a> {
    query: &'static str,
    values: &'a [SqlValue],
}

impl<'a> CatalogRow<'a> {
    pub fn new(query: &'static str, arity: usize, values: &'a [SqlValue]) -> DbResult<Self> {
        if values.len() != arity {
            return Err(DbError::SchemaMismatch {
                query,
                expected: arity,
                actual: values.len(),
            });
        }
        Ok(Self { query, values })
    }

    fn cell(&self, column: usize) -> &'a SqlValue {
        &self.values[column]
    }

    fn decode_error(&self, column: usize, message: impl Into<String>) -> DbError {
        DbError::Decode {
            query: self.query,
            column,
            message: message.into(),
        }
    }

    pub fn opt_string(&self, column: usize) -> DbResult<Option<String>> {
        match self.cell(column) {
            SqlValue::Null => Ok(None),
            SqlValue::Bytes(_) => Err(self.decode_error(column, "is binary, expected text")),
            other => Ok(Some(other.to_string())),
        }
    }

    pub fn string(&self, column: usize) -> DbResult<String> {
        self.opt_string(column)?
            .ok_or_else(|| self.decode_error(column, "is NULL, expected text"))
    }

    pub fn opt_int(&self, column: usize) -> DbResult<Option<i64>> {
        let value = self.cell(column);
        if value.is_null() {
            return Ok(None);
        }
        value
            .as_i64()
            .map(Some)
            .ok_or_else(|| self.decode_error(column, format!("is {}, expected an integer", value.type_name())))
    }

    pub fn int(&self, column: usize) -> DbResult<i64> {
        self.opt_int(column)?
            .ok_or_else(|| self.decode_error(column, "is NULL, expected an integer"))
    }

    /// Catalog positions and ordinals; negative or oversized values are decode errors.
    pub fn ordinal(&self, column: usize) -> DbResult<u32> {
        let value = self.int(column)?;
        u32::try_from(value).map_err(|_| self.decode_error(column, format!("{value} is not a valid position")))
    }

    pub fn decimal(&self, column: usize) -> DbResult<Decimal> {
        let value = self.cell(column);
        value
            .as_decimal()
            .ok_or_else(|| self.decode_error(column, format!("is {}, expected a number", value.type_name())))
    }

    /// Catalog flags are single characters such as `Y`/`N`; anything other than `truthy` is false.
    pub fn flag(&self, column: usize, truthy: &str) -> DbResult<bool> {
        Ok(self
            .opt_string(column)?
            .map(|v| v.trim().eq_ignore_ascii_case(truthy))
            .unwrap_or(false))
    }

    pub fn datetime(&self, column: usize) -> DbResult<NaiveDateTime> {
        match self.cell(column) {
            SqlValue::DateTime(dt) => Ok(*dt),
            SqlValue::String(s) => NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
                .map_err(|e| self.decode_error(column, e.to_string())),
            other => Err(self.decode_error(column, format!("is {}, expected a date", other.type_name()))),
        }
    }
}
