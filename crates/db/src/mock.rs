//! Scripted executor for exercising catalog code without a database.
//!
//! Responses are matched in registration order by SQL fragment and,
//! optionally, by the bound parameter. Unmatched statements return no rows.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::connection::{DbConnection, DbError, DbResult};
use crate::executor::QueryResult;
use crate::types::{DbConnectionConfig, SqlValue};

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

struct Response {
    fragment: String,
    param: Option<String>,
    outcome: Result<Vec<Vec<SqlValue>>, String>,
}

impl Response {
    fn matches(&self, sql: &str, params: &[SqlValue]) -> bool {
        if !sql.contains(&self.fragment) {
            return false;
        }
        match &self.param {
            Some(expected) => params.first().and_then(|p| p.as_str()) == Some(expected.as_str()),
            None => true,
        }
    }
}

pub struct ScriptedConnection {
    config: DbConnectionConfig,
    responses: Vec<Response>,
    executed: Mutex<Vec<ExecutedQuery>>,
}

impl ScriptedConnection {
    pub fn new() -> Self {
        Self {
            config: DbConnectionConfig {
                host: "localhost".to_string(),
                port: 1521,
                service_name: "FREEPDB1".to_string(),
                username: "scott".to_string(),
                password: String::new(),
            },
            responses: Vec::new(),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(mut self, fragment: &str, rows: Vec<Vec<SqlValue>>) -> Self {
        self.responses.push(Response {
            fragment: fragment.to_string(),
            param: None,
            outcome: Ok(rows),
        });
        self
    }

    pub fn respond_for(mut self, fragment: &str, param: &str, rows: Vec<Vec<SqlValue>>) -> Self {
        self.responses.push(Response {
            fragment: fragment.to_string(),
            param: Some(param.to_string()),
            outcome: Ok(rows),
        });
        self
    }

    pub fn fail(mut self, fragment: &str, message: &str) -> Self {
        self.responses.push(Response {
            fragment: fragment.to_string(),
            param: None,
            outcome: Err(message.to_string()),
        });
        self
    }

    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.executed.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn count_matching(&self, fragment: &str) -> usize {
        self.executed()
            .iter()
            .filter(|q| q.sql.contains(fragment))
            .count()
    }
}

impl Default for ScriptedConnection {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DbConnection for ScriptedConnection {
    fn config(&self) -> &DbConnectionConfig {
        &self.config
    }

    async fn connect(&mut self) -> DbResult<()> {
        Ok(())
    }

    async fn disconnect(&mut self) -> DbResult<()> {
        Ok(())
    }

    async fn query(&self, sql: &str, params: Option<Vec<SqlValue>>) -> DbResult<QueryResult> {
        let params = params.unwrap_or_default();
        if let Ok(mut log) = self.executed.lock() {
            log.push(ExecutedQuery {
                sql: sql.to_string(),
                params: params.clone(),
            });
        }

        let rows = match self.responses.iter().find(|r| r.matches(sql, &params)) {
            Some(response) => response.outcome.clone().map_err(DbError::Execution)?,
            None => Vec::new(),
        };
        Ok(QueryResult::new(sql, Vec::new(), rows))
    }
}
