use async_trait::async_trait;
use quiz_core::model::ResultSet;
use sqlx::{Column, Executor, Statement};
use tracing::debug;

use super::SqliteSession;
use super::mapping::{column_names, map_row};
use crate::repository::{ExecutionError, StatementExecutor};

fn database_message(e: sqlx::Error) -> ExecutionError {
    match e {
        sqlx::Error::Database(db) => ExecutionError::new(db.message()),
        other => ExecutionError::new(other.to_string()),
    }
}

impl SqliteSession {
    /// Column names a statement would produce, without running it.
    ///
    /// Empty for statements that return no columns, and for statements that
    /// no longer prepare once executed (`CREATE TABLE` of an existing table).
    async fn declared_columns(&self, sql: &str) -> Vec<String> {
        match self.pool().prepare(sql).await {
            Ok(statement) => statement
                .columns()
                .iter()
                .map(|c| c.name().to_owned())
                .collect(),
            Err(e) => {
                debug!(error = %e, "no column names for statement");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl StatementExecutor for SqliteSession {
    async fn execute(&self, sql: &str) -> Result<ResultSet, ExecutionError> {
        // Statements are ad hoc; don't fill the prepared statement cache with them.
        let rows = sqlx::query(sql)
            .persistent(false)
            .fetch_all(self.pool())
            .await
            .map_err(database_message)?;

        let columns = match rows.first() {
            Some(row) => column_names(row),
            None => self.declared_columns(sql).await,
        };
        let rows = rows.iter().map(map_row).collect::<Result<Vec<_>, _>>()?;
        debug!(rows = rows.len(), "statement executed");
        Ok(ResultSet::new(columns, rows))
    }
}
