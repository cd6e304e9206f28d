use crate::connection::{DbConnection, DbResult};
use crate::types::*;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Catalog access for one database dialect.
///
/// Every method takes the live connection explicitly and returns freshly
/// decoded records; nothing is cached between calls. "Not found" is an empty
/// vector or `None`, never an error.
#[async_trait]
pub trait CatalogPlugin: Send + Sync {
    fn identifier_quote(&self) -> &str {
        "\""
    }

    fn quote_identifier(&self, identifier: &str) -> String {
        let quote = self.identifier_quote();
        format!("{}{}{}", quote, identifier, quote)
    }

    async fn create_connection(&self, config: DbConnectionConfig) -> DbResult<Box<dyn DbConnection + Send + Sync>>;

    // === Object Listing ===
    async fn list_tables(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>>;
    async fn list_views(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>>;
    async fn list_sequences(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>>;
    async fn list_users(&self, connection: &dyn DbConnection) -> DbResult<Vec<String>>;

    /// Names of every object of `kind`, in the catalog's name order.
    async fn list_objects(&self, connection: &dyn DbConnection, kind: ObjectKind) -> DbResult<Vec<CatalogObjectRef>> {
        let names = match kind {
            ObjectKind::Table => self.list_tables(connection).await?,
            ObjectKind::View => self.list_views(connection).await?,
            ObjectKind::Sequence => self.list_sequences(connection).await?,
            ObjectKind::User => self.list_users(connection).await?,
        };
        Ok(names
            .into_iter()
            .map(|name| CatalogObjectRef { name, kind })
            .collect())
    }

    // === Table / View Detail ===
    async fn list_columns(&self, connection: &dyn DbConnection, table: &str) -> DbResult<Vec<ColumnInfo>>;
    async fn list_constraints(&self, connection: &dyn DbConnection, table: &str) -> DbResult<Vec<ConstraintInfo>>;
    async fn list_indexes(&self, connection: &dyn DbConnection, table: &str) -> DbResult<Vec<IndexInfo>>;
    async fn view_source(&self, connection: &dyn DbConnection, view: &str) -> DbResult<Option<ViewInfo>>;

    // === Sequence Detail ===
    async fn sequence_state(&self, connection: &dyn DbConnection, sequence: &str) -> DbResult<Option<SequenceInfo>>;

    /// Draws the next value. This permanently advances the sequence, so
    /// callers must only invoke it on an explicit request.
    async fn next_sequence_value(&self, connection: &dyn DbConnection, sequence: &str) -> DbResult<Decimal>;

    // === User Detail ===
    async fn user_info(&self, connection: &dyn DbConnection, username: &str) -> DbResult<Option<UserInfo>>;
}
