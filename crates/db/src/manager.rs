use tracing::info;

use crate::connection::{DbConnection, DbResult};
use crate::oracle::OraclePlugin;
use crate::plugin::CatalogPlugin;
use crate::types::DbConnectionConfig;

pub struct DbManager {}

impl DbManager {
    pub fn new() -> Self {
        Self {}
    }

    pub fn get_plugin(&self) -> Box<dyn CatalogPlugin> {
        Box::new(OraclePlugin::new())
    }

    /// Authenticates and returns the one session the browser works against.
    pub async fn open_session(&self, config: DbConnectionConfig) -> DbResult<Session> {
        let plugin = self.get_plugin();
        let connection = plugin.create_connection(config).await?;
        info!(user = %connection.config().username, "session opened");
        Ok(Session::new(plugin, connection))
    }
}

impl Default for DbManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The live connection plus the plugin that knows its catalog.
///
/// Owned by the binary for the whole run and lent to every component; it is
/// released once, by [`Session::close`].
pub struct Session {
    plugin: Box<dyn CatalogPlugin>,
    connection: Box<dyn DbConnection + Send + Sync>,
}

impl Session {
    pub fn new(plugin: Box<dyn CatalogPlugin>, connection: Box<dyn DbConnection + Send + Sync>) -> Self {
        Self { plugin, connection }
    }

    pub fn plugin(&self) -> &dyn CatalogPlugin {
        self.plugin.as_ref()
    }

    pub fn connection(&self) -> &dyn DbConnection {
        self.connection.as_ref()
    }

    pub async fn close(mut self) -> DbResult<()> {
        info!(user = %self.connection.config().username, "session closing");
        self.connection.disconnect().await
    }
}
