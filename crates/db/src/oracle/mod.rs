pub mod connection;
pub mod plugin;

pub use connection::OracleDbConnection;
pub use plugin::OraclePlugin;
