pub mod types;
pub mod plugin;
pub mod manager;
pub mod connection;
pub mod executor;

// Database implementations
pub mod oracle;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

// Re-exports
pub use types::*;
pub use plugin::*;
pub use manager::*;
pub use connection::*;
pub use executor::*;
