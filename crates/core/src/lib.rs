pub mod config;
pub mod profile;

pub use config::{DisplayConfig, ExplorerConfig};
pub use profile::{ConnectionProfile, ProfileOverrides};
