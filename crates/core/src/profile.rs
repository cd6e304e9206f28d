use db::DbConnectionConfig;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1521;
pub const DEFAULT_SERVICE: &str = "FREEPDB1";

/// Where and as whom to connect; everything except the password.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionProfile {
    pub host: String,
    pub port: u16,
    #[serde(rename = "service", alias = "service_name")]
    pub service_name: String,
    pub username: Option<String>,
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE.to_string(),
            username: None,
        }
    }
}

impl ConnectionProfile {
    /// Fields set in `overrides` win; unset ones keep this profile's value.
    pub fn merge(mut self, overrides: ProfileOverrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(service_name) = overrides.service_name {
            self.service_name = service_name;
        }
        if overrides.username.is_some() {
            self.username = overrides.username;
        }
        self
    }

    pub fn to_db_connection(&self, username: String, password: String) -> DbConnectionConfig {
        DbConnectionConfig {
            host: self.host.clone(),
            port: self.port,
            service_name: self.service_name.clone(),
            username,
            password,
        }
    }
}

/// Values given on the command line, each optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub service_name: Option<String>,
    pub username: Option<String>,
}

/// Parses an operator-typed port, falling back to `default` on blank input.
pub fn parse_port(input: &str, default: u16) -> Result<u16, std::num::ParseIntError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    input.parse()
}
