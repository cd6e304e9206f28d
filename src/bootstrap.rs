use db::DbConnectionConfig;
use db_view::Console;
use ora_core::profile::{parse_port, ConnectionProfile, ProfileOverrides};

/// Fills every field the command line left unset by asking, offering the
/// configured value as the default. The password is always asked for.
pub fn gather_credentials(
    console: &mut dyn Console,
    profile: ConnectionProfile,
    given: &ProfileOverrides,
) -> DbConnectionConfig {
    let mut profile = profile;

    if given.host.is_none() {
        profile.host = ask(console, "Host", &profile.host);
    }
    if given.port.is_none() {
        let input = console.read_line(&format!("Port [{}]: ", profile.port));
        profile.port = match parse_port(&input, profile.port) {
            Ok(port) => port,
            Err(_) => {
                console.print_line(&format!("Invalid port, using {}.", profile.port));
                profile.port
            }
        };
    }
    if given.service_name.is_none() {
        profile.service_name = ask(console, "Service name", &profile.service_name);
    }
    let username = match &given.username {
        Some(user) => user.clone(),
        None => {
            let default = profile.username.clone().unwrap_or_default();
            ask(console, "Username", &default)
        }
    };
    let password = console.read_secret("Password: ");

    profile.to_db_connection(username, password)
}

fn ask(console: &mut dyn Console, label: &str, default: &str) -> String {
    let prompt = if default.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{default}]: ")
    };
    let input = console.read_line(&prompt);
    let input = input.trim();
    if input.is_empty() {
        default.to_string()
    } else {
        input.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    use db_view::{ColumnSpec, Prompt, Render};

    #[derive(Default)]
    struct Answers {
        inputs: VecDeque<String>,
        prompts: Vec<String>,
        lines: Vec<String>,
    }

    impl Answers {
        fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl Prompt for Answers {
        fn read_line(&mut self, prompt: &str) -> String {
            self.prompts.push(prompt.to_string());
            self.inputs.pop_front().unwrap_or_default()
        }

        fn read_secret(&mut self, prompt: &str) -> String {
            self.read_line(prompt)
        }
    }

    impl Render for Answers {
        fn print_line(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn print_table(&mut self, _columns: &[ColumnSpec], _rows: &[Vec<String>]) {}
    }

    #[test]
    fn blank_answers_take_the_defaults() {
        let mut console = Answers::new(&["", "", "", "hr", "secret"]);
        let config = gather_credentials(&mut console, ConnectionProfile::default(), &ProfileOverrides::default());

        assert_eq!(config.connect_string(), "localhost:1521/FREEPDB1");
        assert_eq!(config.username, "hr");
        assert_eq!(config.password, "secret");
        assert_eq!(
            console.prompts,
            vec![
                "Host [localhost]: ",
                "Port [1521]: ",
                "Service name [FREEPDB1]: ",
                "Username: ",
                "Password: ",
            ]
        );
    }

    #[test]
    fn flags_skip_their_prompts() {
        let given = ProfileOverrides {
            host: Some("db.internal".into()),
            port: Some(1522),
            service_name: None,
            username: Some("scott".into()),
        };
        let profile = ConnectionProfile::default().merge(given.clone());
        let mut console = Answers::new(&["ORCLPDB", "tiger"]);

        let config = gather_credentials(&mut console, profile, &given);

        assert_eq!(config.connect_string(), "db.internal:1522/ORCLPDB");
        assert_eq!(config.username, "scott");
        assert_eq!(console.prompts, vec!["Service name [FREEPDB1]: ", "Password: "]);
    }

    #[test]
    fn bad_port_falls_back() {
        let mut console = Answers::new(&["", "port", "", "hr", "pw"]);
        let config = gather_credentials(&mut console, ConnectionProfile::default(), &ProfileOverrides::default());

        assert_eq!(config.port, 1521);
        assert_eq!(console.lines, vec!["Invalid port, using 1521."]);
    }
}
