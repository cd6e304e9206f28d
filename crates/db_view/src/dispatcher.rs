use db::{CatalogPlugin, DbConnection, ObjectKind};
use tracing::debug;

use crate::browser::ObjectBrowser;
use crate::console::Console;
use crate::object_detail::ViewOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    Browse(ObjectKind),
    Exit,
    Invalid,
}

/// Kinds are numbered in [`ObjectKind::ALL`] order, with Exit after them.
pub fn parse_main_choice(input: &str) -> MainMenuChoice {
    let kinds = ObjectKind::ALL;
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=kinds.len()).contains(&n) => MainMenuChoice::Browse(kinds[n - 1]),
        Ok(n) if n == kinds.len() + 1 => MainMenuChoice::Exit,
        _ => MainMenuChoice::Invalid,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Menu,
    Browsing(ObjectKind),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherEvent {
    Chose(MainMenuChoice),
    BrowserDone,
    InputClosed,
}

impl DispatcherState {
    pub fn next(self, event: DispatcherEvent) -> DispatcherState {
        match (self, event) {
            (DispatcherState::Exit, _) | (_, DispatcherEvent::InputClosed) => DispatcherState::Exit,
            (DispatcherState::Menu, DispatcherEvent::Chose(MainMenuChoice::Browse(kind))) => {
                DispatcherState::Browsing(kind)
            }
            (DispatcherState::Menu, DispatcherEvent::Chose(MainMenuChoice::Exit)) => DispatcherState::Exit,
            (DispatcherState::Browsing(_), DispatcherEvent::BrowserDone) => DispatcherState::Menu,
            (state, _) => state,
        }
    }
}

/// Top-level menu over the four browsers; returns when the operator exits.
pub struct Dispatcher<'a> {
    plugin: &'a dyn CatalogPlugin,
    connection: &'a dyn DbConnection,
    options: ViewOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(plugin: &'a dyn CatalogPlugin, connection: &'a dyn DbConnection) -> Self {
        Self {
            plugin,
            connection,
            options: ViewOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn run(&self, console: &mut dyn Console) {
        let mut state = DispatcherState::Menu;
        while state != DispatcherState::Exit {
            debug!(?state, "dispatcher step");
            let event = match state {
                DispatcherState::Menu => self.main_menu(console),
                DispatcherState::Browsing(kind) => {
                    ObjectBrowser::new(kind, self.plugin, self.connection)
                        .with_options(self.options)
                        .run(console)
                        .await;
                    DispatcherEvent::BrowserDone
                }
                DispatcherState::Exit => break,
            };
            state = state.next(event);
        }
    }

    fn main_menu(&self, console: &mut dyn Console) -> DispatcherEvent {
        console.print_line("");
        console.print_line("MAIN MENU");
        for (i, kind) in ObjectKind::ALL.iter().enumerate() {
            console.print_line(&format!("{}. {}", i + 1, kind.plural()));
        }
        console.print_line(&format!("{}. Exit", ObjectKind::ALL.len() + 1));

        let input = console.read_line("Enter option: ");
        if console.is_closed() {
            return DispatcherEvent::InputClosed;
        }
        let choice = parse_main_choice(&input);
        if choice == MainMenuChoice::Invalid {
            console.print_line("Invalid option.");
        }
        DispatcherEvent::Chose(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::ScriptedConsole;
    use db::mock::ScriptedConnection;
    use db::oracle::OraclePlugin;
    use db::SqlValue;

    #[test]
    fn main_menu_numbering() {
        assert_eq!(parse_main_choice("1"), MainMenuChoice::Browse(ObjectKind::Table));
        assert_eq!(parse_main_choice("2"), MainMenuChoice::Browse(ObjectKind::View));
        assert_eq!(parse_main_choice("3"), MainMenuChoice::Browse(ObjectKind::Sequence));
        assert_eq!(parse_main_choice(" 4 "), MainMenuChoice::Browse(ObjectKind::User));
        assert_eq!(parse_main_choice("5"), MainMenuChoice::Exit);
        assert_eq!(parse_main_choice("6"), MainMenuChoice::Invalid);
        assert_eq!(parse_main_choice(""), MainMenuChoice::Invalid);
    }

    #[test]
    fn transitions_are_terminal_on_exit() {
        let menu = DispatcherState::Menu;
        assert_eq!(
            menu.next(DispatcherEvent::Chose(MainMenuChoice::Browse(ObjectKind::View))),
            DispatcherState::Browsing(ObjectKind::View)
        );
        assert_eq!(menu.next(DispatcherEvent::Chose(MainMenuChoice::Invalid)), DispatcherState::Menu);
        assert_eq!(menu.next(DispatcherEvent::Chose(MainMenuChoice::Exit)), DispatcherState::Exit);
        assert_eq!(
            DispatcherState::Browsing(ObjectKind::View).next(DispatcherEvent::BrowserDone),
            DispatcherState::Menu
        );
        assert_eq!(DispatcherState::Exit.next(DispatcherEvent::BrowserDone), DispatcherState::Exit);
        assert_eq!(menu.next(DispatcherEvent::InputClosed), DispatcherState::Exit);
    }

    #[tokio::test]
    async fn empty_views_return_to_main_menu() {
        let conn = ScriptedConnection::new();
        let plugin = OraclePlugin::new();
        let mut console = ScriptedConsole::new(&["2", "5"]);

        Dispatcher::new(&plugin, &conn).run(&mut console).await;

        assert!(console.printed("No objects found."));
        assert!(!console.prompted("Select a view"));
        let menus = console.lines.iter().filter(|l| *l == "MAIN MENU").count();
        assert_eq!(menus, 2);
    }

    #[tokio::test]
    async fn invalid_option_redisplays_menu() {
        let conn = ScriptedConnection::new();
        let plugin = OraclePlugin::new();
        let mut console = ScriptedConsole::new(&["9", "5"]);

        Dispatcher::new(&plugin, &conn).run(&mut console).await;

        assert!(console.printed("Invalid option."));
        assert!(conn.executed().is_empty());
    }

    #[tokio::test]
    async fn listing_error_does_not_end_the_session() {
        let conn = ScriptedConnection::new()
            .fail("FROM USER_TABLES", "ORA-03113: end-of-file on communication channel")
            .respond("FROM USER_SEQUENCES ORDER BY", vec![vec![SqlValue::from("SEQ_ORD")]]);
        let plugin = OraclePlugin::new();
        let mut console = ScriptedConsole::new(&["1", "3", "", "5"]);

        Dispatcher::new(&plugin, &conn).run(&mut console).await;

        assert!(console.printed("Error: ORA-03113"));
        assert!(console.printed("1. SEQ_ORD"));
        assert!(console.prompted("Select a sequence"));
    }

    #[tokio::test]
    async fn end_of_input_exits() {
        let conn = ScriptedConnection::new();
        let plugin = OraclePlugin::new();
        let mut console = ScriptedConsole::new(&[]);

        Dispatcher::new(&plugin, &conn).run(&mut console).await;

        assert_eq!(console.prompts, vec!["Enter option: "]);
    }
}
