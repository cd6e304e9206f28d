use db::{CatalogObjectRef, CatalogPlugin, DbConnection, DbError, ObjectKind};
use tracing::{debug, warn};

use crate::console::Console;
use crate::object_detail::*;
use crate::selection::choose;

/// Sub-actions offered once an object is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    Columns,
    Constraints,
    Indexes,
    Definition,
}

impl DetailAction {
    pub fn label(&self) -> &'static str {
        match self {
            DetailAction::Columns => "Columns",
            DetailAction::Constraints => "Constraints",
            DetailAction::Indexes => "Indexes",
            DetailAction::Definition => "Definition",
        }
    }
}

/// Menu entries for `kind`, in display order. Sequences and users have no
/// sub-menu; selecting one shows its detail directly.
pub fn detail_actions(kind: ObjectKind) -> &'static [DetailAction] {
    match kind {
        ObjectKind::Table => &[DetailAction::Columns, DetailAction::Constraints, DetailAction::Indexes],
        ObjectKind::View => &[DetailAction::Columns, DetailAction::Definition],
        ObjectKind::Sequence | ObjectKind::User => &[],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Action(DetailAction),
    Back,
    Invalid,
}

/// Actions are numbered from 1 and "Back" follows the last one.
pub fn parse_menu_choice(kind: ObjectKind, input: &str) -> MenuChoice {
    let actions = detail_actions(kind);
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=actions.len()).contains(&n) => MenuChoice::Action(actions[n - 1]),
        Ok(n) if n == actions.len() + 1 => MenuChoice::Back,
        _ => MenuChoice::Invalid,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserState {
    Listing,
    Selected(CatalogObjectRef),
    DetailMenu(CatalogObjectRef),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Outcome of the listing prompt; `None` covers cancel, bad input and an empty catalog.
    Picked(Option<CatalogObjectRef>),
    /// The selected object has been handed to its detail step.
    Shown,
    Menu(MenuChoice),
    InputClosed,
}

impl BrowserState {
    pub fn next(self, kind: ObjectKind, event: BrowserEvent) -> BrowserState {
        match (self, event) {
            (_, BrowserEvent::InputClosed) => BrowserState::Exit,
            (BrowserState::Listing, BrowserEvent::Picked(Some(object))) => BrowserState::Selected(object),
            (BrowserState::Listing, BrowserEvent::Picked(None)) => BrowserState::Exit,
            (BrowserState::Selected(object), BrowserEvent::Shown) => {
                if detail_actions(kind).is_empty() {
                    BrowserState::Exit
                } else {
                    BrowserState::DetailMenu(object)
                }
            }
            (BrowserState::DetailMenu(_), BrowserEvent::Menu(MenuChoice::Back)) => BrowserState::Listing,
            (BrowserState::DetailMenu(object), BrowserEvent::Menu(_)) => BrowserState::DetailMenu(object),
            (state, _) => state,
        }
    }
}

/// Drives the listing → selection → detail loop for one object kind.
pub struct ObjectBrowser<'a> {
    kind: ObjectKind,
    plugin: &'a dyn CatalogPlugin,
    connection: &'a dyn DbConnection,
    options: ViewOptions,
}

impl<'a> ObjectBrowser<'a> {
    pub fn new(kind: ObjectKind, plugin: &'a dyn CatalogPlugin, connection: &'a dyn DbConnection) -> Self {
        Self {
            kind,
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
        let mut state = BrowserState::Listing;
        while state != BrowserState::Exit {
            state = self.step(state, console).await;
        }
    }

    pub async fn step(&self, state: BrowserState, console: &mut dyn Console) -> BrowserState {
        debug!(kind = %self.kind, ?state, "browser step");
        let event = match &state {
            BrowserState::Listing => self.pick(console).await,
            BrowserState::Selected(object) => {
                self.show_selected(object, console).await;
                BrowserEvent::Shown
            }
            BrowserState::DetailMenu(object) => self.detail_menu(object, console).await,
            BrowserState::Exit => return BrowserState::Exit,
        };
        state.next(self.kind, event)
    }

    async fn pick(&self, console: &mut dyn Console) -> BrowserEvent {
        let objects = match self.plugin.list_objects(self.connection, self.kind).await {
            Ok(objects) => objects,
            Err(e) => {
                self.report(console, &e);
                return BrowserEvent::Picked(None);
            }
        };

        ObjectListView::new(&objects).render(console);
        if objects.is_empty() {
            return BrowserEvent::Picked(None);
        }

        let input = console.read_line(&format!("\nSelect a {} (enter number or Enter to cancel): ", self.kind));
        if console.is_closed() {
            return BrowserEvent::InputClosed;
        }
        BrowserEvent::Picked(choose(&objects, &input, console).cloned())
    }

    async fn show_selected(&self, object: &CatalogObjectRef, console: &mut dyn Console) {
        let outcome = match self.kind {
            ObjectKind::Sequence => self.show_sequence(object, console).await,
            ObjectKind::User => self.show_user(object, console).await,
            ObjectKind::Table | ObjectKind::View => Ok(()),
        };
        if let Err(e) = outcome {
            self.report(console, &e);
        }
    }

    async fn detail_menu(&self, object: &CatalogObjectRef, console: &mut dyn Console) -> BrowserEvent {
        let actions = detail_actions(self.kind);
        console.print_line("");
        console.print_line(&format!("-- {}: {} --", self.kind.to_string().to_uppercase(), object.name));
        for (i, action) in actions.iter().enumerate() {
            console.print_line(&format!("{}. {}", i + 1, action.label()));
        }
        console.print_line(&format!("{}. Back", actions.len() + 1));

        let input = console.read_line("Choose option: ");
        if console.is_closed() {
            return BrowserEvent::InputClosed;
        }

        let choice = parse_menu_choice(self.kind, &input);
        match choice {
            MenuChoice::Action(action) => {
                if let Err(e) = self.run_action(action, object, console).await {
                    self.report(console, &e);
                }
            }
            MenuChoice::Invalid => console.print_line("Invalid."),
            MenuChoice::Back => {}
        }
        BrowserEvent::Menu(choice)
    }

    async fn run_action(
        &self,
        action: DetailAction,
        object: &CatalogObjectRef,
        console: &mut dyn Console,
    ) -> Result<(), DbError> {
        match action {
            DetailAction::Columns => {
                let columns = self.plugin.list_columns(self.connection, &object.name).await?;
                if columns.is_empty() {
                    console.print_line("No columns found.");
                } else {
                    ColumnListView::new(&object.name, &columns, self.options)
                        .to_object_view()
                        .render(console);
                }
            }
            DetailAction::Constraints => {
                let constraints = self.plugin.list_constraints(self.connection, &object.name).await?;
                if constraints.is_empty() {
                    console.print_line("No constraints found.");
                } else {
                    ConstraintListView::new(&object.name, &constraints)
                        .to_object_view()
                        .render(console);
                }
            }
            DetailAction::Indexes => {
                let indexes = self.plugin.list_indexes(self.connection, &object.name).await?;
                IndexListView::new(&indexes).render(console);
            }
            DetailAction::Definition => match self.plugin.view_source(self.connection, &object.name).await? {
                Some(view) => ViewDefinitionView::new(&view).render(console),
                None => console.print_line("No definition found."),
            },
        }
        Ok(())
    }

    async fn show_sequence(&self, object: &CatalogObjectRef, console: &mut dyn Console) -> Result<(), DbError> {
        let Some(sequence) = self.plugin.sequence_state(self.connection, &object.name).await? else {
            console.print_line("Sequence not found.");
            return Ok(());
        };
        SequenceView::new(&sequence).render(console);

        // NEXTVAL advances the sequence for good; only on an explicit yes.
        let answer = console.read_line("Fetch NEXTVAL? (y/N): ");
        if !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        let next = self.plugin.next_sequence_value(self.connection, &sequence.name).await?;
        SequenceView::new(&sequence.with_next_value(next)).render_next_value(console);
        Ok(())
    }

    async fn show_user(&self, object: &CatalogObjectRef, console: &mut dyn Console) -> Result<(), DbError> {
        match self.plugin.user_info(self.connection, &object.name).await? {
            Some(user) => UserView::new(&user).render(console),
            None => console.print_line("User not found."),
        }
        Ok(())
    }

    fn report(&self, console: &mut dyn Console, error: &DbError) {
        warn!(kind = %self.kind, error = %error, "catalog query failed");
        console.print_line(&format!("Error: {}", error));
    }
}
