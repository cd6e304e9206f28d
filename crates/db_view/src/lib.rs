pub mod console;
pub mod selection;
pub mod object_detail;
pub mod browser;
pub mod dispatcher;

pub use console::{Align, ColumnSpec, Console, Prompt, Render};
pub use selection::{choose, parse_choice, InvalidSelection};
pub use object_detail::ViewOptions;
pub use browser::{BrowserEvent, BrowserState, DetailAction, MenuChoice, ObjectBrowser};
pub use dispatcher::{Dispatcher, DispatcherEvent, DispatcherState, MainMenuChoice};
