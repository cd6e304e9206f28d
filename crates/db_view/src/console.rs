/// Operator input.
///
/// `read_line` never fails: an empty string means blank input (cancel), and
/// once the input stream has ended every read returns empty and
/// `is_closed` reports true.
pub trait Prompt {
    fn read_line(&mut self, prompt: &str) -> String;

    /// Like `read_line`, without echoing what is typed.
    fn read_secret(&mut self, prompt: &str) -> String;

    fn is_closed(&self) -> bool {
        false
    }
}

/// Pure output; nothing written here is read back by the browser.
pub trait Render {
    fn print_line(&mut self, text: &str);

    fn print_table(&mut self, columns: &[ColumnSpec], rows: &[Vec<String>]);
}

pub trait Console: Prompt + Render {}

impl<T: Prompt + Render + ?Sized> Console for T {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Header and layout hint for one column of a rendered table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub title: &'static str,
    /// Minimum width; cells are padded to it, never cut.
    pub width: Option<usize>,
    pub align: Align,
}

impl ColumnSpec {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            width: None,
            align: Align::Left,
        }
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn text_right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// Feeds canned answers and records everything printed.
    #[derive(Default)]
    pub struct ScriptedConsole {
        inputs: VecDeque<String>,
        pub prompts: Vec<String>,
        pub lines: Vec<String>,
        pub tables: Vec<(Vec<ColumnSpec>, Vec<Vec<String>>)>,
        closed: bool,
    }

    impl ScriptedConsole {
        pub fn new(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }

        pub fn output(&self) -> String {
            self.lines.join("\n")
        }

        pub fn printed(&self, text: &str) -> bool {
            self.lines.iter().any(|l| l.contains(text))
        }

        pub fn prompted(&self, text: &str) -> bool {
            self.prompts.iter().any(|p| p.contains(text))
        }
    }

    impl Prompt for ScriptedConsole {
        fn read_line(&mut self, prompt: &str) -> String {
            self.prompts.push(prompt.to_string());
            match self.inputs.pop_front() {
                Some(input) => input,
                None => {
                    self.closed = true;
                    String::new()
                }
            }
        }

        fn read_secret(&mut self, prompt: &str) -> String {
            self.read_line(prompt)
        }

        fn is_closed(&self) -> bool {
            self.closed
        }
    }

    impl Render for ScriptedConsole {
        fn print_line(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn print_table(&mut self, columns: &[ColumnSpec], rows: &[Vec<String>]) {
            self.tables.push((columns.to_vec(), rows.to_vec()));
        }
    }
}
