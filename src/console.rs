use std::io::{self, Write};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use db_view::{Align, ColumnSpec, Prompt, Render};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style, Width};
use tracing::{debug, warn};

/// Terminal console: rustyline for input, tabled for tables.
pub struct StdConsole {
    editor: DefaultEditor,
    closed: bool,
}

impl StdConsole {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            closed: false,
        })
    }

    fn read_hidden(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        enable_raw_mode()?;
        let result = Self::collect_hidden();
        let _ = disable_raw_mode();
        println!();
        result
    }

    /// Returns `None` on Ctrl-D with nothing typed.
    fn collect_hidden() -> io::Result<Option<String>> {
        let mut secret = String::new();
        loop {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Enter => return Ok(Some(secret)),
                    KeyCode::Backspace => {
                        secret.pop();
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(Some(String::new()));
                    }
                    KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                        if secret.is_empty() {
                            return Ok(None);
                        }
                    }
                    KeyCode::Char(c) => secret.push(c),
                    _ => {}
                }
            }
        }
    }
}

impl Prompt for StdConsole {
    fn read_line(&mut self, prompt: &str) -> String {
        if self.closed {
            return String::new();
        }
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                line
            }
            Err(ReadlineError::Interrupted) => String::new(),
            Err(ReadlineError::Eof) => {
                self.closed = true;
                String::new()
            }
            Err(e) => {
                warn!(error = %e, "input failed, closing");
                self.closed = true;
                String::new()
            }
        }
    }

    fn read_secret(&mut self, prompt: &str) -> String {
        if self.closed {
            return String::new();
        }
        match self.read_hidden(prompt) {
            Ok(Some(secret)) => secret,
            Ok(None) => {
                self.closed = true;
                String::new()
            }
            Err(e) => {
                // Not a terminal (piped input); fall back to a plain read.
                debug!(error = %e, "raw mode unavailable");
                self.read_line("")
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Render for StdConsole {
    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn print_table(&mut self, columns: &[ColumnSpec], rows: &[Vec<String>]) {
        println!("{}", format_table(columns, rows));
    }
}

pub fn format_table(columns: &[ColumnSpec], rows: &[Vec<String>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.title.to_string()));
    for row in rows {
        builder.push_record(row.iter().cloned());
    }

    let mut table = builder.build();
    table.with(Style::psql());
    for (i, column) in columns.iter().enumerate() {
        if column.align == Align::Right {
            table.with(Modify::new(Columns::single(i)).with(Alignment::right()));
        }
        if let Some(width) = column.width {
            table.with(Modify::new(Columns::single(i)).with(Width::increase(width)));
        }
    }
    table.to_string()
}
