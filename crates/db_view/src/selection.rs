use db::CatalogObjectRef;
use thiserror::Error;
use tracing::debug;

use crate::console::Render;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    #[error("`{0}` is not a number")]
    NotANumber(String),

    #[error("{choice} is outside 1..={len}")]
    OutOfRange { choice: usize, len: usize },
}

/// Parses a 1-based ordinal into a 0-based index.
///
/// Blank input is a cancel (`Ok(None)`).
pub fn parse_choice(input: &str, len: usize) -> Result<Option<usize>, InvalidSelection> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let choice: usize = input
        .parse()
        .map_err(|_| InvalidSelection::NotANumber(input.to_string()))?;
    if choice == 0 || choice > len {
        return Err(InvalidSelection::OutOfRange { choice, len });
    }
    Ok(Some(choice - 1))
}

/// The one selection primitive every browser uses. Unusable input is
/// reported to the operator and treated like a cancel.
pub fn choose<'a, R: Render + ?Sized>(
    items: &'a [CatalogObjectRef],
    input: &str,
    out: &mut R,
) -> Option<&'a CatalogObjectRef> {
    match parse_choice(input, items.len()) {
        Ok(Some(index)) => items.get(index),
        Ok(None) => None,
        Err(e) => {
            debug!(error = %e, "rejected selection");
            out.print_line("Invalid choice.");
            None
        }
    }
}
