use crate::console::{ColumnSpec, Render};

/// Display settings shared by every detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Characters of a column default shown in the column listing
    pub default_width: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { default_width: 10 }
    }
}

/// A titled table ready for the render boundary
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectView {
    pub title: String,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Vec<String>>,
}

impl ObjectView {
    pub fn render<R: Render + ?Sized>(&self, out: &mut R) {
        out.print_line("");
        out.print_line(&self.title);
        out.print_table(&self.columns, &self.rows);
    }
}

pub(crate) fn or_empty(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}
