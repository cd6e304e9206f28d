use db::types::IndexInfo;

use crate::console::Render;

/// Indexes of a table, each followed by its columns in key order
pub struct IndexListView<'a> {
    indexes: &'a [IndexInfo],
}

impl<'a> IndexListView<'a> {
    pub fn new(indexes: &'a [IndexInfo]) -> Self {
        Self { indexes }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, index) in self.indexes.iter().enumerate() {
            let uniqueness = if index.is_unique { "UNIQUE" } else { "NONUNIQUE" };
            lines.push(String::new());
            lines.push(format!("{}. Index: {} ({})", i + 1, index.name, uniqueness));
            for column in &index.columns {
                lines.push(format!("   {}. {} ({})", column.position, column.name, column.direction));
            }
        }
        lines
    }

    pub fn render<R: Render + ?Sized>(&self, out: &mut R) {
        if self.indexes.is_empty() {
            out.print_line("No indexes found.");
            return;
        }
        for line in self.lines() {
            out.print_line(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::types::{IndexColumn, SortDirection};

    #[test]
    fn lists_columns_under_each_index() {
        let indexes = vec![IndexInfo {
            name: "EMP_NAME_IX".into(),
            is_unique: false,
            columns: vec![
                IndexColumn {
                    name: "LAST_NAME".into(),
                    position: 1,
                    direction: SortDirection::Asc,
                },
                IndexColumn {
                    name: "HIRE_DATE".into(),
                    position: 2,
                    direction: SortDirection::Desc,
                },
            ],
        }];

        let lines = IndexListView::new(&indexes).lines();
        assert_eq!(
            lines,
            vec![
                "",
                "1. Index: EMP_NAME_IX (NONUNIQUE)",
                "   1. LAST_NAME (ASC)",
                "   2. HIRE_DATE (DESC)",
            ]
        );
    }
}
