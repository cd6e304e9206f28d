use db::types::ConstraintInfo;

use super::detail_view::{or_empty, ObjectView};
use crate::console::ColumnSpec;

/// One row per (constraint, column) pairing
pub struct ConstraintListView<'a> {
    table_name: &'a str,
    constraints: &'a [ConstraintInfo],
}

impl<'a> ConstraintListView<'a> {
    pub fn new(table_name: &'a str, constraints: &'a [ConstraintInfo]) -> Self {
        Self {
            table_name,
            constraints,
        }
    }

    pub fn to_object_view(&self) -> ObjectView {
        let columns = vec![
            ColumnSpec::new("CONSTRAINT_NAME").width(30),
            ColumnSpec::new("TYPE").width(18),
            ColumnSpec::new("COLUMN").width(25),
            ColumnSpec::new("REFERENCES").width(30),
            ColumnSpec::new("CONDITION"),
        ];

        let rows = self
            .constraints
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.kind.to_string(),
                    or_empty(c.column_name.as_deref()),
                    or_empty(c.referenced_constraint.as_deref()),
                    or_empty(c.search_condition.as_deref()),
                ]
            })
            .collect();

        ObjectView {
            title: format!("Constraints for {}:", self.table_name),
            columns,
            rows,
        }
    }
}
