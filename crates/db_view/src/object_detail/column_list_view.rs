use db::types::ColumnInfo;

use super::detail_view::{ObjectView, ViewOptions};
use crate::console::ColumnSpec;

/// Column metadata for a table or view
pub struct ColumnListView<'a> {
    table_name: &'a str,
    columns: &'a [ColumnInfo],
    options: ViewOptions,
}

impl<'a> ColumnListView<'a> {
    pub fn new(table_name: &'a str, columns: &'a [ColumnInfo], options: ViewOptions) -> Self {
        Self {
            table_name,
            columns,
            options,
        }
    }

    pub fn to_object_view(&self) -> ObjectView {
        let columns = vec![
            ColumnSpec::new("ID").width(3).text_right(),
            ColumnSpec::new("COLUMN_NAME").width(25),
            ColumnSpec::new("TYPE").width(15),
            ColumnSpec::new("LEN").width(5).text_right(),
            ColumnSpec::new("PREC").width(5).text_right(),
            ColumnSpec::new("SCALE").width(5).text_right(),
            ColumnSpec::new("NULL").width(5),
            ColumnSpec::new("DEFAULT").width(self.options.default_width),
        ];

        let rows = self
            .columns
            .iter()
            .map(|col| {
                vec![
                    col.position.to_string(),
                    col.name.clone(),
                    col.data_type.clone(),
                    col.length.to_string(),
                    col.precision.map(|p| p.to_string()).unwrap_or_default(),
                    col.scale.map(|s| s.to_string()).unwrap_or_default(),
                    if col.is_nullable { "Y" } else { "N" }.to_string(),
                    col.default_preview(self.options.default_width),
                ]
            })
            .collect();

        ObjectView {
            title: format!("Columns for {}:", self.table_name),
            columns,
            rows,
        }
    }
}
