use db::CatalogObjectRef;

use crate::console::Render;

/// Numbered listing the operator picks from; numbering starts at 1.
pub struct ObjectListView<'a> {
    objects: &'a [CatalogObjectRef],
}

impl<'a> ObjectListView<'a> {
    pub fn new(objects: &'a [CatalogObjectRef]) -> Self {
        Self { objects }
    }

    pub fn lines(&self) -> Vec<String> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| format!("{}. {}", i + 1, object.name))
            .collect()
    }

    pub fn render<R: Render + ?Sized>(&self, out: &mut R) {
        if self.objects.is_empty() {
            out.print_line("No objects found.");
            return;
        }
        for line in self.lines() {
            out.print_line(&line);
        }
    }
}
