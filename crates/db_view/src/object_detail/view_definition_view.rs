use db::types::ViewInfo;

use crate::console::Render;

const RULE_WIDTH: usize = 50;

pub struct ViewDefinitionView<'a> {
    view: &'a ViewInfo,
}

impl<'a> ViewDefinitionView<'a> {
    pub fn new(view: &'a ViewInfo) -> Self {
        Self { view }
    }

    pub fn render<R: Render + ?Sized>(&self, out: &mut R) {
        let rule = "-".repeat(RULE_WIDTH);
        out.print_line("");
        out.print_line(&format!("Definition for {}:", self.view.name));
        out.print_line(&rule);
        out.print_line(&self.view.definition);
        out.print_line(&rule);
    }
}
