use db::types::SequenceInfo;

use crate::console::Render;

pub struct SequenceView<'a> {
    sequence: &'a SequenceInfo,
}

impl<'a> SequenceView<'a> {
    pub fn new(sequence: &'a SequenceInfo) -> Self {
        Self { sequence }
    }

    pub fn summary(&self) -> String {
        let s = self.sequence;
        format!(
            "Min: {}, Max: {}, Increment: {}, Cycle: {}, Order: {}, Last: {}",
            s.min_value,
            s.max_value,
            s.increment,
            yes_no(s.cycle),
            yes_no(s.ordered),
            s.last_number
        )
    }

    pub fn render<R: Render + ?Sized>(&self, out: &mut R) {
        out.print_line("");
        out.print_line(&format!("Sequence {}:", self.sequence.name));
        out.print_line(&self.summary());
    }

    /// Prints the value drawn by an explicit NEXTVAL request, if there was one.
    pub fn render_next_value<R: Render + ?Sized>(&self, out: &mut R) {
        if let Some(next) = self.sequence.next_value {
            out.print_line(&format!("NEXTVAL = {}", next));
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Y" } else { "N" }
}
