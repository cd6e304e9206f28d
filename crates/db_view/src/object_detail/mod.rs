mod detail_view;
mod object_list_view;
mod column_list_view;
mod constraint_list_view;
mod index_list_view;
mod view_definition_view;
mod sequence_view;
mod user_view;

pub use detail_view::{ObjectView, ViewOptions};
pub use object_list_view::ObjectListView;
pub use column_list_view::ColumnListView;
pub use constraint_list_view::ConstraintListView;
pub use index_list_view::IndexListView;
pub use view_definition_view::ViewDefinitionView;
pub use sequence_view::SequenceView;
pub use user_view::UserView;
