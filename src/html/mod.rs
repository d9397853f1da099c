mod fragments;
mod legend;
mod writer;

pub use fragments::{INFO_BOX, NOTE_BOX, VIEWPORT_META};
pub use legend::{legend_box, legend_script, LegendKind, LEGEND_CONTAINER_ID};
pub use writer::HtmlWriter;
