pub mod field_filler;
pub mod layout;
pub mod result_sink;

pub use field_filler::FieldFiller;
pub use layout::{FieldMap, LayoutAdapter, LayoutVariant};
pub use result_sink::{JsonLinesSink, ResultSink};
