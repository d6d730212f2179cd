pub mod loaders;
pub mod query;
pub mod record;

pub use loaders::load_config_file;
pub use query::{SearchQuery, PAGE_SIZE};
pub use record::{FallbackPolicy, FieldValue, Record, SENTINEL};
