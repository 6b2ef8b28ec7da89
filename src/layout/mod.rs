pub mod columns;
pub mod shuffle;
pub mod slides;

pub use columns::{build_columns, ColumnModel, DEFAULT_COLUMN_COUNT};
pub use shuffle::ShuffledOrder;
pub use slides::{build_slides, DEFAULT_MAX_SLIDES};
