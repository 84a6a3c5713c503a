mod batch;
mod failure;
mod item;
mod query;

pub use batch::{BatchRow, ImportSummary, read_batch};
pub use failure::StockFailure;
pub use item::{ItemData, ItemRecord, ItemUpdate};
pub use query::{Comparison, CompositionFilter, ItemFilter, ItemQuery, ItemQueryResponse, SortField};
