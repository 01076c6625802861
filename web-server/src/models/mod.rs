//! Request/response models

mod readings;
mod page;

pub use readings::{describe_range_errors, Readings};
pub use page::PageQuery;
