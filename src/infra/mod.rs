//! Infrastructure layer - Persistence
//!
//! - `dataset`: the named collections and cross-collection helpers
//! - `unit_of_work`: atomic access to the dataset (in memory or JSON file)

pub mod dataset;
pub mod unit_of_work;

pub use dataset::Dataset;
pub use unit_of_work::{Persistence, UnitOfWork};
