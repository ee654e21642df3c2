//! Book model and category inference.

mod classifier;
mod types;

pub use classifier::infer_category;
pub use types::*;
