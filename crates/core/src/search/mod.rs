//! Search orchestration and its display state.

mod orchestrator;
mod types;

pub use orchestrator::SearchOrchestrator;
pub use types::*;
