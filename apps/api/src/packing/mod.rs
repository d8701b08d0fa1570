// Packing engine: package size catalog + over-delivery minimizing solver.
// The engine is pure and synchronous; handlers run it inside spawn_blocking.

pub mod catalog;
pub mod error;
pub mod handlers;
pub mod solver;

pub use catalog::PackageCatalog;
pub use error::PackingError;
pub use solver::{solve, OptimizationResult};
