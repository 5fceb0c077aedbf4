//! Command implementations

mod compare;
mod index;
mod lint;
mod review;

pub use compare::run_compare_index;
pub use index::run_index;
pub use lint::run_lint;
pub use review::run_review;
