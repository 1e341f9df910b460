// Reductions over whole volumes (stats) and over chosen axes (any).
pub mod any;
pub mod stats;

pub use any::any_op;
pub use stats::{max_op, mean_op, min_op, std_op, sum_op};
