pub mod stats;
pub mod submission;

pub use stats::*;
pub use submission::*;
