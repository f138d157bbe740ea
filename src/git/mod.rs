pub mod range;
pub mod repo;

pub use range::{resolve_range, RangeRequest};
pub use repo::{GitRepo, LogSource};
