/// Per-frame delay computation.
pub mod schedule;
pub mod session;
