//! Kiln general utilities.

pub mod logging;
pub mod testing;

// Re-export the logging facade and derive helpers so that every crate
// in the workspace agrees on their versions.
pub use derive_more;
pub use log;
