pub mod formatting;
pub mod summary;

pub use formatting::*;
pub use summary::*;
