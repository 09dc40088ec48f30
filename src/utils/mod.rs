pub mod logging;

pub use logging::{init_logging, resolve_log_dir};
