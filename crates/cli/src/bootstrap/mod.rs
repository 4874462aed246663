mod config;
mod logging;

pub use config::{load_config, read_directive};
pub use logging::init_logging;
