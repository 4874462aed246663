pub mod directive;
pub mod errors;
pub mod forward;
pub mod logging;
pub mod plugin;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use forward::ForwardConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use plugin::{PluginConfig, DEFAULT_UPSTREAM};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
