mod handler;
mod response;
mod zones;

pub use handler::{A2CnameHandler, PLUGIN_NAME};
pub use response::CnameResponseBuilder;
pub use zones::ZoneMatcher;
