pub mod a2cname;

pub use a2cname::{A2CnameHandler, CnameResponseBuilder, ZoneMatcher, PLUGIN_NAME};
