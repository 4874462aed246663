//! a2cname application layer: ports and the rewriting handler.
pub mod ports;
pub mod use_cases;
