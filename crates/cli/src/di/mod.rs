mod dns;

pub use dns::build_handler_chain;
