pub mod upstream;

pub use upstream::{UpstreamAResolver, UPSTREAM_TIMEOUT};
