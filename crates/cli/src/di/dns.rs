use a2cname_application::ports::QueryHandler;
use a2cname_application::use_cases::A2CnameHandler;
use a2cname_domain::Config;
use a2cname_infrastructure::dns::{ForwardHandler, UpstreamAResolver};
use std::sync::Arc;
use tracing::{info, warn};

/// Rewriter first, then the optional forwarder.
pub fn build_handler_chain(config: &Config) -> anyhow::Result<Arc<dyn QueryHandler>> {
    let endpoint = config.a2cname.upstream_endpoint()?;
    let resolver = Arc::new(UpstreamAResolver::new(endpoint));

    let mut rewriter = A2CnameHandler::new(&config.a2cname, resolver)?;

    match &config.forward {
        Some(forward) => {
            let endpoint = forward.endpoint()?;
            info!(upstream = %endpoint, "Forwarding unanswered queries");
            rewriter = rewriter.with_next(Arc::new(ForwardHandler::new(endpoint)));
        }
        None => {
            warn!("No [forward] upstream configured; unanswered queries get SERVFAIL");
        }
    }

    Ok(Arc::new(rewriter))
}
