use super::response::CnameResponseBuilder;
use super::zones::ZoneMatcher;
use crate::ports::{next_or_failure, QueryHandler, ResponseWriter, UpstreamResolver};
use a2cname_domain::{
    AddressTransformer, ConfigError, DnsQuery, DomainError, PluginConfig, RecordType,
    SynthesizedAnswer,
};
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, Instrument, Span};

pub const PLUGIN_NAME: &str = "a2cname";

/// Answers A queries inside the configured zones with a CNAME to a hostname
/// derived from the upstream address. Everything else, and every upstream
/// failure, goes to the next handler.
pub struct A2CnameHandler {
    zones: ZoneMatcher,
    transformer: AddressTransformer,
    resolver: Arc<dyn UpstreamResolver>,
    next: Option<Arc<dyn QueryHandler>>,
    span: Span,
}

impl A2CnameHandler {
    pub fn new(
        config: &PluginConfig,
        resolver: Arc<dyn UpstreamResolver>,
    ) -> Result<Self, ConfigError> {
        let zones = ZoneMatcher::new(&config.zone_set()?)?;
        let transformer = config.transformer();

        let probe = transformer.transform("0.0.0.0");
        CnameResponseBuilder::parse_name(&probe).map_err(|e| {
            ConfigError::Validation(format!(
                "target_suffix '{}' does not form a valid name: {}",
                transformer.suffix(),
                e
            ))
        })?;

        info!(
            zones = zones.len(),
            target_suffix = transformer.suffix(),
            upstream = %resolver.server(),
            "a2cname handler created"
        );

        Ok(Self {
            zones,
            transformer,
            resolver,
            next: None,
            span: info_span!("plugin", name = PLUGIN_NAME),
        })
    }

    pub fn with_next(mut self, next: Arc<dyn QueryHandler>) -> Self {
        self.next = Some(next);
        self
    }

    /// Replaces the span every request is recorded under.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn zones(&self) -> &ZoneMatcher {
        &self.zones
    }

    /// Returns the question to rewrite, or `None` when the request is not an
    /// A query inside a configured zone.
    pub fn rewrite_candidate(&self, request: &Message) -> Option<DnsQuery> {
        let question = request.queries().first()?;
        let record_type = RecordType::from_u16(u16::from(question.query_type()));
        if !record_type.is_rewritable() {
            debug!(record_type = %record_type, "Not an A query");
            return None;
        }

        if !self.zones.matches(question.name()) {
            debug!(domain = %question.name(), "Outside configured zones");
            return None;
        }

        Some(DnsQuery::new(question.name().to_ascii(), record_type))
    }

    async fn dispatch(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        let Some(query) = self.rewrite_candidate(request) else {
            return next_or_failure(PLUGIN_NAME, self.next.as_ref(), request, writer).await;
        };

        debug!(domain = %query.domain, "Processing query");

        let address = match self.resolver.resolve_a(&query.domain).await {
            Ok(address) => address,
            Err(e) => {
                error!(
                    domain = %query.domain,
                    upstream = %self.resolver.server(),
                    error = %e,
                    "Failed to resolve"
                );
                return next_or_failure(PLUGIN_NAME, self.next.as_ref(), request, writer).await;
            }
        };

        let target = self.transformer.transform_ipv4(address);
        debug!(
            domain = %query.domain,
            address = %address,
            target = %target,
            "Transformed"
        );

        let answer = SynthesizedAnswer::new(Arc::clone(&query.domain), target);
        let response = CnameResponseBuilder::build(request, &answer)?;
        writer.write_message(response)?;

        Ok(ResponseCode::NoError)
    }
}

#[async_trait]
impl QueryHandler for A2CnameHandler {
    async fn serve_dns(
        &self,
        request: &Message,
        writer: &mut dyn ResponseWriter,
    ) -> Result<ResponseCode, DomainError> {
        self.dispatch(request, writer)
            .instrument(self.span.clone())
            .await
    }

    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }
}
