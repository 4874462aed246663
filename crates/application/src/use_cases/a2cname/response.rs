use a2cname_domain::{DomainError, SynthesizedAnswer};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::CNAME;
use hickory_proto::rr::{Name, RData, Record};

/// Builds reply messages for the rewriter and for the server's error paths.
pub struct CnameResponseBuilder;

impl CnameResponseBuilder {
    /// Authoritative reply to `request` carrying exactly one CNAME record
    /// from the query name to the synthesized target.
    pub fn build(request: &Message, answer: &SynthesizedAnswer) -> Result<Message, DomainError> {
        let owner = Self::parse_name(&answer.owner)?;
        let target = Self::parse_name(&answer.target)?;

        let mut response = Self::reply_to(request);
        response.set_authoritative(true);
        response.add_answer(Record::from_rdata(
            owner,
            answer.ttl,
            RData::CNAME(CNAME(target)),
        ));

        Ok(response)
    }

    /// Empty NOERROR reply echoing the request's ID, opcode, RD/CD bits and
    /// first question.
    pub fn reply_to(request: &Message) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_checking_disabled(request.checking_disabled());
        response.set_response_code(ResponseCode::NoError);
        if let Some(query) = request.queries().first() {
            response.add_query(query.clone());
        }
        response
    }

    /// Empty reply carrying `code`.
    pub fn error_reply(request: &Message, code: ResponseCode) -> Message {
        let mut response = Self::reply_to(request);
        response.set_response_code(code);
        response
    }

    pub fn parse_name(name: &str) -> Result<Name, DomainError> {
        Name::from_ascii(name).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", name, e))
        })
    }
}
