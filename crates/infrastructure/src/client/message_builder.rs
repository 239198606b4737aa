//! Builds query messages with `hickory-proto`.

use dnstest_domain::FixtureError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Build a standard query for `domain`/`record_type`
///
/// Random ID, RD flag set, a single IN question.
pub fn query_message(domain: &str, record_type: RecordType) -> Result<Message, FixtureError> {
    let name = Name::from_str(domain).map_err(|e| {
        FixtureError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
    })?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new();
    message.set_id(fastrand::u16(..));
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    Ok(message)
}

/// Serialize a Message to wire format bytes
pub fn encode_message(message: &Message) -> Result<Vec<u8>, FixtureError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        FixtureError::Exchange(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}
