#![allow(dead_code)]
use dnstest::client::{exchange, query_message};
use dnstest::proto::op::{Message, MessageType, OpCode, Query};
use dnstest::proto::rr::rdata::A;
use dnstest::proto::rr::{Name, RData, Record, RecordType};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const EXAMPLE_ZONE: &str =
    "example.com. 104 A 127.0.0.1\nexample.com. 104 MX 10 mail.example.com.";

pub const TIMEOUT: Duration = Duration::from_secs(2);

pub fn a_record(name: &str, ttl: u32, octets: [u8; 4]) -> Record {
    let [a, b, c, d] = octets;
    Record::from_rdata(Name::from_str(name).unwrap(), ttl, RData::A(A::new(a, b, c, d)))
}

/// One query, one reply; panics on any exchange failure
pub async fn ask(addr: SocketAddr, name: &str, record_type: RecordType) -> Message {
    let query = query_message(name, record_type).unwrap();
    exchange(addr, &query, TIMEOUT).await.unwrap()
}

/// A query message with a fixed id carrying any number of questions
pub fn request_with_questions(id: u16, questions: &[(&str, RecordType)]) -> Message {
    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    for &(name, record_type) in questions {
        message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    }
    message
}

/// Sends a prebuilt request as is; panics on any exchange failure
pub async fn send_request(addr: SocketAddr, request: &Message) -> Message {
    exchange(addr, request, TIMEOUT).await.unwrap()
}
