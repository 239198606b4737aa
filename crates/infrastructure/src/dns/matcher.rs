//! Record selection for a single question.
//!
//! Deliberately simpler than an authoritative server: names compare by
//! exact (lowercased) equality and types by a small fixed policy. There is
//! no wildcard expansion and no CNAME chasing.

use hickory_proto::rr::{LowerName, Record, RecordType};

/// SPF (RFC 4408) has no dedicated variant in hickory's `RecordType`.
pub const SPF: RecordType = RecordType::Unknown(SPF_CODE);
const SPF_CODE: u16 = 99;

/// Whether a record of `record_type` answers a `query_type` question.
///
/// - `ANY` takes every record type.
/// - A, AAAA, MX, TXT, SPF, NS, SRV, SOA and CNAME take only their own type.
///   A CNAME is never returned for a question of another type.
/// - Every other query type matches nothing, which yields an empty answer
///   rather than an error.
pub fn type_matches(query_type: RecordType, record_type: RecordType) -> bool {
    match query_type {
        RecordType::ANY => true,
        RecordType::A
        | RecordType::AAAA
        | RecordType::MX
        | RecordType::TXT
        | RecordType::NS
        | RecordType::SRV
        | RecordType::SOA
        | RecordType::Unknown(SPF_CODE) => record_type == query_type,
        RecordType::CNAME => record_type == RecordType::CNAME,
        _ => false,
    }
}

/// Linear scan over `records`, keeping their order.
pub(crate) fn select<'a, I>(
    records: I,
    name: &'a LowerName,
    query_type: RecordType,
) -> impl Iterator<Item = &'a Record> + 'a
where
    I: Iterator<Item = (&'a LowerName, &'a Record)> + 'a,
{
    records
        .filter(move |(owner, record)| {
            *owner == name && type_matches(query_type, record.record_type())
        })
        .map(|(_, record)| record)
}
