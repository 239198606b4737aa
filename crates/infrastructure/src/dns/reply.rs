use crate::zone::ZoneRecords;
use hickory_proto::op::{Header, LowerQuery, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, ResponseHandler, ResponseInfo};
use tracing::{debug, error};

/// What a handler answers with: a response code and answer records.
///
/// Correlation with the request (id, opcode, echoed question) is added when
/// the reply is sent, see [`send_reply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    response_code: ResponseCode,
    answers: Vec<Record>,
}

impl Reply {
    /// Successful reply; an empty `answers` is a plain "no data" answer.
    pub fn answer(answers: Vec<Record>) -> Self {
        Self {
            response_code: ResponseCode::NoError,
            answers,
        }
    }

    pub fn error(response_code: ResponseCode) -> Self {
        Self {
            response_code,
            answers: Vec::new(),
        }
    }

    pub fn format_error() -> Self {
        Self::error(ResponseCode::FormErr)
    }

    /// Answers `queries` from `zone`.
    ///
    /// Anything but exactly one question is a format error with no answers.
    pub fn for_queries(zone: &ZoneRecords, queries: &[LowerQuery]) -> Self {
        match queries {
            [query] => Self::answer(
                zone.lookup(query.name(), query.query_type())
                    .cloned()
                    .collect(),
            ),
            _ => Self::format_error(),
        }
    }

    pub fn response_code(&self) -> ResponseCode {
        self.response_code
    }

    pub fn answers(&self) -> &[Record] {
        &self.answers
    }
}

/// Writes `reply` back as the response to `request`.
///
/// A failed write is logged and reported through the returned
/// [`ResponseInfo`]; it does not stop the server, which keeps answering
/// later requests.
pub async fn send_reply<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    reply: &Reply,
) -> ResponseInfo {
    debug!(
        code = ?reply.response_code(),
        answers = reply.answers().len(),
        "Sending response"
    );

    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = Header::response_from_request(request.header());
    header.set_response_code(reply.response_code());
    let response = builder.build(header, reply.answers().iter(), &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, client = %request.src(), "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}
