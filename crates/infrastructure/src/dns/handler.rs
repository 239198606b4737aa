use super::reply::{send_reply, Reply};
use crate::zone::ZoneRecords;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, warn};

/// Answers queries from a fixed [`ZoneRecords`].
///
/// The records are shared read-only between concurrent requests.
#[derive(Debug, Clone)]
pub struct ZoneHandler {
    records: Arc<ZoneRecords>,
}

impl ZoneHandler {
    pub fn new(records: ZoneRecords) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for ZoneHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let queries = request.queries();
        let reply = Reply::for_queries(&self.records, queries);

        match queries {
            [query] => {
                debug!(
                    domain = %query.name(),
                    record_type = ?query.query_type(),
                    client = %request.src(),
                    answers = reply.answers().len(),
                    "DNS query received"
                );
            }
            _ => {
                warn!(
                    questions = queries.len(),
                    client = %request.src(),
                    "Request must carry exactly one question"
                );
            }
        }

        send_reply(request, &mut response_handle, &reply).await
    }
}

/// Adapts a closure into a [`RequestHandler`].
///
/// The closure decides the [`Reply`]; sending it, with the same correlation
/// as [`ZoneHandler`], is taken care of.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&Request) -> Reply + Send + Sync + Unpin + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait::async_trait]
impl<F> RequestHandler for FnHandler<F>
where
    F: Fn(&Request) -> Reply + Send + Sync + Unpin + 'static,
{
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let reply = (self.f)(request);
        send_reply(request, &mut response_handle, &reply).await
    }
}
