//! One-shot UDP exchange (RFC 1035 §4.2.1).

use super::message_builder::encode_message;
use dnstest_domain::FixtureError;
use hickory_proto::op::Message;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Sends `query` to `server_addr` and waits up to `timeout` for the reply.
///
/// The reply must carry the query's ID; anything else is reported as
/// [`FixtureError::InvalidResponse`].
pub async fn exchange(
    server_addr: SocketAddr,
    query: &Message,
    timeout: Duration,
) -> Result<Message, FixtureError> {
    let message_bytes = encode_message(query)?;

    // Bind to ephemeral port (0 = OS assigns)
    let bind_addr = if server_addr.is_ipv4() {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
    } else {
        SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| FixtureError::Exchange(format!("Failed to bind UDP socket: {}", e)))?;

    let bytes_sent = tokio::time::timeout(timeout, socket.send_to(&message_bytes, server_addr))
        .await
        .map_err(|_| {
            FixtureError::Timeout(format!("Timeout sending UDP query to {}", server_addr))
        })?
        .map_err(|e| {
            FixtureError::Exchange(format!(
                "Failed to send UDP query to {}: {}",
                server_addr, e
            ))
        })?;

    debug!(server = %server_addr, bytes_sent, "UDP query sent");

    let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

    let (bytes_received, from_addr) =
        tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| {
                FixtureError::Timeout(format!(
                    "Timeout waiting for UDP response from {}",
                    server_addr
                ))
            })?
            .map_err(|e| {
                FixtureError::Exchange(format!(
                    "Failed to receive UDP response from {}: {}",
                    server_addr, e
                ))
            })?;

    if from_addr != server_addr {
        warn!(
            expected = %server_addr,
            received_from = %from_addr,
            "UDP response from unexpected source"
        );
    }

    let response = Message::from_vec(&recv_buf[..bytes_received]).map_err(|e| {
        FixtureError::InvalidResponse(format!("Failed to parse DNS response: {}", e))
    })?;

    if response.id() != query.id() {
        return Err(FixtureError::InvalidResponse(format!(
            "Response ID {} does not match query ID {}",
            response.id(),
            query.id()
        )));
    }

    debug!(
        server = %server_addr,
        bytes_received,
        answers = response.answers().len(),
        "UDP response received"
    );

    Ok(response)
}
