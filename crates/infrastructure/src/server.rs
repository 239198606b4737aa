//! Loopback DNS server lifecycle.
//!
//! [`UnstartedServer`] holds only a handler. [`UnstartedServer::start`]
//! turns it into a running [`Server`] bound to an OS-assigned UDP port on
//! `127.0.0.1`, and [`Server::close`] consumes it. Both transitions take
//! `self`, so a server cannot be started twice or used after close.

use crate::dns::ZoneHandler;
use crate::zone::ZoneRecords;
use dnstest_domain::FixtureError;
use hickory_server::server::RequestHandler;
use hickory_server::ServerFuture;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::{error, info};

const LOOPBACK_EPHEMERAL: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);

/// A server that has not bound a socket yet.
pub struct UnstartedServer<H: RequestHandler> {
    handler: H,
}

impl<H: RequestHandler> UnstartedServer<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Binds the loopback socket and starts serving in the background.
    ///
    /// Returns as soon as the socket is registered; the serve task runs on
    /// the current tokio runtime independently of the caller.
    pub async fn start(self) -> Result<Server<H>, FixtureError> {
        let socket = UdpSocket::bind(LOOPBACK_EPHEMERAL).await.map_err(|e| {
            error!(error = %e, "Failed to bind UDP socket");
            FixtureError::Bind(format!("{}: {}", LOOPBACK_EPHEMERAL, e))
        })?;
        let addr = socket
            .local_addr()
            .map_err(|e| FixtureError::Bind(format!("no local address: {}", e)))?;

        let mut server = ServerFuture::new(self.handler);
        server.register_socket(socket);

        info!(bind_address = %addr, "DNS test server listening");

        Ok(Server { server, addr })
    }
}

/// A running server; the socket stays bound until [`Server::close`].
pub struct Server<H: RequestHandler> {
    server: ServerFuture<H>,
    addr: SocketAddr,
}

impl<H: RequestHandler> Server<H> {
    /// Starts a server answering with `handler`.
    pub async fn new(handler: H) -> Result<Self, FixtureError> {
        UnstartedServer::new(handler).start().await
    }

    /// The bound loopback address; its `Display` form is what DNS clients
    /// should be pointed at.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops the serve task and waits for it to finish.
    ///
    /// Errors from the serve loop, including ones it hit before close was
    /// called, surface here.
    pub async fn close(mut self) -> Result<(), FixtureError> {
        self.server.shutdown_gracefully().await.map_err(|e| {
            error!(bind_address = %self.addr, error = %e, "DNS test server shutdown failed");
            FixtureError::Shutdown(e.to_string())
        })?;

        info!(bind_address = %self.addr, "DNS test server closed");
        Ok(())
    }
}

impl Server<ZoneHandler> {
    /// Starts a server answering from zone text.
    ///
    /// The text is parsed before any socket is bound, so a malformed zone
    /// fails with [`FixtureError::InvalidZone`] and leaves nothing behind.
    pub async fn bind(zone: &str) -> Result<Self, FixtureError> {
        let records = ZoneRecords::parse(zone)?;
        Self::new(ZoneHandler::new(records)).await
    }
}

impl<H: RequestHandler> fmt::Debug for UnstartedServer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnstartedServer").finish_non_exhaustive()
    }
}

impl<H: RequestHandler> fmt::Debug for Server<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server").field("addr", &self.addr).finish_non_exhaustive()
    }
}
