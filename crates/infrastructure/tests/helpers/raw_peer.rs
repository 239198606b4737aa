#![allow(dead_code)]
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How a [`RawPeer`] treats each datagram it receives
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Never answer
    Silent,
    /// Answer with bytes that are not a DNS message
    Garbage,
    /// Echo the query back as a response with a different ID
    WrongId,
}

/// A UDP peer that misbehaves on purpose, for exercising the client side.
pub struct RawPeer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl RawPeer {
    pub async fn start(behaviour: Behaviour) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::respond(behaviour, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn respond(behaviour: Behaviour, query: &[u8]) -> Option<Vec<u8>> {
        match behaviour {
            Behaviour::Silent => None,
            Behaviour::Garbage => Some(vec![0xde, 0xad, 0xbe]),
            Behaviour::WrongId if query.len() >= 12 => {
                let mut response = query.to_vec();
                response[0] ^= 0xff;
                // QR bit
                response[2] |= 0x80;
                Some(response)
            }
            Behaviour::WrongId => None,
        }
    }
}

impl Drop for RawPeer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
