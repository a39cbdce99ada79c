//! One-shot UDP request/response exchange.

use std::time::Duration;

use log::debug;

use crate::errors::Error;
use crate::runtime::{self, AsyncUdpSocket, UdpSocket};

type Result<T> = std::result::Result<T, Error>;

/// Sends one datagram to a bulb and waits for exactly one reply.
///
/// Every call opens its own socket and drops it on return, whatever the
/// outcome. Nothing is retried.
#[derive(Debug, Clone, Copy)]
pub struct Transport {
    timeout: Duration,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl Transport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Replies longer than this are truncated.
    pub const MAX_DATAGRAM: usize = 1024;

    pub fn new(timeout: Duration) -> Self {
        Transport { timeout }
    }

    /// Send `request` to `address` (`host:port`) and return the first reply.
    ///
    /// The receive deadline starts once the request has been written. Resolve,
    /// bind, connect and send failures are reported before any waiting.
    pub async fn exchange(&self, address: &str, request: &[u8]) -> Result<Vec<u8>> {
        let socket = UdpSocket::bind(local_address(address))
            .await
            .map_err(|e| Error::socket("bind", e))?;

        socket
            .connect(address)
            .await
            .map_err(|e| Error::socket("connect", e))?;

        let sent = socket
            .send(request)
            .await
            .map_err(|e| Error::socket("send", e))?;
        debug!("packet written to {address}: bytes={sent}");

        let mut buffer = [0u8; Self::MAX_DATAGRAM];
        let received = runtime::timeout(self.timeout, socket.recv(&mut buffer))
            .await
            .map_err(|_| Error::timeout(address))?
            .map_err(|e| Error::socket("receive", e))?;
        debug!("packet received from {address}: bytes={received}");

        Ok(buffer[..received].to_vec())
    }
}

/// Wildcard bind address in the same family as `address`.
///
/// Bracketed hosts are IPv6 literals; anything else (IPv4 literals and names)
/// is reached over IPv4.
fn local_address(address: &str) -> &'static str {
    if address.starts_with('[') {
        "[::]:0"
    } else {
        "0.0.0.0:0"
    }
}
