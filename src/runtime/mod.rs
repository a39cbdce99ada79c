//! Runtime-agnostic async primitives used by the transport.
//!
//! The bulb client only needs three things from an executor: a connected
//! UDP socket, a way to bound a future by a deadline, and an async mutex that
//! can be held across an exchange. Each runtime backend provides them.
//!
//! # Feature Flags
//!
//! Enable exactly one of:
//!
//! - `runtime-tokio` (default)
//! - `runtime-async-std`
//! - `runtime-smol`
//!
//! ```toml
//! [dependencies]
//! wizhard-rs = { version = "0.1", default-features = false, features = ["runtime-smol"] }
//! ```

use std::future::Future;
use std::io;
use std::time::Duration;

#[cfg(feature = "runtime-tokio")]
mod tokio_impl;

#[cfg(feature = "runtime-async-std")]
mod async_std_impl;

#[cfg(feature = "runtime-smol")]
mod smol_impl;

#[cfg(feature = "runtime-tokio")]
pub use tokio_impl::UdpSocket;

#[cfg(feature = "runtime-async-std")]
pub use async_std_impl::UdpSocket;

#[cfg(feature = "runtime-smol")]
pub use smol_impl::UdpSocket;

#[cfg(feature = "runtime-tokio")]
use tokio_impl::timeout_impl;

#[cfg(feature = "runtime-async-std")]
use async_std_impl::timeout_impl;

#[cfg(feature = "runtime-smol")]
use smol_impl::timeout_impl;

/// A datagram socket that talks to exactly one peer.
///
/// `connect` resolves the peer address, so a hostname that cannot be resolved
/// surfaces as an error from `connect` before anything is sent.
pub trait AsyncUdpSocket: Send + Sync + Sized {
    /// Bind to a local address (usually `0.0.0.0:0`).
    fn bind(addr: &str) -> impl Future<Output = io::Result<Self>> + Send;

    /// Resolve `addr` and fix it as the only peer of this socket.
    fn connect(&self, addr: &str) -> impl Future<Output = io::Result<()>> + Send;

    /// Send one datagram to the peer.
    fn send(&self, buf: &[u8]) -> impl Future<Output = io::Result<usize>> + Send;

    /// Receive one datagram from the peer, truncated to `buf.len()`.
    fn recv(&self, buf: &mut [u8]) -> impl Future<Output = io::Result<usize>> + Send;
}

/// Run a future with a deadline.
///
/// Returns `Err(TimedOut)` if `duration` elapses first; the inner future is
/// dropped in that case.
pub async fn timeout<F, T>(duration: Duration, future: F) -> Result<T, TimedOut>
where
    F: Future<Output = T>,
{
    timeout_impl(duration, future).await
}

/// Error returned when a deadline expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut;

impl std::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deadline elapsed")
    }
}

impl std::error::Error for TimedOut {}

// Async mutex re-export
#[cfg(feature = "runtime-tokio")]
pub use tokio::sync::Mutex;

#[cfg(feature = "runtime-async-std")]
pub use async_std::sync::Mutex;

#[cfg(feature = "runtime-smol")]
pub use async_lock::Mutex;

#[cfg(not(any(
    feature = "runtime-tokio",
    feature = "runtime-async-std",
    feature = "runtime-smol"
)))]
compile_error!(
    "One of \"runtime-tokio\", \"runtime-async-std\", or \"runtime-smol\" features must be enabled"
);

#[cfg(all(feature = "runtime-tokio", feature = "runtime-async-std"))]
compile_error!("Features \"runtime-tokio\" and \"runtime-async-std\" are mutually exclusive");

#[cfg(all(feature = "runtime-tokio", feature = "runtime-smol"))]
compile_error!("Features \"runtime-tokio\" and \"runtime-smol\" are mutually exclusive");

#[cfg(all(feature = "runtime-async-std", feature = "runtime-smol"))]
compile_error!("Features \"runtime-async-std\" and \"runtime-smol\" are mutually exclusive");
