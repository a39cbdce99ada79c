//! Client for a single bulb.

use std::net::Ipv6Addr;

use log::{debug, warn};

use crate::config::{ClientOptions, SystemInfo};
use crate::errors::Error;
use crate::protocol::{self, Method, Request};
use crate::runtime::Mutex;
use crate::state::DeviceState;
use crate::transport::Transport;

type Result<T> = std::result::Result<T, Error>;

/// Whether a [`Light`] has heard from its bulb yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No read or info query has succeeded; the mirror holds zero values.
    #[default]
    Uninitialized,
    /// At least one read or info query has succeeded.
    Ready,
}

#[derive(Debug, Default)]
struct Mirror {
    state: DeviceState,
    /// Last state read from, or accepted by, the bulb.
    confirmed: DeviceState,
    system: Option<SystemInfo>,
    phase: Phase,
}

/// A single Wiz bulb and the last state seen from it.
///
/// The mirrored state is only as fresh as the last successful [`read`]; other
/// controllers may change the bulb at any time. All operations on one `Light`
/// are serialized by an internal async mutex that is held for the whole
/// exchange, so a local edit and the write that pushes it cannot interleave
/// with another caller's.
///
/// Writing to a bulb that was never read is allowed by default and pushes
/// whatever the mirror holds (zero values for a fresh client); see
/// [`ClientOptions::require_ready`].
///
/// [`read`]: Light::read
///
/// # Example
///
/// ```
/// use wizhard_rs::{ClientOptions, Light};
///
/// let light = Light::new("192.168.1.100", ClientOptions::default());
/// assert_eq!(light.address(), "192.168.1.100:38899");
/// ```
#[derive(Debug)]
pub struct Light {
    address: String,
    options: ClientOptions,
    transport: Transport,
    mirror: Mutex<Mirror>,
}

impl Light {
    /// Bind to `host` on the configured protocol port. No I/O happens here.
    ///
    /// `host` may be a name, an IPv4 literal or an IPv6 literal, with or
    /// without brackets.
    pub fn new(host: &str, options: ClientOptions) -> Self {
        let address = match host.parse::<Ipv6Addr>() {
            Ok(ip) => format!("[{ip}]:{}", options.port),
            Err(_) => format!("{host}:{}", options.port),
        };
        Self::with_address(&address, options)
    }

    /// Bind to a full `host:port` address, ignoring `options.port`.
    pub fn with_address(address: &str, options: ClientOptions) -> Self {
        Light {
            address: address.to_string(),
            options,
            transport: Transport::new(options.timeout),
            mirror: Mutex::new(Mirror::default()),
        }
    }

    /// Bind to `host` and try to [`initialize`](Light::initialize).
    ///
    /// A bulb that does not answer still yields a usable client; the failure
    /// is logged and the mirror stays at its zero values.
    pub async fn open(host: &str, options: ClientOptions) -> Self {
        let light = Self::new(host, options);
        if let Err(e) = light.initialize().await {
            warn!("bulb {} did not initialize: {}", light.address, e);
        }
        light
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Snapshot of the mirrored state. No network access.
    pub async fn state(&self) -> DeviceState {
        self.mirror.lock().await.state.clone()
    }

    /// System info from the last successful [`read_system_info`](Light::read_system_info).
    pub async fn system_info(&self) -> Option<SystemInfo> {
        self.mirror.lock().await.system.clone()
    }

    pub async fn phase(&self) -> Phase {
        self.mirror.lock().await.phase
    }

    /// Query the bulb's pilot and replace the mirror with it.
    ///
    /// On failure the mirror is left as it was.
    pub async fn read(&self) -> Result<DeviceState> {
        let mut mirror = self.mirror.lock().await;
        let response = self.send(&Request::query(Method::GetPilot)).await?;
        let state = protocol::decode_status_response(&response)?;

        mirror.state = state.clone();
        mirror.confirmed = state.clone();
        mirror.phase = Phase::Ready;
        Ok(state)
    }

    /// Push the mirrored state to the bulb.
    ///
    /// White channels and echo fields are reset on the mirror before sending.
    /// The bulb does not answer with its new state, so the mirror is not
    /// updated from the response. With default options a device-reported
    /// error is logged and otherwise ignored, and a failed exchange leaves the
    /// local edit in place.
    pub async fn write(&self) -> Result<()> {
        let mut mirror = self.mirror.lock().await;
        self.write_locked(&mut mirror).await
    }

    /// Edit the mirrored state without contacting the bulb.
    pub async fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut DeviceState),
    {
        edit(&mut self.mirror.lock().await.state);
    }

    /// Edit the mirrored state and [`write`](Light::write) it, atomically with
    /// respect to other calls on this `Light`.
    pub async fn modify<F>(&self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut DeviceState),
    {
        let mut mirror = self.mirror.lock().await;
        edit(&mut mirror.state);
        self.write_locked(&mut mirror).await
    }

    /// Query the bulb's system configuration and keep it.
    pub async fn read_system_info(&self) -> Result<SystemInfo> {
        let mut mirror = self.mirror.lock().await;
        let response = self.send(&Request::query(Method::GetSystemConfig)).await?;
        let info = protocol::decode_system_response(&response)?;

        mirror.system = Some(info.clone());
        mirror.phase = Phase::Ready;
        Ok(info)
    }

    /// [`read`](Light::read), then [`read_system_info`](Light::read_system_info).
    ///
    /// Stops at the first failure.
    pub async fn initialize(&self) -> Result<()> {
        self.read().await?;
        self.read_system_info().await?;
        Ok(())
    }

    async fn write_locked(&self, mirror: &mut Mirror) -> Result<()> {
        let result = if self.options.require_ready && mirror.phase == Phase::Uninitialized {
            Err(Error::NotReady(self.address.clone()))
        } else {
            mirror.state.normalize_for_write();
            self.push(&mirror.state).await
        };

        match result {
            Ok(()) => {
                mirror.confirmed = mirror.state.clone();
                Ok(())
            }
            Err(e) => {
                if self.options.rollback_on_failure {
                    debug!("rolling back local state of {}", self.address);
                    mirror.state = mirror.confirmed.clone();
                }
                Err(e)
            }
        }
    }

    async fn push(&self, state: &DeviceState) -> Result<()> {
        let response = self.send(&Request::set_pilot(state)).await?;
        let ack = protocol::decode_change_response(&response)?;
        if ack.accepted() {
            return Ok(());
        }

        let (code, message) = match &ack.error {
            Some(err) => (err.code, err.message.as_str()),
            None => (0, "change not acknowledged"),
        };
        if self.options.reject_device_errors {
            return Err(Error::device(code, message));
        }
        warn!(
            "bulb {} reported error {} ({}) on setPilot; ignoring",
            self.address, code, message
        );
        Ok(())
    }

    async fn send(&self, request: &Request) -> Result<Vec<u8>> {
        let bytes = protocol::encode_request(request)?;
        debug!("sending to {}: {}", self.address, String::from_utf8_lossy(&bytes));

        let response = self.transport.exchange(&self.address, &bytes).await?;
        debug!(
            "response from {}: {}",
            self.address,
            String::from_utf8_lossy(&response)
        );
        Ok(response)
    }
}
