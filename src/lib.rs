//! # wizhard_rs
//!
//! Drive Wiz smart bulbs over their JSON-over-UDP protocol and expose them as
//! colored lightbulb accessories (on, brightness, hue, saturation).
//!
//! The crate is **runtime-agnostic**: pick tokio (default), async-std or smol
//! with a feature flag.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wizhard_rs::{ClientOptions, ColoredLightbulb, Light};
//!
//! async fn dim_to_half() -> Result<(), wizhard_rs::Error> {
//!     let light = Light::open("192.168.1.100", ClientOptions::default()).await;
//!     light.modify(|state| state.set_dimming(50)).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! - [`Transport`]: one datagram out, one datagram back, within a deadline
//!   (10 s by default). A fresh socket per exchange, no retries.
//! - Codec ([`encode_request`], [`decode_status_response`],
//!   [`decode_change_response`], [`decode_system_response`]): the `getPilot`,
//!   `setPilot` and `getSystemConfig` messages.
//! - [`Light`]: owns one bulb's address and a mirror of its [`DeviceState`].
//! - Color helpers ([`to_hsv`], [`apply_hue`], [`apply_saturation`]): map the
//!   bulb's RGB channels to hue and saturation.
//! - [`WizLightbulb`]: the [`ColoredLightbulb`] hooks an accessory framework
//!   calls, and [`Bridge`], the roster of them.
//!
//! Scenes, color temperature and rhythm ids are deliberately never sent.
//!
//! ## Communication
//!
//! All communication with Wiz bulbs occurs over UDP on port 38899. The bulbs must
//! be on the same local network and ideally have static IP addresses assigned.
//!
//! ## Feature Flags
//!
//! - `runtime-tokio` (default): Use the tokio async runtime
//! - `runtime-async-std`: Use the async-std runtime
//! - `runtime-smol`: Use the smol runtime

mod accessory;
mod bridge;
mod color;
mod config;
mod errors;
mod light;
mod protocol;
pub mod runtime;
mod state;
mod transport;

#[cfg(test)]
mod test_support;

// Re-export public API
pub use accessory::{AccessoryInfo, ColoredLightbulb, WizLightbulb};
pub use bridge::Bridge;
pub use color::{Color, FULL_VALUE, Hsv, apply_hue, apply_saturation, from_hsv, to_hsv};
pub use config::{ClientOptions, SystemInfo};
pub use errors::{Error, ErrorKind};
pub use light::{Light, Phase};
pub use protocol::{
    ChangeAck, DeviceError, Method, Request, decode_change_response, decode_status_response,
    decode_system_response, encode_request,
};
pub use state::DeviceState;
pub use transport::Transport;
