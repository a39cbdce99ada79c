//! Mirror of the bulb's pilot state.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DefaultOnError, DeserializeAs, serde_as};

use crate::color::{self, Color};

/// The control-relevant fields of a bulb's pilot.
///
/// This is the shape returned by `getPilot` and the full parameter set sent
/// with every `setPilot`. Fields the bulb leaves out, or sends with the wrong
/// type, decode to their zero value.
///
/// White channels, `src` and `cnx` are never chosen by callers: they are
/// overwritten with fixed values before every write so the bulb does not
/// switch into white or scene programs this client does not drive.
///
/// # Example
///
/// ```
/// use wizhard_rs::{Color, DeviceState};
///
/// let mut state = DeviceState::default();
/// state.set_on(true);
/// state.set_dimming(140);
/// state.set_color(Color::rgb(0, 255, 4));
///
/// assert!(state.on());
/// assert_eq!(state.dimming(), 100);
/// assert_eq!(state.color().green(), 255);
/// ```
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceState {
    #[serde(rename = "cnx")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) connection: String,
    #[serde(rename = "src")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) source: String,
    #[serde(rename = "state")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) on: bool,
    #[serde(rename = "r")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) red: u8,
    #[serde(rename = "g")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) green: u8,
    #[serde(rename = "b")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) blue: u8,
    #[serde(rename = "c")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) cool_white: u8,
    #[serde(rename = "w")]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub(crate) warm_white: u8,
    #[serde(deserialize_with = "clamped_dimming")]
    pub(crate) dimming: u8,
}

/// Best-effort `dimming`: wrong types decode to 0, values above 100 clamp.
fn clamped_dimming<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let dimming = <DefaultOnError as DeserializeAs<'de, u8>>::deserialize_as(deserializer)?;
    Ok(dimming.min(DeviceState::MAX_DIMMING))
}

impl DeviceState {
    /// Value always sent in `src`.
    pub const SOURCE: &'static str = "udp";
    /// Value always sent in `cnx`.
    pub const CONNECTION: &'static str = "0501";
    pub const MAX_DIMMING: u8 = 100;

    pub fn on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
    }

    pub fn color(&self) -> Color {
        Color::rgb(self.red, self.green, self.blue)
    }

    pub fn set_color(&mut self, color: Color) {
        self.red = color.red;
        self.green = color.green;
        self.blue = color.blue;
    }

    /// Brightness percentage, `0..=100`.
    pub fn dimming(&self) -> u8 {
        self.dimming
    }

    /// Values above 100 are clamped.
    pub fn set_dimming(&mut self, dimming: u8) {
        self.dimming = dimming.min(Self::MAX_DIMMING);
    }

    pub fn cool_white(&self) -> u8 {
        self.cool_white
    }

    pub fn warm_white(&self) -> u8 {
        self.warm_white
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn connection(&self) -> &str {
        &self.connection
    }

    /// Change the hue, keeping the current saturation. See [`apply_hue`](crate::apply_hue).
    pub fn apply_hue(&mut self, hue: f64) {
        self.set_color(color::apply_hue(self.color(), hue));
    }

    /// Change the saturation (percent), keeping the current hue. See
    /// [`apply_saturation`](crate::apply_saturation).
    pub fn apply_saturation(&mut self, percent: f64) {
        self.set_color(color::apply_saturation(self.color(), percent));
    }

    /// Force the fields this client never controls to their fixed values.
    pub(crate) fn normalize_for_write(&mut self) {
        self.cool_white = 0;
        self.warm_white = 0;
        self.source = Self::SOURCE.to_string();
        self.connection = Self::CONNECTION.to_string();
    }
}
