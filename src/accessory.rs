//! Colored lightbulb accessory hooks.
//!
//! Accessory frameworks (HomeKit bridges and the like) drive a colored
//! lightbulb through four characteristics: on, brightness, hue and
//! saturation. Their callbacks have no error channel, so [`WizLightbulb`] is
//! the one place where client errors are logged and dropped.

use std::future::Future;

use log::{error, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::to_hsv;
use crate::errors::Error;
use crate::light::Light;
use crate::state::DeviceState;

/// The get/set hooks of a colored lightbulb.
///
/// Getters never fail: on error they return `false` or `0`. Setters report
/// nothing back.
pub trait ColoredLightbulb {
    fn get_on(&self) -> impl Future<Output = bool> + Send;
    fn set_on(&self, on: bool) -> impl Future<Output = ()> + Send;

    /// Brightness percentage, `0..=100`.
    fn get_brightness(&self) -> impl Future<Output = u8> + Send;
    fn set_brightness(&self, brightness: u8) -> impl Future<Output = ()> + Send;

    /// Hue in degrees, `0..360`.
    fn get_hue(&self) -> impl Future<Output = f64> + Send;
    fn set_hue(&self, hue: f64) -> impl Future<Output = ()> + Send;

    /// Saturation percentage, `0..=100`.
    fn get_saturation(&self) -> impl Future<Output = f64> + Send;
    fn set_saturation(&self, saturation: f64) -> impl Future<Output = ()> + Send;
}

/// Identity of an accessory as shown to the accessory framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryInfo {
    pub name: String,
    pub manufacturer: String,
    pub serial_number: String,
    pub model: String,
    pub firmware_revision: String,
}

impl AccessoryInfo {
    pub const BULB_MODEL: &'static str = "Bulby";

    /// Info for the `index`-th bulb behind a bridge described by `bridge`.
    ///
    /// Bulbs get a fresh random serial and inherit the bridge's manufacturer
    /// and firmware revision.
    ///
    /// # Examples
    ///
    /// ```
    /// use wizhard_rs::AccessoryInfo;
    ///
    /// let bridge = AccessoryInfo {
    ///     name: "WizHard Bridge".into(),
    ///     manufacturer: "Dubo".into(),
    ///     serial_number: "1234".into(),
    ///     model: "Bridge".into(),
    ///     firmware_revision: "1".into(),
    /// };
    /// let bulb = AccessoryInfo::bulb(2, &bridge);
    /// assert_eq!(bulb.name, "Wiz 2");
    /// assert_eq!(bulb.model, "Bulby");
    /// assert_eq!(bulb.manufacturer, "Dubo");
    /// ```
    pub fn bulb(index: usize, bridge: &AccessoryInfo) -> Self {
        AccessoryInfo {
            name: format!("Wiz {index}"),
            manufacturer: bridge.manufacturer.clone(),
            serial_number: Uuid::new_v4().to_string(),
            model: Self::BULB_MODEL.to_string(),
            firmware_revision: bridge.firmware_revision.clone(),
        }
    }
}

/// A [`Light`] exposed through [`ColoredLightbulb`].
///
/// Every getter re-reads the bulb first, so changes made by other controllers
/// are picked up. Every setter edits the mirrored state and writes it back in
/// one locked step.
#[derive(Debug)]
pub struct WizLightbulb {
    info: AccessoryInfo,
    light: Light,
}

impl WizLightbulb {
    pub fn new(info: AccessoryInfo, light: Light) -> Self {
        WizLightbulb { info, light }
    }

    pub fn info(&self) -> &AccessoryInfo {
        &self.info
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    async fn fetch(&self, property: &str) -> Option<DeviceState> {
        match self.light.read().await {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(
                    "{}: could not read {} from {}: {}",
                    self.info.name,
                    property,
                    self.light.address(),
                    e
                );
                None
            }
        }
    }

    async fn apply<F>(&self, property: &str, edit: F)
    where
        F: FnOnce(&mut DeviceState) + Send,
    {
        if let Err(e) = self.light.modify(edit).await {
            self.report(property, &e);
        }
    }

    fn report(&self, property: &str, e: &Error) {
        error!(
            "{}: could not set {} on {}: {}",
            self.info.name,
            property,
            self.light.address(),
            e
        );
    }
}

impl ColoredLightbulb for WizLightbulb {
    async fn get_on(&self) -> bool {
        self.fetch("on").await.is_some_and(|s| s.on())
    }

    async fn set_on(&self, on: bool) {
        self.apply("on", |s| s.set_on(on)).await
    }

    async fn get_brightness(&self) -> u8 {
        self.fetch("brightness").await.map_or(0, |s| s.dimming())
    }

    async fn set_brightness(&self, brightness: u8) {
        self.apply("brightness", |s| s.set_dimming(brightness)).await
    }

    async fn get_hue(&self) -> f64 {
        self.fetch("hue")
            .await
            .map_or(0.0, |s| to_hsv(s.color()).hue_degrees())
    }

    async fn set_hue(&self, hue: f64) {
        self.apply("hue", |s| s.apply_hue(hue)).await
    }

    async fn get_saturation(&self) -> f64 {
        self.fetch("saturation")
            .await
            .map_or(0.0, |s| to_hsv(s.color()).saturation_percent())
    }

    async fn set_saturation(&self, saturation: f64) {
        self.apply("saturation", |s| s.apply_saturation(saturation))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::color::Color;
    use crate::test_support::{FakeBulb, quick_options};

    fn info() -> AccessoryInfo {
        AccessoryInfo {
            name: "Wiz 0".into(),
            manufacturer: "test".into(),
            serial_number: "0".into(),
            model: AccessoryInfo::BULB_MODEL.into(),
            firmware_revision: "1".into(),
        }
    }

    fn bulb_for(fake: &FakeBulb) -> WizLightbulb {
        WizLightbulb::new(info(), Light::with_address(&fake.address, quick_options()))
    }

    #[tokio::test]
    async fn test_getters_read_from_the_bulb() {
        let fake =
            FakeBulb::with_pilot(json!({"state": true, "r": 0, "g": 255, "b": 4, "dimming": 100}))
                .await;
        let bulb = bulb_for(&fake);

        assert!(bulb.get_on().await);
        assert_eq!(bulb.get_brightness().await, 100);
        let hue = bulb.get_hue().await;
        assert!((119.0..=121.0).contains(&hue), "hue {hue}");
        let saturation = bulb.get_saturation().await;
        assert!(saturation >= 98.0, "saturation {saturation}");
        assert_eq!(fake.methods(), vec!["getPilot"; 4]);
    }

    #[tokio::test]
    async fn test_getters_fall_back_on_error() {
        let fake = FakeBulb::start(|_| None).await;
        let bulb = bulb_for(&fake);

        assert!(!bulb.get_on().await);
        assert_eq!(bulb.get_brightness().await, 0);
        assert_eq!(bulb.get_hue().await, 0.0);
        assert_eq!(bulb.get_saturation().await, 0.0);
    }

    #[tokio::test]
    async fn test_setters_push_full_state() {
        let fake =
            FakeBulb::with_pilot(json!({"state": false, "r": 255, "g": 0, "b": 0, "dimming": 60}))
                .await;
        let bulb = bulb_for(&fake);
        bulb.light().read().await.unwrap();

        bulb.set_on(true).await;
        bulb.set_brightness(25).await;
        bulb.set_hue(240.0).await;
        bulb.set_saturation(50.0).await;

        let params: Vec<_> = fake
            .requests()
            .into_iter()
            .filter(|r| r["method"] == "setPilot")
            .map(|r| r["params"].clone())
            .collect();
        assert_eq!(params.len(), 4);
        assert_eq!(params[0]["state"], json!(true));
        assert_eq!(params[0]["dimming"], json!(60));
        assert_eq!(params[1]["dimming"], json!(25));
        assert_eq!(
            (params[2]["r"].clone(), params[2]["g"].clone(), params[2]["b"].clone()),
            (json!(0), json!(0), json!(255))
        );
        assert_eq!(
            (params[3]["r"].clone(), params[3]["g"].clone(), params[3]["b"].clone()),
            (json!(128), json!(128), json!(255))
        );

        let state = bulb.light().state().await;
        assert!(state.on());
        assert_eq!(state.dimming(), 25);
        assert_eq!(state.color(), Color::rgb(128, 128, 255));
    }

    #[tokio::test]
    async fn test_setters_swallow_errors() {
        let fake = FakeBulb::start(|_| None).await;
        let bulb = bulb_for(&fake);

        bulb.set_brightness(150).await;
        assert_eq!(bulb.light().state().await.dimming(), 100);
        assert_eq!(fake.methods(), vec!["setPilot"]);
    }
}
