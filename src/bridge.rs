//! The set of bulb accessories handed to an accessory bridge.

use std::collections::HashMap;

use uuid::Uuid;

use crate::accessory::{AccessoryInfo, WizLightbulb};
use crate::config::ClientOptions;
use crate::errors::Error;
use crate::light::Light;

type Result<T> = std::result::Result<T, Error>;

/// Owns one [`WizLightbulb`] per bulb address.
///
/// Each bulb has its own [`Light`]; nothing is shared between them. The
/// embedding program passes [`Bridge::accessories`] to its framework's
/// registration call.
///
/// # Example
///
/// ```
/// use wizhard_rs::{AccessoryInfo, Bridge, ClientOptions, Light};
///
/// let mut bridge = Bridge::new(AccessoryInfo {
///     name: "WizHard Bridge".into(),
///     manufacturer: "Dubo".into(),
///     serial_number: "1234".into(),
///     model: "Bridge".into(),
///     firmware_revision: "1".into(),
/// });
/// let id = bridge
///     .add_light(Light::new("10.0.4.208", ClientOptions::default()))
///     .unwrap();
/// assert_eq!(bridge.get(&id).unwrap().info().name, "Wiz 0");
/// assert!(bridge.add_light(Light::new("10.0.4.208", ClientOptions::default())).is_err());
/// ```
#[derive(Debug)]
pub struct Bridge {
    info: AccessoryInfo,
    bulbs: HashMap<Uuid, WizLightbulb>,
    added: usize,
}

impl Bridge {
    pub fn new(info: AccessoryInfo) -> Self {
        Bridge {
            info,
            bulbs: HashMap::new(),
            added: 0,
        }
    }

    /// Open a client for every host and add it, in order.
    ///
    /// Bulbs that do not answer are still added; see [`Light::open`].
    pub async fn open(
        info: AccessoryInfo,
        hosts: &[&str],
        options: ClientOptions,
    ) -> Result<Self> {
        let mut bridge = Self::new(info);
        for host in hosts {
            bridge.add_light(Light::open(host, options).await)?;
        }
        Ok(bridge)
    }

    pub fn info(&self) -> &AccessoryInfo {
        &self.info
    }

    /// Add a bulb with default accessory info (`"Wiz <n>"`, model `"Bulby"`).
    pub fn add_light(&mut self, light: Light) -> Result<Uuid> {
        let info = AccessoryInfo::bulb(self.added, &self.info);
        self.add(WizLightbulb::new(info, light))
    }

    /// Add a bulb. Its address must not already be registered.
    pub fn add(&mut self, bulb: WizLightbulb) -> Result<Uuid> {
        self.validate(bulb.light())?;

        let id = Uuid::new_v4();
        self.bulbs.insert(id, bulb);
        self.added += 1;
        Ok(id)
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<WizLightbulb> {
        self.bulbs.remove(id).ok_or(Error::AccessoryNotFound(*id))
    }

    pub fn get(&self, id: &Uuid) -> Option<&WizLightbulb> {
        self.bulbs.get(id)
    }

    pub fn list(&self) -> Vec<&Uuid> {
        self.bulbs.keys().collect()
    }

    pub fn accessories(&self) -> impl Iterator<Item = (&Uuid, &WizLightbulb)> {
        self.bulbs.iter()
    }

    pub fn len(&self) -> usize {
        self.bulbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bulbs.is_empty()
    }

    fn validate(&self, light: &Light) -> Result<()> {
        let address = light.address();
        if self.bulbs.values().any(|b| b.light().address() == address) {
            return Err(Error::invalid_address(address, "already registered"));
        }
        Ok(())
    }
}
