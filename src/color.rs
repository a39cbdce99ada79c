//! RGB and HSV color handling.
//!
//! The bulb speaks red/green/blue channels (0-255 each) while accessory
//! frameworks speak hue (degrees) and saturation (percent). Brightness is not
//! part of this mapping: it travels in the separate `dimming` field, so every
//! conversion back to RGB happens at full value (255).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value used when rebuilding RGB channels from a hue or saturation edit.
pub const FULL_VALUE: f64 = 255.0;

/// An RGB color with red, green, and blue components (0-255 each).
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub(crate) red: u8,
    pub(crate) green: u8,
    pub(crate) blue: u8,
}

impl Color {
    /// Create a color with the given RGB values.
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }
}

impl FromStr for Color {
    type Err = String;

    /// Parse from comma-separated string (e.g., "255,128,0").
    fn from_str(s: &str) -> Result<Self, String> {
        let parts = s
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid channel in {s:?}: {e}"))?;
        match parts[..] {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            _ => Err("Expected format: r,g,b".into()),
        }
    }
}

/// A color in hue/saturation/value form.
///
/// `hue` is in degrees `[0, 360)`, `saturation` in `[0, 1]`, and `value` on the
/// same 0-255 scale as the RGB channels it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl Hsv {
    /// Hue rounded to whole degrees, `0..360`.
    pub fn hue_degrees(&self) -> f64 {
        self.hue.round() % 360.0
    }

    /// Saturation as a whole percentage, `0..=100`.
    pub fn saturation_percent(&self) -> f64 {
        (self.saturation * 100.0).round()
    }
}

/// Convert RGB channels to HSV.
///
/// Grays (including black) have no hue; they report hue 0 and saturation 0.
///
/// # Examples
///
/// ```
/// use wizhard_rs::{Color, to_hsv};
///
/// let hsv = to_hsv(Color::rgb(0, 0, 255));
/// assert_eq!(hsv.hue_degrees(), 240.0);
/// assert_eq!(hsv.saturation_percent(), 100.0);
/// assert_eq!(hsv.value, 255.0);
/// ```
pub fn to_hsv(color: Color) -> Hsv {
    let r = f64::from(color.red);
    let g = f64::from(color.green);
    let b = f64::from(color.blue);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let chroma = max - min;

    let saturation = if max == 0.0 { 0.0 } else { chroma / max };

    let hue = if chroma == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / chroma + 2.0)
    } else {
        60.0 * ((r - g) / chroma + 4.0)
    };

    Hsv {
        hue,
        saturation,
        value: max,
    }
}

/// Convert HSV back to RGB channels, rounding each to the nearest integer.
///
/// `hue` wraps around 360, `saturation` is clamped to `[0, 1]` and `value` to
/// `[0, 255]`.
///
/// # Examples
///
/// ```
/// use wizhard_rs::{Color, Hsv, from_hsv};
///
/// let red = from_hsv(Hsv { hue: 0.0, saturation: 1.0, value: 255.0 });
/// assert_eq!(red, Color::rgb(255, 0, 0));
/// ```
pub fn from_hsv(hsv: Hsv) -> Color {
    let h = hsv.hue.rem_euclid(360.0) / 60.0;
    let s = hsv.saturation.clamp(0.0, 1.0);
    let v = hsv.value.clamp(0.0, FULL_VALUE);

    let chroma = v * s;
    let x = chroma * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
    let m = v - chroma;

    let (r, g, b) = match h as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Color::rgb(channel(r + m), channel(g + m), channel(b + m))
}

/// Replace the hue of `color`, keeping its saturation, at full value.
///
/// # Examples
///
/// ```
/// use wizhard_rs::{Color, apply_hue};
///
/// assert_eq!(apply_hue(Color::rgb(255, 0, 0), 120.0), Color::rgb(0, 255, 0));
/// ```
pub fn apply_hue(color: Color, hue: f64) -> Color {
    let current = to_hsv(color);
    from_hsv(Hsv {
        hue,
        saturation: current.saturation,
        value: FULL_VALUE,
    })
}

/// Replace the saturation of `color` with `percent` (0-100), keeping its hue,
/// at full value.
///
/// # Examples
///
/// ```
/// use wizhard_rs::{Color, apply_saturation};
///
/// assert_eq!(apply_saturation(Color::rgb(255, 0, 0), 0.0), Color::rgb(255, 255, 255));
/// ```
pub fn apply_saturation(color: Color, percent: f64) -> Color {
    let current = to_hsv(color);
    from_hsv(Hsv {
        hue: current.hue,
        saturation: percent.clamp(0.0, 100.0) / 100.0,
        value: FULL_VALUE,
    })
}

fn channel(v: f64) -> u8 {
    v.round().clamp(0.0, FULL_VALUE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: u8, b: u8) -> bool {
        a.abs_diff(b) <= 1
    }

    #[test]
    fn test_round_trip_at_derived_value() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in (0..=255u8).step_by(51) {
                    let original = Color::rgb(r, g, b);
                    let back = from_hsv(to_hsv(original));
                    assert!(
                        close(back.red, r) && close(back.green, g) && close(back.blue, b),
                        "{original:?} came back as {back:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(to_hsv(Color::rgb(255, 0, 0)).hue_degrees(), 0.0);
        assert_eq!(to_hsv(Color::rgb(0, 255, 0)).hue_degrees(), 120.0);
        assert_eq!(to_hsv(Color::rgb(0, 0, 255)).hue_degrees(), 240.0);
        assert_eq!(to_hsv(Color::rgb(255, 0, 255)).hue_degrees(), 300.0);
    }

    #[test]
    fn test_gray_has_no_hue_or_saturation() {
        let hsv = to_hsv(Color::rgb(90, 90, 90));
        assert_eq!(hsv.hue, 0.0);
        assert_eq!(hsv.saturation, 0.0);
        assert_eq!(hsv.value, 90.0);

        let black = to_hsv(Color::default());
        assert_eq!(black.saturation, 0.0);
    }

    #[test]
    fn test_hue_rounding_wraps_to_zero() {
        // 359.8 degrees rounds up to a full turn.
        let hsv = Hsv {
            hue: 359.8,
            saturation: 1.0,
            value: 255.0,
        };
        assert_eq!(hsv.hue_degrees(), 0.0);
    }

    #[test]
    fn test_apply_hue_keeps_saturation() {
        let start = Color::rgb(200, 120, 60);
        let before = to_hsv(start);

        for hue in [0.0, 45.0, 130.0, 200.0, 275.0, 359.0] {
            let after = to_hsv(apply_hue(start, hue));
            let diff = (after.hue - hue).abs();
            assert!(diff.min(360.0 - diff) <= 1.0, "hue {hue} became {}", after.hue);
            assert!(
                (after.saturation_percent() - before.saturation_percent()).abs() <= 1.0,
                "saturation drifted for hue {hue}"
            );
            assert_eq!(after.value, FULL_VALUE);
        }
    }

    #[test]
    fn test_apply_saturation_keeps_hue() {
        let start = Color::rgb(30, 90, 240);
        let before = to_hsv(start);

        for percent in [20.0, 50.0, 75.0, 100.0] {
            let after = to_hsv(apply_saturation(start, percent));
            assert!(
                (after.saturation_percent() - percent).abs() <= 1.0,
                "saturation {percent} became {}",
                after.saturation_percent()
            );
            assert!(
                (after.hue - before.hue).abs() <= 1.0,
                "hue drifted at saturation {percent}"
            );
        }
    }

    #[test]
    fn test_apply_saturation_clamps_input() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(apply_saturation(red, 250.0), red);
        assert_eq!(apply_saturation(red, -5.0), Color::rgb(255, 255, 255));
    }

    #[test]
    fn test_hue_edit_on_gray_yields_white() {
        // No saturation to keep, so the reconstructed color is white.
        assert_eq!(
            apply_hue(Color::rgb(10, 10, 10), 200.0),
            Color::rgb(255, 255, 255)
        );
    }

    #[test]
    fn test_color_from_str() {
        assert_eq!(Color::from_str("255, 128,0"), Ok(Color::rgb(255, 128, 0)));
        assert!(Color::from_str("1,2").is_err());
        assert!(Color::from_str("1,2,300").is_err());
    }
}
