use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Rgb – renderer-independent colour used in chart descriptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

pub const COBALT: Rgb = Rgb::from_hex(0x0047AB);
pub const STEEL_BLUE: Rgb = Rgb::from_hex(0x6CA6CD);
pub const BLUE: Rgb = Rgb::from_hex(0x0000FF);
pub const LIGHT_BLUE: Rgb = Rgb::from_hex(0xADD8E6);

/// Colours cycled through for categorical slices.
pub const DISCRETE: [Rgb; 2] = [COBALT, STEEL_BLUE];

// ---------------------------------------------------------------------------
// Sequential scales: value → colour intensity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SequentialScale {
    Blues,
    Reds,
    Greens,
}

impl SequentialScale {
    fn hue(self) -> f32 {
        match self {
            SequentialScale::Blues => 212.0,
            SequentialScale::Reds => 2.0,
            SequentialScale::Greens => 128.0,
        }
    }

    /// Colour at position `t` in `[0, 1]`: pale at 0, saturated and dark at 1.
    pub fn at(self, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) as f32 } else { 1.0 };
        let lightness = 0.92 - 0.62 * t;
        let saturation = 0.45 + 0.35 * t;
        let hsl = Hsl::new(self.hue(), saturation, lightness);
        let rgb: Srgb = hsl.into_color();
        Rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }

    /// Colour for `value` relative to the `[min, max]` of its series.
    ///
    /// A degenerate range maps everything to the darkest end.
    pub fn for_value(self, value: f64, min: f64, max: f64) -> Rgb {
        let range = max - min;
        if range.abs() < f64::EPSILON {
            self.at(1.0)
        } else {
            self.at((value - min) / range)
        }
    }
}
