//! Terminal colors. Defined in OKLCH so tiers keep even perceived contrast,
//! converted to RGB once per paint.

use riskgrid::RiskTier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl Oklch {
    pub const fn new(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    pub fn to_rgb(self) -> Rgb {
        use palette::{IntoColor, Srgb};

        let oklch = palette::Oklch::new(self.l, self.c, self.h);
        let srgb: Srgb = oklch.into_color();
        let (r, g, b) = srgb.into_format::<u8>().into_components();

        Rgb::new(r, g, b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Oklch,
    pub surface: Oklch,
    pub text: Oklch,
    pub muted: Oklch,
    pub accent: Oklch,
    pub border: Oklch,
    pub risk_low: Oklch,
    pub risk_medium: Oklch,
    pub risk_high: Oklch,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Oklch::new(0.17, 0.01, 250.0),
            surface: Oklch::new(0.25, 0.02, 250.0),
            text: Oklch::new(0.92, 0.01, 250.0),
            muted: Oklch::new(0.62, 0.02, 250.0),
            accent: Oklch::new(0.70, 0.14, 240.0),
            border: Oklch::new(0.42, 0.02, 250.0),
            risk_low: Oklch::new(0.72, 0.17, 145.0),
            risk_medium: Oklch::new(0.80, 0.16, 80.0),
            risk_high: Oklch::new(0.64, 0.21, 25.0),
        }
    }
}

impl Theme {
    pub fn palette(&self) -> Palette {
        Palette {
            background: self.background.to_rgb(),
            surface: self.surface.to_rgb(),
            text: self.text.to_rgb(),
            muted: self.muted.to_rgb(),
            accent: self.accent.to_rgb(),
            border: self.border.to_rgb(),
            risk_low: self.risk_low.to_rgb(),
            risk_medium: self.risk_medium.to_rgb(),
            risk_high: self.risk_high.to_rgb(),
        }
    }
}

/// A theme resolved to RGB for one paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub border: Rgb,
    pub risk_low: Rgb,
    pub risk_medium: Rgb,
    pub risk_high: Rgb,
}

impl Palette {
    pub fn tone(&self, tier: RiskTier) -> Rgb {
        match tier {
            RiskTier::Low => self.risk_low,
            RiskTier::Medium => self.risk_medium,
            RiskTier::High => self.risk_high,
        }
    }
}
