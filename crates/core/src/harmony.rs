//! Color harmonies: fixed geometric relationships on the hue wheel.
//!
//! All hue arithmetic is modulo 360. Every harmony except
//! [`Harmony::Monochromatic`] keeps saturation and lightness and only rotates
//! the hue.

use crate::color::{hsl_to_hex, normalize_hue, rgb_to_hsl, Hsl, Rgb};
use serde::{Deserialize, Serialize};

/// Kind of color harmony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Harmony {
    /// Opposite hue, +180.
    Complementary,
    /// Neighbors at +30 and -30.
    Analogous,
    /// +120 and +240.
    Triadic,
    /// The two neighbors of the complement, +150 and +210.
    SplitComplementary,
    /// Rectangle: +60, +180, +240.
    Tetradic,
    /// +90, +180, +270.
    Square,
    /// Analogous followed by split-complementary.
    Compound,
    /// Same hue, lightness +-20 and saturation +-15.
    Monochromatic,
}

const MONO_LIGHTNESS_STEP: f64 = 20.0;
const MONO_SATURATION_STEP: f64 = 15.0;
const MONO_LIGHTNESS_RANGE: (f64, f64) = (15.0, 95.0);
const MONO_SATURATION_RANGE: (f64, f64) = (5.0, 95.0);

impl Harmony {
    pub const ALL: [Harmony; 8] = [
        Harmony::Complementary,
        Harmony::Analogous,
        Harmony::Triadic,
        Harmony::SplitComplementary,
        Harmony::Tetradic,
        Harmony::Square,
        Harmony::Compound,
        Harmony::Monochromatic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Harmony::Complementary => "complementary",
            Harmony::Analogous => "analogous",
            Harmony::Triadic => "triadic",
            Harmony::SplitComplementary => "split-complementary",
            Harmony::Tetradic => "tetradic",
            Harmony::Square => "square",
            Harmony::Compound => "compound",
            Harmony::Monochromatic => "monochromatic",
        }
    }

    /// Title used in rendered tables.
    pub fn title(self) -> &'static str {
        match self {
            Harmony::Complementary => "Complementary",
            Harmony::Analogous => "Analogous",
            Harmony::Triadic => "Triadic",
            Harmony::SplitComplementary => "Split-complementary",
            Harmony::Tetradic => "Tetradic",
            Harmony::Square => "Square",
            Harmony::Compound => "Compound",
            Harmony::Monochromatic => "Monochromatic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Harmony::Complementary => "maximum contrast from the opposite side of the wheel",
            Harmony::Analogous => "neighboring hues for a calm, cohesive scheme",
            Harmony::Triadic => "three evenly spaced hues for vibrant balance",
            Harmony::SplitComplementary => "contrast with less tension than a direct complement",
            Harmony::Tetradic => "two complementary pairs for rich variety",
            Harmony::Square => "four evenly spaced hues, best with one dominant color",
            Harmony::Compound => "neighbors plus split complements for layered palettes",
            Harmony::Monochromatic => "tints and tones of a single hue",
        }
    }

    /// Accepts the kebab-case name, case-insensitively; underscores are
    /// treated as hyphens.
    pub fn from_name(name: &str) -> Option<Harmony> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        Harmony::ALL.into_iter().find(|h| h.name() == wanted)
    }

    /// Hue rotations in degrees. Empty for monochromatic.
    pub fn hue_offsets(self) -> &'static [f64] {
        match self {
            Harmony::Complementary => &[180.0],
            Harmony::Analogous => &[30.0, -30.0],
            Harmony::Triadic => &[120.0, 240.0],
            Harmony::SplitComplementary => &[150.0, 210.0],
            Harmony::Tetradic => &[60.0, 180.0, 240.0],
            Harmony::Square => &[90.0, 180.0, 270.0],
            Harmony::Compound => &[30.0, -30.0, 150.0, 210.0],
            Harmony::Monochromatic => &[],
        }
    }

    /// Returns the related colors, excluding `base` itself.
    pub fn apply(self, base: Hsl) -> Vec<Hsl> {
        if self == Harmony::Monochromatic {
            return monochromatic(base);
        }
        self.hue_offsets()
            .iter()
            .map(|offset| rotate(base, *offset))
            .collect()
    }

    /// Convenience: related colors of an RGB base as `#rrggbb` strings.
    pub fn hexes(self, base: Rgb) -> Vec<String> {
        self.apply(rgb_to_hsl(base))
            .into_iter()
            .map(hsl_to_hex)
            .collect()
    }
}

/// Rotates the hue by `degrees`, keeping saturation and lightness.
pub fn rotate(base: Hsl, degrees: f64) -> Hsl {
    Hsl {
        h: normalize_hue(base.h + degrees),
        ..base
    }
}

pub fn complementary(base: Hsl) -> Hsl {
    rotate(base, 180.0)
}

/// Lighter, darker, more saturated and less saturated variants.
fn monochromatic(base: Hsl) -> Vec<Hsl> {
    let (l_min, l_max) = MONO_LIGHTNESS_RANGE;
    let (s_min, s_max) = MONO_SATURATION_RANGE;
    vec![
        Hsl {
            l: (base.l + MONO_LIGHTNESS_STEP).clamp(l_min, l_max),
            ..base
        },
        Hsl {
            l: (base.l - MONO_LIGHTNESS_STEP).clamp(l_min, l_max),
            ..base
        },
        Hsl {
            s: (base.s + MONO_SATURATION_STEP).clamp(s_min, s_max),
            ..base
        },
        Hsl {
            s: (base.s - MONO_SATURATION_STEP).clamp(s_min, s_max),
            ..base
        },
    ]
}
