//! Accessibility and perception: WCAG contrast, text color choice,
//! color-blindness simulation and a rough color temperature.
//!
//! Contrast follows the WCAG 2.x relative luminance definition. The
//! color-blindness matrices and the temperature estimate are simplified
//! heuristics, not physiological or blackbody models.

use crate::color::Rgb;
use serde::Serialize;

/// WCAG relative luminance in [0, 1].
///
/// Each channel is linearized with the WCAG piecewise curve (linear below
/// 0.03928) and weighted 0.2126 / 0.7152 / 0.0722.
pub fn relative_luminance(c: Rgb) -> f64 {
    let [r, g, b] = c.to_unit().map(|v| {
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG contrast ratio in [1, 21], independent of argument order.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast band used in advice text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl ContrastLevel {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            ContrastLevel::Excellent
        } else if ratio >= 4.5 {
            ContrastLevel::Good
        } else if ratio >= 3.0 {
            ContrastLevel::Moderate
        } else {
            ContrastLevel::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContrastLevel::Excellent => "excellent",
            ContrastLevel::Good => "good",
            ContrastLevel::Moderate => "moderate",
            ContrastLevel::Poor => "poor",
        }
    }

    /// WCAG conformance summary for the band.
    pub fn wcag(self) -> &'static str {
        match self {
            ContrastLevel::Excellent => "AA & AAA (all text)",
            ContrastLevel::Good => "AA (all text)",
            ContrastLevel::Moderate => "AA (large text only)",
            ContrastLevel::Poor => "Not compliant",
        }
    }

    /// True for bands that pass AA for body text.
    pub fn is_readable(self) -> bool {
        matches!(self, ContrastLevel::Excellent | ContrastLevel::Good)
    }
}

/// Text color candidates placed on top of a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    White,
    Black,
}

impl TextColor {
    pub fn rgb(self) -> Rgb {
        match self {
            TextColor::White => Rgb::WHITE,
            TextColor::Black => Rgb::BLACK,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextColor::White => "white",
            TextColor::Black => "black",
        }
    }
}

/// White or black, whichever contrasts more with `background`.
/// Ties go to black.
pub fn best_text_color(background: Rgb) -> TextColor {
    if contrast_ratio(background, Rgb::WHITE) > contrast_ratio(background, Rgb::BLACK) {
        TextColor::White
    } else {
        TextColor::Black
    }
}

/// Contrast summary for one background color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccessibilityReport {
    pub luminance: f64,
    pub contrast_with_white: f64,
    pub contrast_with_black: f64,
    pub best_text: TextColor,
    /// Ratio against `best_text`.
    pub ratio: f64,
    pub level: ContrastLevel,
}

impl AccessibilityReport {
    pub fn analyze(background: Rgb) -> Self {
        let contrast_with_white = contrast_ratio(background, Rgb::WHITE);
        let contrast_with_black = contrast_ratio(background, Rgb::BLACK);
        let best_text = best_text_color(background);
        let ratio = contrast_with_white.max(contrast_with_black);
        Self {
            luminance: relative_luminance(background),
            contrast_with_white,
            contrast_with_black,
            best_text,
            ratio,
            level: ContrastLevel::from_ratio(ratio),
        }
    }
}

/// Simulated color vision deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBlindness {
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Achromatopsia,
}

type Matrix3 = [[f64; 3]; 3];

const PROTANOPIA: Matrix3 = [[0.567, 0.433, 0.0], [0.558, 0.442, 0.0], [0.0, 0.242, 0.758]];
const DEUTERANOPIA: Matrix3 = [[0.625, 0.375, 0.0], [0.7, 0.3, 0.0], [0.0, 0.3, 0.7]];
const TRITANOPIA: Matrix3 = [[0.95, 0.05, 0.0], [0.0, 0.433, 0.567], [0.0, 0.475, 0.525]];

/// Rec. 601 luma weights for the monochrome case.
const GRAYSCALE_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Clamps to [0, 255] and truncates toward zero. Truncation (not rounding)
/// is part of the observable output and must not change.
fn truncate_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

fn dot(row: [f64; 3], v: [f64; 3]) -> f64 {
    row[0] * v[0] + row[1] * v[1] + row[2] * v[2]
}

impl ColorBlindness {
    pub const ALL: [ColorBlindness; 4] = [
        ColorBlindness::Protanopia,
        ColorBlindness::Deuteranopia,
        ColorBlindness::Tritanopia,
        ColorBlindness::Achromatopsia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorBlindness::Protanopia => "protanopia",
            ColorBlindness::Deuteranopia => "deuteranopia",
            ColorBlindness::Tritanopia => "tritanopia",
            ColorBlindness::Achromatopsia => "achromatopsia",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ColorBlindness::Protanopia => "Protanopia (red-blind)",
            ColorBlindness::Deuteranopia => "Deuteranopia (green-blind)",
            ColorBlindness::Tritanopia => "Tritanopia (blue-blind)",
            ColorBlindness::Achromatopsia => "Achromatopsia (no color)",
        }
    }

    pub fn simulate(self, c: Rgb) -> Rgb {
        let v = [c.r as f64, c.g as f64, c.b as f64];
        let matrix = match self {
            ColorBlindness::Protanopia => PROTANOPIA,
            ColorBlindness::Deuteranopia => DEUTERANOPIA,
            ColorBlindness::Tritanopia => TRITANOPIA,
            ColorBlindness::Achromatopsia => {
                let gray = truncate_channel(dot(GRAYSCALE_WEIGHTS, v));
                return Rgb::new(gray, gray, gray);
            }
        };
        Rgb::new(
            truncate_channel(dot(matrix[0], v)),
            truncate_channel(dot(matrix[1], v)),
            truncate_channel(dot(matrix[2], v)),
        )
    }
}

/// Minimum WCAG AA contrast for body text.
pub const MIN_TEXT_CONTRAST: f64 = 4.5;

/// A deficiency under which a text/background pair loses contrast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastIssue {
    pub kind: ColorBlindness,
    /// Contrast of the two simulated colors.
    pub contrast: f64,
}

impl ContrastIssue {
    pub fn message(&self) -> String {
        format!("Low contrast for {} users", self.kind.title())
    }
}

impl ColorBlindness {
    /// Contrast of `fg` on `bg` as seen with this deficiency.
    pub fn contrast(self, fg: Rgb, bg: Rgb) -> f64 {
        contrast_ratio(self.simulate(fg), self.simulate(bg))
    }

    /// Every deficiency under which `fg` on `bg` drops below `min_contrast`,
    /// in [`ColorBlindness::ALL`] order. Empty means the pair is accessible.
    pub fn pair_issues(fg: Rgb, bg: Rgb, min_contrast: f64) -> Vec<ContrastIssue> {
        ColorBlindness::ALL
            .into_iter()
            .map(|kind| ContrastIssue {
                kind,
                contrast: kind.contrast(fg, bg),
            })
            .filter(|issue| issue.contrast < min_contrast)
            .collect()
    }
}

/// Warm / neutral / cool bucket of an estimated temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureClass {
    Warm,
    Neutral,
    Cool,
}

impl TemperatureClass {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureClass::Warm => "warm",
            TemperatureClass::Neutral => "neutral",
            TemperatureClass::Cool => "cool",
        }
    }
}

/// Approximate correlated color temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorTemperature {
    pub kelvin: f64,
    pub class: TemperatureClass,
}

const BASE_KELVIN: f64 = 6500.0;
const KELVIN_RANGE: (f64, f64) = (1000.0, 12000.0);

impl ColorTemperature {
    /// Scales 6500K by the blue/red balance.
    ///
    /// Blue-dominant colors scale up by B/R, everything else scales down by
    /// R/B. Zero channels count as 1. The result is clamped to
    /// [1000, 12000]K.
    pub fn estimate(c: Rgb) -> Self {
        let r = c.r.max(1) as f64;
        let b = c.b.max(1) as f64;
        let kelvin = if c.b > c.r {
            BASE_KELVIN * (b / r)
        } else {
            BASE_KELVIN / (r / b)
        };
        let kelvin = kelvin.clamp(KELVIN_RANGE.0, KELVIN_RANGE.1);
        let class = if kelvin < 3000.0 {
            TemperatureClass::Warm
        } else if kelvin < 5000.0 {
            TemperatureClass::Neutral
        } else {
            TemperatureClass::Cool
        };
        Self { kelvin, class }
    }
}
