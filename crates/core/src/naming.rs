//! Human-readable color names from HSL.
//!
//! A hue band picks the base name and its attribute words; lightness and
//! saturation buckets prefix it with modifiers ("dark", "vibrant", ...).
//! Nearly unsaturated colors bypass the hue table and are named as grays.

use crate::color::Hsl;
use serde::Serialize;

/// A closed hue interval `[start, end]` in degrees. `start > end` wraps
/// through 0. Neighboring bands share their edges; the first listed wins.
struct HueBand {
    start: f64,
    end: f64,
    name: &'static str,
    attributes: &'static [&'static str],
}

impl HueBand {
    fn contains(&self, h: f64) -> bool {
        if self.start <= self.end {
            h >= self.start && h <= self.end
        } else {
            h >= self.start || h <= self.end
        }
    }
}

const HUE_BANDS: &[HueBand] = &[
    HueBand {
        start: 355.0,
        end: 10.0,
        name: "red",
        attributes: &["energetic", "passionate", "attention-grabbing", "bold", "exciting"],
    },
    HueBand {
        start: 10.0,
        end: 45.0,
        name: "orange",
        attributes: &["warm", "energetic", "friendly", "playful", "inviting"],
    },
    HueBand {
        start: 45.0,
        end: 70.0,
        name: "yellow",
        attributes: &["cheerful", "optimistic", "stimulating", "bright", "sunny"],
    },
    HueBand {
        start: 70.0,
        end: 170.0,
        name: "green",
        attributes: &["natural", "fresh", "growth-oriented", "calming", "balanced"],
    },
    HueBand {
        start: 170.0,
        end: 200.0,
        name: "cyan",
        attributes: &["calm", "refreshing", "technological", "clean", "modern"],
    },
    HueBand {
        start: 200.0,
        end: 260.0,
        name: "blue",
        attributes: &["trustworthy", "calm", "professional", "reliable", "peaceful"],
    },
    HueBand {
        start: 260.0,
        end: 290.0,
        name: "purple",
        attributes: &["creative", "luxurious", "mysterious", "royal", "imaginative"],
    },
    HueBand {
        start: 290.0,
        end: 355.0,
        name: "magenta",
        attributes: &["innovative", "energetic", "emotional", "romantic", "bold"],
    },
];

const NEUTRAL_ATTRIBUTES: &[&str] = &["balanced", "versatile", "calm", "sophisticated", "timeless"];
const BLACK_ATTRIBUTES: &[&str] = &["elegant", "sophisticated", "formal", "mysterious", "dramatic"];
const WHITE_ATTRIBUTES: &[&str] = &["clean", "pure", "minimalist", "airy", "spacious"];
const GRAY_ATTRIBUTES: &[&str] = &["neutral", "balanced", "conservative", "timeless", "versatile"];

/// Lower bounds of the lightness buckets, highest first.
const LIGHTNESS_MODIFIERS: &[(f64, &str)] = &[
    (80.0, "very light"),
    (60.0, "light"),
    (40.0, "medium"),
    (20.0, "dark"),
    (0.0, "very dark"),
];

/// Lower bounds of the saturation buckets, highest first.
const SATURATION_MODIFIERS: &[(f64, &str)] = &[
    (90.0, "intense"),
    (70.0, "vibrant"),
    (40.0, "moderate"),
    (20.0, "muted"),
    (0.0, "grayish"),
];

/// Below this saturation a color is named as black, white or gray.
const GRAYSCALE_SATURATION: f64 = 10.0;

/// Name and descriptive words for a color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorDescription {
    /// Full name, e.g. "medium intense blue".
    pub name: String,
    /// Hue family, e.g. "blue", or "gray" / "black" / "white".
    pub base: &'static str,
    pub attributes: &'static [&'static str],
}

fn bucket(value: f64, table: &[(f64, &'static str)]) -> &'static str {
    table
        .iter()
        .find(|(min, _)| value >= *min)
        .map(|(_, name)| *name)
        .unwrap_or("")
}

pub fn lightness_modifier(l: f64) -> &'static str {
    bucket(l, LIGHTNESS_MODIFIERS)
}

pub fn saturation_modifier(s: f64) -> &'static str {
    bucket(s, SATURATION_MODIFIERS)
}

/// Describes an HSL color.
pub fn describe(hsl: Hsl) -> ColorDescription {
    if hsl.s < GRAYSCALE_SATURATION {
        return if hsl.l < 20.0 {
            ColorDescription {
                name: "near black".to_string(),
                base: "black",
                attributes: BLACK_ATTRIBUTES,
            }
        } else if hsl.l > 80.0 {
            ColorDescription {
                name: "near white".to_string(),
                base: "white",
                attributes: WHITE_ATTRIBUTES,
            }
        } else {
            ColorDescription {
                name: format!("{} gray", lightness_modifier(hsl.l)),
                base: "gray",
                attributes: GRAY_ATTRIBUTES,
            }
        };
    }

    let (base, attributes) = HUE_BANDS
        .iter()
        .find(|band| band.contains(hsl.h))
        .map(|band| (band.name, band.attributes))
        .unwrap_or(("neutral", NEUTRAL_ATTRIBUTES));

    let name = [
        lightness_modifier(hsl.l),
        saturation_modifier(hsl.s),
        base,
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    ColorDescription {
        name,
        base,
        attributes,
    }
}
