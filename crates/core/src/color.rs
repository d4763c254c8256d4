//! Color types and conversion functions for the color-advisor.
//!
//! [`Rgb`] is the only stored representation: a 24-bit triple with a
//! canonical `#rrggbb` text form. Every other space (`Hsl`, `Hsv`, `Cmyk`,
//! `Lab`) is derived on demand by the pure functions in this module.
//!
//! Conversions are illustrative rather than colorimetrically exact; HSL and
//! HSV round-trip back to RGB within one unit per channel.

use crate::error::ColorError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 24-bit sRGB color.
///
/// Serializes as a lowercase hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees [0, 360), saturation and lightness in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Hue in degrees [0, 360), saturation and value in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Process colors in percent [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

/// CIELAB under the D65 reference white.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "FF00AA".
    ///
    /// Exactly six ASCII hex digits are required, with at most one leading
    /// `#`. Returns `ColorError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Rgb, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidColor(format!("'{hex}'")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| ColorError::InvalidColor(format!("'{hex}': {e}")))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels scaled to [0, 1].
    pub fn to_unit(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Validates a hex color and returns its canonical `#rrggbb` form.
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    Rgb::from_hex(hex).map(Rgb::to_hex)
}

/// Normalizes a hue angle to [0, 360).
pub fn normalize_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn unit_to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Hue in degrees shared by HSL and HSV, given unit channels and their extrema.
fn hue_degrees(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let sector = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    normalize_hue(sector * 60.0)
}

/// Converts RGB to HSL.
///
/// Achromatic colors (r = g = b) get hue 0 and saturation 0.
pub fn rgb_to_hsl(c: Rgb) -> Hsl {
    let [r, g, b] = c.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    Hsl {
        h: hue_degrees(r, g, b, max, delta),
        s: s * 100.0,
        l: l * 100.0,
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Converts HSL to RGB.
///
/// Hue wraps modulo 360; saturation and lightness are clamped to [0, 100].
pub fn hsl_to_rgb(c: Hsl) -> Rgb {
    let h = normalize_hue(c.h) / 360.0;
    let s = c.s.clamp(0.0, 100.0) / 100.0;
    let l = c.l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let v = unit_to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    Rgb::new(
        unit_to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        unit_to_channel(hue_to_channel(p, q, h)),
        unit_to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

/// Convenience: HSL straight to `"#rrggbb"`.
pub fn hsl_to_hex(c: Hsl) -> String {
    hsl_to_rgb(c).to_hex()
}

/// Converts RGB to HSV.
pub fn rgb_to_hsv(c: Rgb) -> Hsv {
    let [r, g, b] = c.to_unit();
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else {
        hue_degrees(r, g, b, max, delta)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv {
        h,
        s: s * 100.0,
        v: max * 100.0,
    }
}

/// Converts HSV to RGB. Hue wraps, saturation and value clamp to [0, 100].
pub fn hsv_to_rgb(c: Hsv) -> Rgb {
    let h = normalize_hue(c.h) / 60.0;
    let s = c.s.clamp(0.0, 100.0) / 100.0;
    let v = c.v.clamp(0.0, 100.0) / 100.0;

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(unit_to_channel(r), unit_to_channel(g), unit_to_channel(b))
}

/// Converts RGB to CMYK.
///
/// Pure black short-circuits to K=100 so the chromatic channels never divide
/// by zero.
pub fn rgb_to_cmyk(c: Rgb) -> Cmyk {
    if c == Rgb::BLACK {
        return Cmyk {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 100.0,
        };
    }
    let [r, g, b] = c.to_unit();
    let k = 1.0 - r.max(g).max(b);
    let chroma = |x: f64| (1.0 - x - k) / (1.0 - k) * 100.0;
    Cmyk {
        c: chroma(r),
        m: chroma(g),
        y: chroma(b),
        k: k * 100.0,
    }
}

/// D65 reference white, scaled so Y = 100.
const D65_WHITE: [f64; 3] = [95.047, 100.0, 108.883];

/// CIE threshold (6/29)^3 below which the cube root is replaced by a line.
const CIE_EPSILON: f64 = 0.008856;

/// Applies inverse sRGB gamma to a single component in [0, 1].
pub fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > CIE_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Converts RGB to CIELAB via linear RGB and XYZ (D65).
pub fn rgb_to_lab(c: Rgb) -> Lab {
    let [r, g, b] = c.to_unit().map(|v| srgb_component_to_linear(v) * 100.0);

    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    let fx = lab_f(x / D65_WHITE[0]);
    let fy = lab_f(y / D65_WHITE[1]);
    let fz = lab_f(z / D65_WHITE[2]);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn within_one(a: Rgb, b: Rgb) -> bool {
        (a.r as i16 - b.r as i16).abs() <= 1
            && (a.g as i16 - b.g as i16).abs() <= 1
            && (a.b as i16 - b.b as i16).abs() <= 1
    }

    // -- Hex parsing --

    #[test]
    fn from_hex_parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#ff0000").unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hex("00ff00").unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        assert_eq!(
            Rgb::from_hex("#C0FFEE").unwrap(),
            Rgb::from_hex("#c0ffee").unwrap()
        );
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        for bad in [
            "", "#", "#fff", "#ff00ff00", "#gggggg", "##ff000", "ff 000", "+f0000", "#ff00-0",
        ] {
            let err = Rgb::from_hex(bad).unwrap_err();
            assert!(matches!(err, ColorError::InvalidColor(_)), "{bad:?}");
        }
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        // Six bytes, but not six characters.
        assert!(Rgb::from_hex("ééé").is_err());
        assert!(Rgb::from_hex("#ff00é").is_err());
    }

    #[test]
    fn to_hex_is_lowercase_with_hash() {
        assert_eq!(Rgb::new(0xAB, 0xCD, 0xEF).to_hex(), "#abcdef");
        assert_eq!(Rgb::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn normalize_hex_adds_hash_and_lowercases() {
        assert_eq!(normalize_hex("0066FF").unwrap(), "#0066ff");
        assert!(normalize_hex("0066F").is_err());
    }

    #[test]
    fn from_str_and_display_agree() {
        let c: Rgb = "#804020".parse().unwrap();
        assert_eq!(c.to_string(), "#804020");
    }

    // -- Serde --

    #[test]
    fn rgb_serializes_as_hex_string() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
    }

    #[test]
    fn rgb_deserialize_rejects_invalid_hex() {
        let result: Result<Rgb, _> = serde_json::from_str("\"not-a-color\"");
        assert!(result.is_err());
    }

    // -- HSL --

    #[test]
    fn rgb_to_hsl_primaries() {
        let red = rgb_to_hsl(Rgb::new(255, 0, 0));
        assert!(approx_eq(red.h, 0.0) && approx_eq(red.s, 100.0) && approx_eq(red.l, 50.0));

        let green = rgb_to_hsl(Rgb::new(0, 255, 0));
        assert!(approx_eq(green.h, 120.0));

        let blue = rgb_to_hsl(Rgb::new(0, 0, 255));
        assert!(approx_eq(blue.h, 240.0));
    }

    #[test]
    fn rgb_to_hsl_gray_has_zero_saturation() {
        let gray = rgb_to_hsl(Rgb::new(128, 128, 128));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.l - 50.196).abs() < 1e-2);
    }

    #[test]
    fn rgb_to_hsl_magenta_hue_wraps_below_360() {
        let c = rgb_to_hsl(Rgb::new(255, 0, 128));
        assert!(c.h > 329.0 && c.h < 360.0, "hue {}", c.h);
    }

    #[test]
    fn hsl_to_rgb_wraps_hue_and_clamps_percentages() {
        let a = hsl_to_rgb(Hsl { h: 480.0, s: 100.0, l: 50.0 });
        let b = hsl_to_rgb(Hsl { h: 120.0, s: 100.0, l: 50.0 });
        assert_eq!(a, b);

        let neg = hsl_to_rgb(Hsl { h: -120.0, s: 100.0, l: 50.0 });
        assert_eq!(neg, hsl_to_rgb(Hsl { h: 240.0, s: 100.0, l: 50.0 }));

        let over = hsl_to_rgb(Hsl { h: 0.0, s: 150.0, l: 120.0 });
        assert_eq!(over, Rgb::WHITE);
    }

    #[test]
    fn hsl_to_hex_pure_blue() {
        assert_eq!(hsl_to_hex(Hsl { h: 240.0, s: 100.0, l: 50.0 }), "#0000ff");
    }

    // -- HSV --

    #[test]
    fn rgb_to_hsv_known_values() {
        let c = rgb_to_hsv(Rgb::new(255, 128, 0));
        assert!((c.h - 30.1).abs() < 0.2, "h {}", c.h);
        assert!(approx_eq(c.s, 100.0));
        assert!(approx_eq(c.v, 100.0));

        let black = rgb_to_hsv(Rgb::BLACK);
        assert_eq!((black.h, black.s, black.v), (0.0, 0.0, 0.0));
    }

    // -- CMYK --

    #[test]
    fn cmyk_pure_black_special_case() {
        let k = rgb_to_cmyk(Rgb::BLACK);
        assert_eq!((k.c, k.m, k.y, k.k), (0.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn cmyk_primaries() {
        let red = rgb_to_cmyk(Rgb::new(255, 0, 0));
        assert!(approx_eq(red.c, 0.0));
        assert!(approx_eq(red.m, 100.0));
        assert!(approx_eq(red.y, 100.0));
        assert!(approx_eq(red.k, 0.0));

        let white = rgb_to_cmyk(Rgb::WHITE);
        assert!(approx_eq(white.c + white.m + white.y + white.k, 0.0));
    }

    // -- LAB --

    #[test]
    fn lab_white_and_black() {
        let white = rgb_to_lab(Rgb::WHITE);
        assert!((white.l - 100.0).abs() < 0.1, "L {}", white.l);
        assert!(white.a.abs() < 0.1 && white.b.abs() < 0.1);

        let black = rgb_to_lab(Rgb::BLACK);
        assert!(black.l.abs() < 1e-9, "L {}", black.l);
        assert!(black.a.abs() < 1e-9 && black.b.abs() < 1e-9);
    }

    #[test]
    fn lab_red_matches_reference() {
        // Reference: sRGB red is approximately L=53.2, a=80.1, b=67.2.
        let red = rgb_to_lab(Rgb::new(255, 0, 0));
        assert!((red.l - 53.2).abs() < 0.5, "L {}", red.l);
        assert!((red.a - 80.1).abs() < 0.5, "a {}", red.a);
        assert!((red.b - 67.2).abs() < 0.5, "b {}", red.b);
    }

    #[test]
    fn lab_uses_linear_branch_for_very_dark_colors() {
        // Y for #010101 is far below the CIE threshold.
        let dark = rgb_to_lab(Rgb::new(1, 1, 1));
        assert!(dark.l > 0.0 && dark.l < 1.0, "L {}", dark.l);
    }

    #[test]
    fn hsl_round_trip_known_colors() {
        for hex in ["#ff0000", "#0066ff", "#804020", "#c0ffee", "#7f7f7f", "#010203"] {
            let c = Rgb::from_hex(hex).unwrap();
            assert!(within_one(hsl_to_rgb(rgb_to_hsl(c)), c), "{hex}");
        }
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_rgb() -> impl Strategy<Value = Rgb> {
            (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Rgb::new(r, g, b))
        }

        proptest! {
            #[test]
            fn hex_round_trip_is_exact(c in any_rgb()) {
                prop_assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
            }

            #[test]
            fn hsl_round_trip_within_one(c in any_rgb()) {
                let back = hsl_to_rgb(rgb_to_hsl(c));
                prop_assert!(within_one(back, c), "{:?} -> {:?}", c, back);
            }

            #[test]
            fn hsv_round_trip_within_one(c in any_rgb()) {
                let back = hsv_to_rgb(rgb_to_hsv(c));
                prop_assert!(within_one(back, c), "{:?} -> {:?}", c, back);
            }

            #[test]
            fn hsl_components_stay_in_range(c in any_rgb()) {
                let hsl = rgb_to_hsl(c);
                prop_assert!((0.0..360.0).contains(&hsl.h), "h {}", hsl.h);
                prop_assert!((0.0..=100.0 + 1e-9).contains(&hsl.s), "s {}", hsl.s);
                prop_assert!((0.0..=100.0 + 1e-9).contains(&hsl.l), "l {}", hsl.l);
            }

            #[test]
            fn cmyk_components_stay_in_range(c in any_rgb()) {
                let k = rgb_to_cmyk(c);
                for v in [k.c, k.m, k.y, k.k] {
                    prop_assert!(v >= -1e-9 && v <= 100.0 + 1e-9, "{:?}", k);
                }
            }

            #[test]
            fn normalize_hue_is_in_range(h in -1e6_f64..1e6) {
                let n = normalize_hue(h);
                prop_assert!((0.0..360.0).contains(&n), "{h} -> {n}");
            }
        }
    }
}
