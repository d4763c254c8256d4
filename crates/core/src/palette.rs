//! Style-driven palette builder.
//!
//! A palette starts from one seed color and grows by perturbing its HSL
//! components. Each [`PaletteStyle`] draws its perturbations from the shift
//! pools in a different pattern. The result always has exactly the requested
//! number of distinct colors with the seed first.

use crate::color::{hsl_to_hex, normalize_hue, rgb_to_hsl, Hsl, Rgb};
use crate::error::ColorError;
use crate::prng::Xorshift64;
use serde::{Deserialize, Serialize};

pub const MIN_COLORS: usize = 2;
pub const MAX_COLORS: usize = 10;
pub const DEFAULT_COLORS: usize = 5;

/// Golden ratio conjugate times a full turn.
const GOLDEN_ANGLE: f64 = 0.618_033_988_749_895 * 360.0;

const BALANCED_JITTER: [f64; 3] = [-10.0, 0.0, 10.0];
const ANALOGOUS_JITTER: [f64; 3] = [-5.0, 0.0, 5.0];
const COMPLEMENT_SPREAD: [f64; 2] = [-15.0, 15.0];

/// Random refill draws before switching to the deterministic sweep.
const MAX_REFILL_ATTEMPTS: usize = 64;

/// Generated saturation bounds.
const SATURATION_RANGE: (f64, f64) = (0.0, 100.0);
/// Generated lightness bounds; keeps palettes away from pure black and white.
const LIGHTNESS_RANGE: (f64, f64) = (10.0, 90.0);

/// How the palette is spread around the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStyle {
    /// Golden-angle hue steps with light saturation/lightness jitter.
    #[default]
    Balanced,
    /// Seed hue only, alternating saturation and lightness shifts.
    Monochromatic,
    /// Small hue steps alternating on both sides of the seed.
    Analogous,
    /// Seed and its complement, each with nearby variants.
    Complementary,
}

impl PaletteStyle {
    pub const ALL: [PaletteStyle; 4] = [
        PaletteStyle::Balanced,
        PaletteStyle::Monochromatic,
        PaletteStyle::Analogous,
        PaletteStyle::Complementary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaletteStyle::Balanced => "balanced",
            PaletteStyle::Monochromatic => "monochromatic",
            PaletteStyle::Analogous => "analogous",
            PaletteStyle::Complementary => "complementary",
        }
    }

    /// Case-insensitive lookup. `None` for unknown names.
    pub fn from_name(name: &str) -> Option<PaletteStyle> {
        let wanted = name.trim().to_ascii_lowercase();
        PaletteStyle::ALL.into_iter().find(|s| s.name() == wanted)
    }

    /// Like [`from_name`](Self::from_name) but unknown names become
    /// [`PaletteStyle::Balanced`].
    pub fn resolve(name: &str) -> PaletteStyle {
        Self::from_name(name).unwrap_or_default()
    }
}

/// Perturbation tables, in degrees for hue and percentage points otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftPools {
    pub hue_small: &'static [f64],
    pub hue_medium: &'static [f64],
    pub saturation: &'static [f64],
    pub lightness: &'static [f64],
}

impl Default for ShiftPools {
    fn default() -> Self {
        Self {
            hue_small: &[15.0, 30.0, 45.0],
            hue_medium: &[60.0, 90.0],
            saturation: &[-20.0, -10.0, 0.0, 10.0, 20.0],
            lightness: &[-30.0, -15.0, 0.0, 15.0, 30.0],
        }
    }
}

/// Builds palettes from a seed color.
#[derive(Debug, Clone, Default)]
pub struct PaletteGenerator {
    pools: ShiftPools,
}

fn cycle(pool: &[f64], i: usize) -> f64 {
    if pool.is_empty() {
        0.0
    } else {
        pool[i % pool.len()]
    }
}

fn shifted(base: Hsl, dh: f64, ds: f64, dl: f64) -> Hsl {
    let (s_min, s_max) = SATURATION_RANGE;
    let (l_min, l_max) = LIGHTNESS_RANGE;
    Hsl {
        h: normalize_hue(base.h + dh),
        s: (base.s + ds).clamp(s_min, s_max),
        l: (base.l + dl).clamp(l_min, l_max),
    }
}

fn push_unique(palette: &mut Vec<String>, hex: String) {
    if !palette.contains(&hex) {
        palette.push(hex);
    }
}

impl PaletteGenerator {
    /// Generates `count` distinct `#rrggbb` colors, seed first.
    ///
    /// `count` is clamped to [`MIN_COLORS`, `MAX_COLORS`]. Fails only if
    /// `seed_hex` is not a valid hex color.
    pub fn generate(
        &self,
        seed_hex: &str,
        count: usize,
        style: PaletteStyle,
        rng: &mut Xorshift64,
    ) -> Result<Vec<String>, ColorError> {
        let seed = Rgb::from_hex(seed_hex)?;
        let count = count.clamp(MIN_COLORS, MAX_COLORS);
        let base = rgb_to_hsl(seed);

        let mut palette = vec![seed.to_hex()];
        let candidates = match style {
            PaletteStyle::Balanced => self.balanced(base, count, rng),
            PaletteStyle::Monochromatic => self.monochromatic(base, count),
            PaletteStyle::Analogous => self.analogous(base, count, rng),
            PaletteStyle::Complementary => self.complementary(base, count, rng),
        };
        for c in candidates {
            push_unique(&mut palette, hsl_to_hex(c));
        }

        self.refill(&mut palette, base, count, rng);
        palette.truncate(count);
        Ok(palette)
    }

    fn balanced(&self, base: Hsl, count: usize, rng: &mut Xorshift64) -> Vec<Hsl> {
        (1..count)
            .map(|i| {
                shifted(
                    base,
                    i as f64 * GOLDEN_ANGLE,
                    rng.pick(&BALANCED_JITTER),
                    rng.pick(&BALANCED_JITTER),
                )
            })
            .collect()
    }

    /// Even steps shift saturation, odd steps shift lightness.
    fn monochromatic(&self, base: Hsl, count: usize) -> Vec<Hsl> {
        (0..count - 1)
            .map(|i| {
                if i % 2 == 0 {
                    shifted(base, 0.0, cycle(self.pools.saturation, i), 0.0)
                } else {
                    shifted(base, 0.0, 0.0, cycle(self.pools.lightness, i))
                }
            })
            .collect()
    }

    /// Hue steps +15, -30, +45, ... cycling through the small pool.
    fn analogous(&self, base: Hsl, count: usize, rng: &mut Xorshift64) -> Vec<Hsl> {
        (0..count - 1)
            .map(|i| {
                let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
                let dh = direction * cycle(self.pools.hue_small, i);
                let ds = rng.pick(&ANALOGOUS_JITTER);
                let dl = rng.pick(&ANALOGOUS_JITTER);
                shifted(base, dh, ds, dl)
            })
            .collect()
    }

    fn complementary(&self, base: Hsl, count: usize, rng: &mut Xorshift64) -> Vec<Hsl> {
        let complement = shifted(base, 180.0, 0.0, 0.0);
        let mut out = vec![complement];
        for i in 2..count {
            let anchor = if i % 2 == 0 { base } else { complement };
            out.push(shifted(
                anchor,
                rng.pick(&COMPLEMENT_SPREAD),
                rng.pick(self.pools.saturation),
                rng.pick(self.pools.lightness),
            ));
        }
        out
    }

    /// Tops `palette` up to `count` after duplicates were dropped.
    ///
    /// Random draws from the pools come first. Low-saturation seeds can
    /// exhaust them, so a fixed hue/lightness sweep finishes the job.
    fn refill(&self, palette: &mut Vec<String>, base: Hsl, count: usize, rng: &mut Xorshift64) {
        let mut attempts = 0;
        while palette.len() < count && attempts < MAX_REFILL_ATTEMPTS {
            attempts += 1;
            let c = shifted(
                base,
                rng.pick(self.pools.hue_medium),
                rng.pick(self.pools.saturation),
                rng.pick(self.pools.lightness),
            );
            push_unique(palette, hsl_to_hex(c));
        }
        if palette.len() >= count {
            return;
        }

        log::debug!(
            "palette for {} needs sweep fill ({} of {count})",
            palette[0],
            palette.len()
        );
        let sweep_base = Hsl {
            s: base.s.max(60.0),
            ..base
        };
        'sweep: for l in [20.0, 35.0, 50.0, 65.0, 80.0] {
            for step in 0..12 {
                if palette.len() >= count {
                    break 'sweep;
                }
                let c = Hsl {
                    h: normalize_hue(sweep_base.h + step as f64 * 30.0),
                    l,
                    ..sweep_base
                };
                push_unique(palette, hsl_to_hex(c));
            }
        }
    }
}

fn mix(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb::new(lerp(from.r, to.r), lerp(from.g, to.g), lerp(from.b, to.b))
}

fn tones(seed_hex: &str, count: usize, toward: Rgb) -> Result<Vec<String>, ColorError> {
    let seed = Rgb::from_hex(seed_hex)?;
    Ok((1..=count)
        .map(|i| mix(seed, toward, i as f64 / (count + 1) as f64).to_hex())
        .collect())
}

/// `count` steps from `seed_hex` toward white, lightest last.
///
/// Step `i` mixes `i / (count + 1)` white into the seed in RGB, so neither
/// the seed nor pure white is included.
pub fn tints(seed_hex: &str, count: usize) -> Result<Vec<String>, ColorError> {
    tones(seed_hex, count, Rgb::WHITE)
}

/// Like [`tints`], mixing toward black.
pub fn shades(seed_hex: &str, count: usize) -> Result<Vec<String>, ColorError> {
    tones(seed_hex, count, Rgb::BLACK)
}

/// [`PaletteGenerator::generate`] with the default shift pools.
pub fn generate_palette(
    seed_hex: &str,
    count: usize,
    style: PaletteStyle,
    rng: &mut Xorshift64,
) -> Result<Vec<String>, ColorError> {
    PaletteGenerator::default().generate(seed_hex, count, style, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_valid(palette: &[String], seed: &str, count: usize) {
        assert_eq!(palette.len(), count, "{palette:?}");
        assert_eq!(palette[0], seed);
        let unique: HashSet<_> = palette.iter().collect();
        assert_eq!(unique.len(), count, "duplicates in {palette:?}");
        for hex in palette {
            assert!(Rgb::from_hex(hex).is_ok(), "bad hex {hex}");
            assert_eq!(hex, &hex.to_lowercase());
        }
    }

    // -- styles --

    #[test]
    fn every_style_and_count_yields_exact_unique_palette() {
        let mut rng = Xorshift64::new(7);
        for seed in ["#3366cc", "#ff0000", "#2e8b57"] {
            for style in PaletteStyle::ALL {
                for count in MIN_COLORS..=MAX_COLORS {
                    let p = generate_palette(seed, count, style, &mut rng).unwrap();
                    assert_valid(&p, seed, count);
                }
            }
        }
    }

    #[test]
    fn grayscale_seeds_still_fill_the_palette() {
        let mut rng = Xorshift64::new(99);
        for seed in ["#000000", "#ffffff", "#808080"] {
            for style in PaletteStyle::ALL {
                let p = generate_palette(seed, MAX_COLORS, style, &mut rng).unwrap();
                assert_valid(&p, seed, MAX_COLORS);
            }
        }
    }

    #[test]
    fn complementary_second_color_is_the_complement() {
        let mut rng = Xorshift64::new(1);
        let p = generate_palette("#ff0000", 5, PaletteStyle::Complementary, &mut rng).unwrap();
        assert_eq!(p[1], "#00ffff");
    }

    #[test]
    fn monochromatic_first_step_shifts_saturation() {
        // #3366cc is hsl(220, 60, 50); step 0 applies saturation pool[0] = -20.
        let mut rng = Xorshift64::new(3);
        let p = generate_palette("#3366cc", 2, PaletteStyle::Monochromatic, &mut rng).unwrap();
        let seed = rgb_to_hsl(Rgb::new(0x33, 0x66, 0xcc));
        let first = rgb_to_hsl(Rgb::from_hex(&p[1]).unwrap());
        assert!((first.h - seed.h).abs() < 2.0, "{} vs {}", first.h, seed.h);
        assert!((first.l - seed.l).abs() < 1.0, "{} vs {}", first.l, seed.l);
        assert!((first.s - (seed.s - 20.0)).abs() < 1.5, "{} vs {}", first.s, seed.s);
    }

    #[test]
    fn monochromatic_second_step_shifts_lightness() {
        // Step 1 applies lightness pool[1] = -15.
        let mut rng = Xorshift64::new(3);
        let p = generate_palette("#3366cc", 3, PaletteStyle::Monochromatic, &mut rng).unwrap();
        let seed = rgb_to_hsl(Rgb::new(0x33, 0x66, 0xcc));
        let second = rgb_to_hsl(Rgb::from_hex(&p[2]).unwrap());
        assert!((second.l - (seed.l - 15.0)).abs() < 1.0, "{} vs {}", second.l, seed.l);
    }

    #[test]
    fn analogous_steps_alternate_from_plus_fifteen() {
        let seed = rgb_to_hsl(Rgb::new(0x33, 0x66, 0xcc));
        for s in 0..20 {
            let mut rng = Xorshift64::new(s);
            let p = generate_palette("#3366cc", 3, PaletteStyle::Analogous, &mut rng).unwrap();
            let first = rgb_to_hsl(Rgb::from_hex(&p[1]).unwrap());
            let second = rgb_to_hsl(Rgb::from_hex(&p[2]).unwrap());
            // Jitter is at most 5 points of s and l; 8-bit rounding moves hue slightly.
            assert!((first.h - (seed.h + 15.0)).abs() < 3.0, "{} vs {}", first.h, seed.h);
            assert!((second.h - (seed.h - 30.0)).abs() < 3.0, "{} vs {}", second.h, seed.h);
            assert!((first.l - seed.l).abs() <= 6.0);
        }
    }

    #[test]
    fn same_seed_reproduces_palette() {
        let a = generate_palette("#abcdef", 7, PaletteStyle::Balanced, &mut Xorshift64::new(5));
        let b = generate_palette("#abcdef", 7, PaletteStyle::Balanced, &mut Xorshift64::new(5));
        assert_eq!(a.unwrap(), b.unwrap());
    }

    // -- tints and shades --

    #[test]
    fn tints_of_red_step_toward_white() {
        // t = 1/4, 2/4, 3/4 of the way from 0 to 255 on g and b.
        let t = tints("#ff0000", 3).unwrap();
        assert_eq!(t, vec!["#ff4040", "#ff8080", "#ffbfbf"]);
    }

    #[test]
    fn shades_of_white_step_toward_black() {
        let s = shades("#ffffff", 4).unwrap();
        assert_eq!(s, vec!["#cccccc", "#999999", "#666666", "#333333"]);
    }

    #[test]
    fn tones_exclude_the_endpoints() {
        assert!(tints("#123456", 0).unwrap().is_empty());
        let t = tints("#000000", 1).unwrap();
        assert_eq!(t, vec!["#808080"]);
        assert!(shades("nope", 3).unwrap_err().is_validation());
    }

    // -- inputs --

    #[test]
    fn count_is_clamped() {
        let mut rng = Xorshift64::new(11);
        let low = generate_palette("#123456", 0, PaletteStyle::Balanced, &mut rng).unwrap();
        assert_eq!(low.len(), MIN_COLORS);
        let high = generate_palette("#123456", 50, PaletteStyle::Analogous, &mut rng).unwrap();
        assert_eq!(high.len(), MAX_COLORS);
    }

    #[test]
    fn seed_is_normalized() {
        let mut rng = Xorshift64::new(2);
        let p = generate_palette("ABCDEF", 3, PaletteStyle::Balanced, &mut rng).unwrap();
        assert_eq!(p[0], "#abcdef");
    }

    #[test]
    fn invalid_seed_is_rejected() {
        let mut rng = Xorshift64::new(2);
        let err = generate_palette("#12345", 3, PaletteStyle::Balanced, &mut rng).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn style_lookup() {
        for style in PaletteStyle::ALL {
            assert_eq!(PaletteStyle::from_name(style.name()), Some(style));
        }
        assert_eq!(PaletteStyle::from_name(" Analogous "), Some(PaletteStyle::Analogous));
        assert_eq!(PaletteStyle::from_name("neon"), None);
        assert_eq!(PaletteStyle::resolve("neon"), PaletteStyle::Balanced);
    }

    #[test]
    fn style_serializes_lowercase() {
        let json = serde_json::to_string(&PaletteStyle::Monochromatic).unwrap();
        assert_eq!(json, "\"monochromatic\"");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn palette_size_and_uniqueness(
                r in 0u8..=255, g in 0u8..=255, b in 0u8..=255,
                count in 0usize..20,
                style_idx in 0usize..4,
                seed in any::<u64>(),
            ) {
                let hex = Rgb::new(r, g, b).to_hex();
                let style = PaletteStyle::ALL[style_idx];
                let mut rng = Xorshift64::new(seed);
                let p = generate_palette(&hex, count, style, &mut rng).unwrap();
                let expected = count.clamp(MIN_COLORS, MAX_COLORS);
                prop_assert_eq!(p.len(), expected);
                prop_assert_eq!(&p[0], &hex);
                let unique: HashSet<_> = p.iter().collect();
                prop_assert_eq!(unique.len(), expected);
            }
        }
    }
}
