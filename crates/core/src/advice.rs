//! Markdown color advice assembled from templates.
//!
//! Every random choice (template, attribute words, use-case order) goes
//! through the writer's [`Xorshift64`], so one seed always produces the same
//! text.

use crate::accessibility::{AccessibilityReport, ColorBlindness, ColorTemperature, ContrastLevel};
use crate::color::{rgb_to_cmyk, rgb_to_hsl, rgb_to_hsv, rgb_to_lab, Rgb};
use crate::error::ColorError;
use crate::harmony::Harmony;
use crate::naming::describe;
use crate::prng::Xorshift64;
use std::fmt::Write as _;

const INTROS: &[&str] = &[
    "Oh, I really like `{color}`! It's a {name} that feels {attr1} and {attr2}.",
    "Nice choice with `{color}`! This {name} gives off a {attr1}, {attr2} vibe.",
    "That's a beautiful `{color}`! As a {name}, it has a {attr1} quality with hints of {attr2}.",
    "I see you've picked `{color}`. This {name} is quite {attr1} and {attr2}.",
    "Interesting selection with `{color}`! This {name} tends to feel {attr1} with a touch of {attr2}.",
    "Ah, `{color}`! I love this {name}, it's so {attr1} and {attr2}.",
    "Great eye for color! `{color}` is a {name} that brings {attr1} and {attr2} feelings.",
    "`{color}` is a wonderful choice. This {name} creates a {attr1} and {attr2} atmosphere.",
    "I'm drawn to your choice of `{color}`. This {name} has a {attr1}, {attr2} character.",
    "You've selected `{color}`, a {name} that's known for being {attr1} and {attr2}.",
];

const HARMONY_INTROS: &[&str] = &[
    "Here are some colors that would pair nicely with it:",
    "If you're building a palette, consider these combinations:",
    "For a balanced design, you might want to try these pairings:",
    "These colors would complement your selection beautifully:",
    "When designing with this color, these harmonies work well:",
    "To create a cohesive look, try these color combinations:",
    "For your design palette, consider these harmonious options:",
    "These color pairings would enhance your selected shade:",
    "To expand your color scheme, these combinations are worth exploring:",
    "If you're looking for matching colors, these would work wonderfully:",
];

const ACCESSIBILITY_INTROS: &[&str] = &[
    "From an accessibility standpoint:",
    "When thinking about readability and accessibility:",
    "For ensuring your design is accessible to everyone:",
    "Regarding contrast and readability:",
    "Looking at the accessibility aspects:",
    "For inclusive design considerations:",
    "Thinking about how everyone will experience this color:",
    "From a universal design perspective:",
    "For optimal visibility and accessibility:",
    "When considering users with different visual abilities:",
];

const USAGE_INTROS: &[&str] = &[
    "This color would work beautifully for:",
    "I'd recommend using this color for:",
    "This shade would be perfect for:",
    "Some great applications for this color include:",
    "You might consider using this color for:",
    "This color would shine when used for:",
    "Based on its properties, this color is ideal for:",
    "This color would be most effective when used for:",
    "Consider applying this color to:",
    "This color would excel when used in:",
];

const CLOSINGS: &[&str] = &[
    "Would you like me to suggest a complete palette based on this color?",
    "Need any specific advice on how to use this in your design?",
    "Anything specific you'd like to know about working with this color?",
    "Would you like to explore more colors that would work with this one?",
    "Is there a particular design challenge you're trying to solve with this color?",
    "Would you like to see how this color might look in different lighting conditions?",
    "Are you considering this for a specific project?",
    "Would you like to see some design examples using this color?",
    "Is there a specific mood you're trying to create with this color?",
    "Would you like to explore similar colors in this family?",
];

/// Use-case group: suggested when any trigger word is among the attributes.
struct UseCaseGroup {
    triggers: &'static [&'static str],
    uses: &'static [&'static str],
}

const USE_CASE_GROUPS: &[UseCaseGroup] = &[
    UseCaseGroup {
        triggers: &["energetic", "attention-grabbing", "bold"],
        uses: &["call-to-action buttons", "promotional materials", "sale banners"],
    },
    UseCaseGroup {
        triggers: &["calm", "trustworthy", "reliable"],
        uses: &["financial applications", "healthcare interfaces", "professional services"],
    },
    UseCaseGroup {
        triggers: &["professional", "formal", "sophisticated"],
        uses: &["business websites", "corporate branding", "formal documentation"],
    },
    UseCaseGroup {
        triggers: &["fresh", "natural", "balanced"],
        uses: &["eco-friendly products", "wellness applications", "organic food branding"],
    },
    UseCaseGroup {
        triggers: &["creative", "innovative", "imaginative"],
        uses: &["art portfolios", "creative agency branding", "design tool interfaces"],
    },
    UseCaseGroup {
        triggers: &["playful", "cheerful", "sunny"],
        uses: &["children's products", "entertainment apps", "casual game interfaces"],
    },
];

const READABLE_USES: &[&str] = &["text elements", "navigation components", "important UI elements"];
const DECORATIVE_USES: &[&str] = &["decorative elements", "background accents", "subtle patterns"];

const GENERIC_USES: &[&str] = &[
    "secondary branding elements",
    "accent colors",
    "background gradients",
    "infographic elements",
    "social media graphics",
    "digital illustrations",
    "product packaging",
    "email marketing",
    "mobile app interfaces",
    "data visualization",
];

pub const USE_CASE_COUNT: usize = 3;

/// Harmonies listed in the advice table, in display order.
const ADVICE_HARMONIES: [Harmony; 7] = [
    Harmony::Complementary,
    Harmony::Analogous,
    Harmony::Triadic,
    Harmony::SplitComplementary,
    Harmony::Tetradic,
    Harmony::Square,
    Harmony::Monochromatic,
];

/// Picks exactly three use cases for a color.
///
/// Attribute-triggered groups and one contrast-driven group are pooled,
/// deduplicated and shuffled; generic suggestions top up a short pool.
pub fn use_cases(
    attributes: &[&str],
    level: ContrastLevel,
    rng: &mut Xorshift64,
) -> Vec<&'static str> {
    let mut pool: Vec<&'static str> = Vec::new();
    let mut add = |uses: &[&'static str]| {
        for u in uses {
            if !pool.contains(u) {
                pool.push(*u);
            }
        }
    };

    for group in USE_CASE_GROUPS {
        if group.triggers.iter().any(|t| attributes.contains(t)) {
            add(group.uses);
        }
    }
    add(if level.is_readable() {
        READABLE_USES
    } else {
        DECORATIVE_USES
    });

    rng.shuffle(&mut pool);
    if pool.len() < USE_CASE_COUNT {
        let mut generic = GENERIC_USES.to_vec();
        rng.shuffle(&mut generic);
        for g in generic {
            if pool.len() == USE_CASE_COUNT {
                break;
            }
            if !pool.contains(&g) {
                pool.push(g);
            }
        }
    }
    pool.truncate(USE_CASE_COUNT);
    pool
}

fn fill_intro(template: &str, color: &str, name: &str, attr1: &str, attr2: &str) -> String {
    template
        .replace("{color}", color)
        .replace("{name}", name)
        .replace("{attr1}", attr1)
        .replace("{attr2}", attr2)
}

fn code_list(hexes: &[String]) -> String {
    hexes
        .iter()
        .map(|h| format!("`{h}`"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Writes Markdown advice for a color.
#[derive(Debug, Clone)]
pub struct AdviceWriter {
    rng: Xorshift64,
}

impl AdviceWriter {
    pub fn new(rng: Xorshift64) -> Self {
        Self { rng }
    }

    /// Generates the advice text for `hex`.
    ///
    /// Fails with [`ColorError::InvalidColor`] if `hex` is not a hex color.
    pub fn write(&mut self, hex: &str) -> Result<String, ColorError> {
        let color = Rgb::from_hex(hex)?;
        let hex = color.to_hex();
        let hsl = rgb_to_hsl(color);
        let description = describe(hsl);
        let report = AccessibilityReport::analyze(color);

        let attr1 = self.rng.pick(description.attributes);
        let others: Vec<&str> = description
            .attributes
            .iter()
            .copied()
            .filter(|a| *a != attr1)
            .collect();
        let attr2 = self.rng.choose(&others).copied().unwrap_or(attr1);
        let intro = fill_intro(
            self.rng.pick(INTROS),
            &hex,
            &description.name,
            attr1,
            attr2,
        );
        let harmony_intro = self.rng.pick(HARMONY_INTROS);
        let accessibility_intro = self.rng.pick(ACCESSIBILITY_INTROS);
        let usage_intro = self.rng.pick(USAGE_INTROS);
        let closing = self.rng.pick(CLOSINGS);
        let uses = use_cases(description.attributes, report.level, &mut self.rng);

        let mut out = String::new();
        self.render(
            &mut out,
            color,
            &intro,
            harmony_intro,
            accessibility_intro,
            &report,
        )
        .map_err(|e| ColorError::Internal(format!("advice formatting failed: {e}")))?;

        out.push_str(usage_intro);
        out.push('\n');
        for u in &uses {
            out.push_str("- ");
            out.push_str(u);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(closing);
        Ok(out)
    }

    fn render(
        &self,
        out: &mut String,
        color: Rgb,
        intro: &str,
        harmony_intro: &str,
        accessibility_intro: &str,
        report: &AccessibilityReport,
    ) -> std::fmt::Result {
        let hsl = rgb_to_hsl(color);
        let hsv = rgb_to_hsv(color);
        let cmyk = rgb_to_cmyk(color);
        let lab = rgb_to_lab(color);

        writeln!(out, "{intro}\n")?;

        writeln!(out, "| Format | Value |")?;
        writeln!(out, "|--------|-------|")?;
        writeln!(out, "| HEX | `{color}` |")?;
        writeln!(out, "| RGB | rgb({}, {}, {}) |", color.r, color.g, color.b)?;
        writeln!(out, "| HSL | hsl({:.0}, {:.0}%, {:.0}%) |", hsl.h, hsl.s, hsl.l)?;
        writeln!(out, "| HSV | hsv({:.0}, {:.0}%, {:.0}%) |", hsv.h, hsv.s, hsv.v)?;
        writeln!(
            out,
            "| CMYK | cmyk({:.0}%, {:.0}%, {:.0}%, {:.0}%) |",
            cmyk.c, cmyk.m, cmyk.y, cmyk.k
        )?;
        writeln!(out, "| LAB | lab({:.2}, {:.2}, {:.2}) |\n", lab.l, lab.a, lab.b)?;

        writeln!(out, "{harmony_intro}\n")?;
        writeln!(out, "| Harmony Type | Colors |")?;
        writeln!(out, "|-------------|--------|")?;
        for harmony in ADVICE_HARMONIES {
            writeln!(
                out,
                "| {} | {} |",
                harmony.title(),
                code_list(&harmony.hexes(color))
            )?;
        }
        writeln!(out)?;

        writeln!(out, "{accessibility_intro}\n")?;
        writeln!(out, "| Accessibility | Details |")?;
        writeln!(out, "|--------------|---------|")?;
        writeln!(out, "| Best text color | {} |", report.best_text.label())?;
        writeln!(out, "| Contrast with white | {:.1}:1 |", report.contrast_with_white)?;
        writeln!(out, "| Contrast with black | {:.1}:1 |", report.contrast_with_black)?;
        writeln!(
            out,
            "| Contrast ratio | {:.1}:1 ({}) |",
            report.ratio,
            report.level.label()
        )?;
        writeln!(out, "| WCAG compliance | {} |\n", report.level.wcag())?;

        writeln!(out, "| Color Vision | Appears As |")?;
        writeln!(out, "|--------------|------------|")?;
        for kind in ColorBlindness::ALL {
            writeln!(out, "| {} | `{}` |", kind.title(), kind.simulate(color))?;
        }
        writeln!(out)?;

        let temperature = ColorTemperature::estimate(color);
        writeln!(
            out,
            "Color temperature: roughly {:.0}K, which reads as {}.\n",
            temperature.kelvin,
            temperature.class.label()
        )?;
        Ok(())
    }
}

/// One-shot helper: advice for `hex` using a fork of `rng`.
pub fn generate_advice(hex: &str, rng: &mut Xorshift64) -> Result<String, ColorError> {
    AdviceWriter::new(rng.fork()).write(hex)
}
