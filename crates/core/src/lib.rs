#![deny(unsafe_code)]
//! Core color math for the color advisor.
//!
//! Provides the `Rgb`/`Hsl`/`Hsv`/`Cmyk`/`Lab` conversions, color naming,
//! harmonies, the style-driven `PaletteGenerator`, WCAG contrast and
//! color-vision helpers, the k-NN `EmotionClassifier`, the Markdown
//! `AdviceWriter`, and the `Xorshift64` PRNG behind every random choice.

pub mod accessibility;
pub mod advice;
pub mod color;
pub mod emotion;
pub mod error;
pub mod harmony;
pub mod naming;
pub mod palette;
pub mod prng;

pub use accessibility::{
    best_text_color, contrast_ratio, relative_luminance, AccessibilityReport, ColorBlindness,
    ColorTemperature, ContrastIssue, ContrastLevel, TemperatureClass, TextColor,
    MIN_TEXT_CONTRAST,
};
pub use advice::{generate_advice, use_cases, AdviceWriter};
pub use color::{normalize_hex, Cmyk, Hsl, Hsv, Lab, Rgb};
pub use emotion::{EmotionAnalysis, EmotionClassifier, Prediction};
pub use error::ColorError;
pub use harmony::Harmony;
pub use naming::{describe, ColorDescription};
pub use palette::{generate_palette, shades, tints, PaletteGenerator, PaletteStyle};
pub use prng::Xorshift64;
