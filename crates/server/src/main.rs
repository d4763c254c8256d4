#![deny(unsafe_code)]
//! CLI binary for the color advisor.
//!
//! Subcommands:
//! - `serve` runs the JSON HTTP API
//! - `advice <color>` prints Markdown advice for one color
//! - `palette <color>` prints a generated palette
//! - `emotion <color>` prints the emotional reading of a color
//! - `contrast <fg> <bg>` checks a text/background pair, including under
//!   simulated color blindness
//! - `tones <color>` prints tints and shades
//! - `list` prints palette styles, harmonies and cultures

mod cache;
mod config;
mod error;
mod params;
mod routes;
mod server;

use clap::{Parser, Subcommand};
use color_advisor_core::palette::DEFAULT_COLORS;
use color_advisor_core::{
    contrast_ratio, normalize_hex, shades, tints, AdviceWriter, ColorBlindness, ContrastLevel,
    EmotionClassifier, Harmony, PaletteGenerator, PaletteStyle, Rgb, Xorshift64,
    MIN_TEXT_CONTRAST,
};
use config::ServeArgs;
use error::CliError;
use std::process;

#[derive(Parser)]
#[command(name = "color-advisor", version, about = "Color advice, palettes and emotions")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Print Markdown advice for a color.
    Advice {
        /// Hex color, with or without '#'.
        color: String,

        /// PRNG seed for reproducible text.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Generate a palette from a seed color.
    Palette {
        /// Seed hex color.
        color: String,

        /// Number of colors (clamped to 2..=10).
        #[arg(short, long, default_value_t = DEFAULT_COLORS)]
        count: usize,

        /// Palette style (balanced, monochromatic, analogous, complementary).
        #[arg(short, long, default_value = "balanced")]
        style: String,

        /// PRNG seed for deterministic output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Classify the emotion of a color.
    Emotion {
        /// Hex color.
        color: String,
    },
    /// Check text on a background, also under simulated color blindness.
    Contrast {
        /// Text color.
        foreground: String,

        /// Background color.
        background: String,

        /// Minimum acceptable contrast ratio.
        #[arg(long, default_value_t = MIN_TEXT_CONTRAST)]
        min: f64,
    },
    /// Print tints (toward white) and shades (toward black) of a color.
    Tones {
        /// Hex color.
        color: String,

        /// Steps in each direction.
        #[arg(short, long, default_value_t = DEFAULT_COLORS)]
        count: usize,
    },
    /// List palette styles, harmonies and cultures.
    List,
}

fn rng_from(seed: Option<u64>) -> Xorshift64 {
    seed.map(Xorshift64::new)
        .unwrap_or_else(Xorshift64::from_time)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Serve(args) => server::run(args.into())?,
        Command::Advice { color, seed } => {
            let hex = normalize_hex(&color)?;
            let advice = AdviceWriter::new(rng_from(seed)).write(&hex)?;
            if cli.json {
                let info = serde_json::json!({ "color": hex, "advice": advice });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{advice}");
            }
        }
        Command::Palette {
            color,
            count,
            style,
            seed,
        } => {
            let style = PaletteStyle::from_name(&style).ok_or_else(|| {
                let known: Vec<&str> = PaletteStyle::ALL.iter().map(|s| s.name()).collect();
                CliError::Input(format!(
                    "unknown palette style '{style}' (expected one of: {})",
                    known.join(", ")
                ))
            })?;
            let palette =
                PaletteGenerator::default().generate(&color, count, style, &mut rng_from(seed))?;
            if cli.json {
                let info = serde_json::json!({
                    "seed_color": palette.first(),
                    "style": style.name(),
                    "palette": palette,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for hex in &palette {
                    println!("{hex}");
                }
            }
        }
        Command::Emotion { color } => {
            let rgb = Rgb::from_hex(&color)?;
            let analysis = EmotionClassifier::global().analyze(rgb);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!(
                    "{}: {} ({:.0}% confidence)",
                    analysis.color,
                    analysis.primary_emotion,
                    analysis.emotion_confidence * 100.0
                );
                println!("  emotions: {}", analysis.emotions.join(", "));
                for (culture, emotion) in &analysis.cultural_variations {
                    println!("  {culture}: {emotion}");
                }
                if !analysis.similar_colors.is_empty() {
                    println!("  similar: {}", analysis.similar_colors.join(" "));
                }
            }
        }
        Command::Contrast {
            foreground,
            background,
            min,
        } => {
            let fg = Rgb::from_hex(&foreground)?;
            let bg = Rgb::from_hex(&background)?;
            let ratio = contrast_ratio(fg, bg);
            let issues = ColorBlindness::pair_issues(fg, bg, min);
            if cli.json {
                let info = serde_json::json!({
                    "foreground": fg,
                    "background": bg,
                    "contrast": ratio,
                    "level": ContrastLevel::from_ratio(ratio),
                    "accessible": issues.is_empty(),
                    "issues": issues.iter().map(|i| i.message()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!(
                    "{fg} on {bg}: {ratio:.2}:1 ({})",
                    ContrastLevel::from_ratio(ratio).label()
                );
                for issue in &issues {
                    println!("  {} ({:.2}:1)", issue.message(), issue.contrast);
                }
            }
        }
        Command::Tones { color, count } => {
            let light = tints(&color, count)?;
            let dark = shades(&color, count)?;
            if cli.json {
                let info = serde_json::json!({
                    "color": normalize_hex(&color)?,
                    "tints": light,
                    "shades": dark,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("tints:  {}", light.join(" "));
                println!("shades: {}", dark.join(" "));
            }
        }
        Command::List => {
            let styles: Vec<&str> = PaletteStyle::ALL.iter().map(|s| s.name()).collect();
            let cultures = EmotionClassifier::global().cultures();
            if cli.json {
                let harmonies: Vec<_> = Harmony::ALL
                    .iter()
                    .map(|h| serde_json::json!({ "name": h.name(), "description": h.description() }))
                    .collect();
                let info = serde_json::json!({
                    "styles": styles,
                    "harmonies": harmonies,
                    "cultures": cultures,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palette styles:");
                println!("  {}", styles.join(", "));
                println!("Harmonies:");
                for h in Harmony::ALL {
                    println!("  {:<20} {}", h.name(), h.description());
                }
                println!("Cultures:");
                println!("  {}", cultures.join(", "));
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            log::error!("{e}");
        }
        process::exit(e.exit_code());
    }
}
