//! Request dispatch and endpoint handlers.
//!
//! [`handle`] maps a method, URL and body to a status code and JSON body
//! without touching the network, so every endpoint is testable in-process.
//! Routes answer both at `/<name>` and under the `/api/py` prefix.

use crate::cache::AdviceCache;
use crate::config::ServerConfig;
use crate::params::{param_opt_str, param_string, param_usize, parse_body};
use color_advisor_core::emotion::EmotionAnalysis;
use color_advisor_core::palette::DEFAULT_COLORS;
use color_advisor_core::{
    normalize_hex, AdviceWriter, EmotionClassifier, PaletteGenerator, PaletteStyle, Rgb,
    Xorshift64,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

const API_PREFIX: &str = "/api/py";

const FEATURES: &[&str] = &[
    "color-advice",
    "generate-palette",
    "color-emotion",
    "color-emotion-map",
    "advanced-color",
];

/// Shared state of all worker threads.
pub struct AppState {
    pub config: ServerConfig,
    pub cache: AdviceCache,
    rng: Mutex<Xorshift64>,
    classifier: &'static EmotionClassifier,
    palettes: PaletteGenerator,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => Xorshift64::new(seed),
            None => Xorshift64::from_time(),
        };
        Self {
            cache: AdviceCache::new(config.cache_advice),
            config,
            rng: Mutex::new(rng),
            classifier: EmotionClassifier::global(),
            palettes: PaletteGenerator::default(),
        }
    }

    /// Fresh generator for one request.
    fn request_rng(&self) -> Xorshift64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fork()
    }
}

/// Status code and JSON body. A `Null` body is sent as an empty response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                log::error!("failed to serialize response: {e}");
                Self::detail(500, format!("Internal Server Error: {e}"))
            }
        }
    }

    fn detail(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "detail": detail.into() }),
        }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Health,
    ColorAdvice,
    GeneratePalette,
    ColorEmotion,
    ColorEmotionMap,
    AdvancedColor,
}

impl Route {
    fn from_path(path: &str) -> Option<Route> {
        match path {
            "/health" => Some(Route::Health),
            "/color-advice" => Some(Route::ColorAdvice),
            "/generate-palette" => Some(Route::GeneratePalette),
            "/color-emotion" => Some(Route::ColorEmotion),
            "/color-emotion-map" => Some(Route::ColorEmotionMap),
            "/advanced-color" => Some(Route::AdvancedColor),
            _ => None,
        }
    }

    fn method(self) -> &'static str {
        match self {
            Route::Health => "GET",
            _ => "POST",
        }
    }
}

/// Drops the query string, the `/api/py` prefix and any trailing slash.
fn normalize_path(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = match path.strip_prefix(API_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Dispatches one request.
pub fn handle(state: &AppState, method: &str, url: &str, body: &str) -> Reply {
    let Some(route) = Route::from_path(normalize_path(url)) else {
        return Reply::detail(404, "Not Found");
    };
    if method.eq_ignore_ascii_case("OPTIONS") {
        return Reply::no_content();
    }
    if !method.eq_ignore_ascii_case(route.method()) {
        return Reply::detail(405, "Method Not Allowed");
    }

    match route {
        Route::Health => health(state),
        Route::ColorAdvice => color_advice(state, body),
        Route::GeneratePalette => generate_palette(state, body),
        Route::ColorEmotion => color_emotion(state, body),
        Route::ColorEmotionMap => color_emotion_map(state, body),
        Route::AdvancedColor => advanced_color(state, body),
    }
}

/// Parses the body and returns it with the normalized hex in `field`.
fn read_color(body: &str, field: &str) -> Result<(Value, String), String> {
    let params = parse_body(body).map_err(|e| format!("invalid JSON body: {e}"))?;
    let raw = param_opt_str(&params, field).ok_or_else(|| format!("missing field '{field}'"))?;
    let hex = normalize_hex(raw).map_err(|e| e.to_string())?;
    Ok((params, hex))
}

fn health(state: &AppState) -> Reply {
    Reply::ok(&json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "features": FEATURES,
        "advice_cache": state.cache.is_enabled(),
    }))
}

// -- /color-advice --

fn color_advice(state: &AppState, body: &str) -> Reply {
    let hex = match read_color(body, "color") {
        Ok((_, hex)) => hex,
        Err(msg) => {
            log::warn!("color-advice rejected: {msg}");
            return Reply::detail(500, format!("Error generating color advice: {msg}"));
        }
    };

    if let Some(advice) = state.cache.get(&hex) {
        log::debug!("advice cache hit for {hex} ({} entries)", state.cache.len());
        return Reply::ok(&json!({ "advice": advice }));
    }

    match AdviceWriter::new(state.request_rng()).write(&hex) {
        Ok(advice) => {
            state.cache.insert(hex, advice.clone());
            Reply::ok(&json!({ "advice": advice }))
        }
        Err(e) => {
            log::error!("advice generation failed for {hex}: {e}");
            Reply::detail(500, format!("Error generating color advice: {e}"))
        }
    }
}

// -- /generate-palette --

#[derive(Debug, Serialize)]
struct PaletteResponse {
    palette: Vec<String>,
    seed_color: String,
    style: &'static str,
    error: bool,
    message: String,
}

fn generate_palette(state: &AppState, body: &str) -> Reply {
    let requested_style = parse_body(body)
        .map(|p| param_string(&p, "style", PaletteStyle::Balanced.name()))
        .unwrap_or_else(|_| PaletteStyle::Balanced.name().to_string());
    let style = PaletteStyle::resolve(&requested_style);

    let (params, seed_color) = match read_color(body, "seed_color") {
        Ok(parsed) => parsed,
        Err(msg) => {
            log::warn!("generate-palette rejected: {msg}");
            return Reply::ok(&PaletteResponse {
                palette: Vec::new(),
                seed_color: parse_body(body)
                    .ok()
                    .and_then(|p| param_opt_str(&p, "seed_color").map(String::from))
                    .unwrap_or_default(),
                style: style.name(),
                error: true,
                message: msg,
            });
        }
    };

    let count = param_usize(&params, "count", DEFAULT_COLORS);
    let mut rng = state.request_rng();
    match state.palettes.generate(&seed_color, count, style, &mut rng) {
        Ok(palette) => {
            let message = if style.name() == requested_style.trim().to_ascii_lowercase() {
                String::new()
            } else {
                format!("unknown style '{requested_style}', using {}", style.name())
            };
            Reply::ok(&PaletteResponse {
                palette,
                seed_color,
                style: style.name(),
                error: false,
                message,
            })
        }
        Err(e) => {
            log::warn!("generate-palette failed: {e}");
            Reply::ok(&PaletteResponse {
                palette: Vec::new(),
                seed_color,
                style: style.name(),
                error: true,
                message: e.to_string(),
            })
        }
    }
}

// -- /color-emotion --

#[derive(Debug, Serialize)]
struct EmotionResponse {
    #[serde(flatten)]
    analysis: Option<EmotionAnalysis>,
    error: bool,
    message: String,
}

fn color_emotion(state: &AppState, body: &str) -> Reply {
    match read_color(body, "color").and_then(|(_, hex)| parse_rgb(&hex)) {
        Ok(rgb) => Reply::ok(&EmotionResponse {
            analysis: Some(state.classifier.analyze(rgb)),
            error: false,
            message: String::new(),
        }),
        Err(msg) => {
            log::warn!("color-emotion rejected: {msg}");
            Reply::ok(&EmotionResponse {
                analysis: None,
                error: true,
                message: msg,
            })
        }
    }
}

fn parse_rgb(hex: &str) -> Result<Rgb, String> {
    Rgb::from_hex(hex).map_err(|e| e.to_string())
}

// -- /color-emotion-map --

#[derive(Debug, Default, Serialize)]
struct EmotionMapResponse {
    color: String,
    primary_emotion: &'static str,
    cultural_variations: BTreeMap<&'static str, &'static str>,
    emotion_map: BTreeMap<&'static str, Vec<String>>,
    error: bool,
    message: String,
}

fn color_emotion_map(state: &AppState, body: &str) -> Reply {
    let result = read_color(body, "color").and_then(|(params, hex)| {
        let rgb = parse_rgb(&hex)?;
        let culture = param_opt_str(&params, "culture");
        let emotion_map = state
            .classifier
            .emotion_map(culture)
            .map_err(|e| e.to_string())?;
        let cultural_variations = state.classifier.cultural_variations(rgb);
        let primary_emotion = culture
            .and_then(|c| cultural_variations.get(c.trim().to_ascii_lowercase().as_str()))
            .copied()
            .unwrap_or_else(|| state.classifier.predict(rgb).label);
        Ok(EmotionMapResponse {
            color: hex,
            primary_emotion,
            cultural_variations,
            emotion_map,
            error: false,
            message: String::new(),
        })
    });

    match result {
        Ok(response) => Reply::ok(&response),
        Err(msg) => {
            log::warn!("color-emotion-map rejected: {msg}");
            Reply::ok(&EmotionMapResponse {
                error: true,
                message: msg,
                ..EmotionMapResponse::default()
            })
        }
    }
}

// -- /advanced-color --

#[derive(Debug, Default, Serialize)]
struct AdvancedColorResponse {
    palette: Vec<String>,
    emotions: Vec<&'static str>,
    primary_emotion: &'static str,
    emotion_confidence: f64,
    cultural_variations: BTreeMap<&'static str, &'static str>,
    similar_colors: Vec<String>,
    contrasting_emotions: Vec<&'static str>,
    error: bool,
    message: String,
}

fn advanced_color(state: &AppState, body: &str) -> Reply {
    let result = read_color(body, "color").and_then(|(_, hex)| {
        let rgb = parse_rgb(&hex)?;
        let mut rng = state.request_rng();
        let palette = state
            .palettes
            .generate(&hex, DEFAULT_COLORS, PaletteStyle::Balanced, &mut rng)
            .map_err(|e| e.to_string())?;
        let analysis = state.classifier.analyze(rgb);
        Ok(AdvancedColorResponse {
            palette,
            emotions: analysis.emotions,
            primary_emotion: analysis.primary_emotion,
            emotion_confidence: analysis.emotion_confidence,
            cultural_variations: analysis.cultural_variations,
            similar_colors: analysis.similar_colors,
            contrasting_emotions: analysis.contrasting_emotions,
            error: false,
            message: String::new(),
        })
    });

    match result {
        Ok(response) => Reply::ok(&response),
        Err(msg) => {
            log::warn!("advanced-color rejected: {msg}");
            Reply::ok(&AdvancedColorResponse {
                error: true,
                message: msg,
                ..AdvancedColorResponse::default()
            })
        }
    }
}
