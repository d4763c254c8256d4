//! Emotion lookup for colors.
//!
//! A k=3 distance-weighted k-NN classifier over a small labeled dataset gives
//! the primary emotion; per-culture classifiers give the cultural variations.
//! A separate perceptually weighted distance picks the single nearest record
//! whose emotion list is reported.

pub mod dataset;
pub mod knn;

use crate::color::Rgb;
use crate::error::ColorError;
use dataset::{EmotionRecord, RECORDS};
use knn::KnnClassifier;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub use knn::Prediction;

/// Neighbors consulted per prediction.
pub const K_NEIGHBORS: usize = 3;
/// A culture needs this many records to get its own classifier.
pub const MIN_CULTURE_RECORDS: usize = 3;

const MAX_SIMILAR_COLORS: usize = 5;
const MAX_CONTRASTING_EMOTIONS: usize = 3;

/// Channel weights of [`weighted_distance`].
const DISTANCE_WEIGHTS: [f64; 3] = [0.30, 0.59, 0.11];

/// `sqrt((0.30 dR)^2 + (0.59 dG)^2 + (0.11 dB)^2)` on 0-255 channels.
pub fn weighted_distance(a: Rgb, b: Rgb) -> f64 {
    let deltas = [
        a.r as f64 - b.r as f64,
        a.g as f64 - b.g as f64,
        a.b as f64 - b.b as f64,
    ];
    deltas
        .iter()
        .zip(DISTANCE_WEIGHTS)
        .map(|(d, w)| (w * d).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Everything known about the emotional reading of one color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionAnalysis {
    pub color: Rgb,
    pub primary_emotion: &'static str,
    pub emotion_confidence: f64,
    /// Emotion words of the nearest record.
    pub emotions: Vec<&'static str>,
    pub nearest_color: Rgb,
    pub distance: f64,
    pub cultural_variations: BTreeMap<&'static str, &'static str>,
    pub similar_colors: Vec<String>,
    pub contrasting_emotions: Vec<&'static str>,
}

/// Global and per-culture classifiers over a record set.
#[derive(Debug, Clone)]
pub struct EmotionClassifier {
    records: &'static [EmotionRecord],
    global: KnnClassifier,
    cultures: BTreeMap<&'static str, KnnClassifier>,
}

impl EmotionClassifier {
    /// Builds classifiers over the built-in dataset.
    pub fn new() -> Self {
        Self::from_records(RECORDS).expect("built-in emotion dataset is non-empty")
    }

    /// Process-wide classifier, built on first use.
    pub fn global() -> &'static EmotionClassifier {
        static CLASSIFIER: OnceLock<EmotionClassifier> = OnceLock::new();
        CLASSIFIER.get_or_init(EmotionClassifier::new)
    }

    /// Builds classifiers over `records`. Fails if `records` is empty.
    pub fn from_records(records: &'static [EmotionRecord]) -> Result<Self, ColorError> {
        let global = KnnClassifier::fit(
            records.iter().map(|r| (r.color, r.primary_emotion)),
            K_NEIGHBORS,
        )?;

        let mut grouped: BTreeMap<&'static str, Vec<&EmotionRecord>> = BTreeMap::new();
        for r in records {
            grouped.entry(r.culture).or_default().push(r);
        }
        let mut cultures = BTreeMap::new();
        for (culture, members) in grouped {
            if members.len() < MIN_CULTURE_RECORDS {
                log::debug!(
                    "skipping culture '{culture}': {} records, need {MIN_CULTURE_RECORDS}",
                    members.len()
                );
                continue;
            }
            let knn = KnnClassifier::fit(
                members.iter().map(|r| (r.color, r.primary_emotion)),
                K_NEIGHBORS,
            )?;
            cultures.insert(culture, knn);
        }

        log::debug!(
            "emotion classifier built: {} records, cultures {:?}",
            records.len(),
            cultures.keys().collect::<Vec<_>>()
        );
        Ok(Self {
            records,
            global,
            cultures,
        })
    }

    pub fn records(&self) -> &'static [EmotionRecord] {
        self.records
    }

    /// Cultures that have their own classifier, sorted.
    pub fn cultures(&self) -> Vec<&'static str> {
        self.cultures.keys().copied().collect()
    }

    pub fn predict(&self, color: Rgb) -> Prediction {
        self.global.predict(color)
    }

    /// Prediction per culture, keyed and sorted by culture name.
    pub fn cultural_variations(&self, color: Rgb) -> BTreeMap<&'static str, &'static str> {
        self.cultures
            .iter()
            .map(|(culture, knn)| (*culture, knn.predict(color).label))
            .collect()
    }

    /// Record with the smallest [`weighted_distance`]; the first wins ties.
    pub fn nearest_record(&self, color: Rgb) -> (&'static EmotionRecord, f64) {
        let records: &'static [EmotionRecord] = self.records;
        let mut best = (&records[0], f64::INFINITY);
        for r in records {
            let d = weighted_distance(color, r.color);
            if d < best.1 {
                best = (r, d);
            }
        }
        best
    }

    /// Full emotional reading of `color`.
    pub fn analyze(&self, color: Rgb) -> EmotionAnalysis {
        let prediction = self.predict(color);
        let (nearest, distance) = self.nearest_record(color);

        let query_hex = color.to_hex();
        let mut similar_colors: Vec<String> = Vec::new();
        for r in self.records {
            if similar_colors.len() == MAX_SIMILAR_COLORS {
                break;
            }
            if r.primary_emotion != prediction.label {
                continue;
            }
            let hex = r.color.to_hex();
            if hex != query_hex && !similar_colors.contains(&hex) {
                similar_colors.push(hex);
            }
        }

        let mut contrasting_emotions: Vec<&'static str> = self
            .records
            .iter()
            .map(|r| r.primary_emotion)
            .filter(|e| *e != prediction.label)
            .collect();
        contrasting_emotions.sort_unstable();
        contrasting_emotions.dedup();
        contrasting_emotions.truncate(MAX_CONTRASTING_EMOTIONS);

        EmotionAnalysis {
            color,
            primary_emotion: prediction.label,
            emotion_confidence: prediction.confidence,
            emotions: nearest.emotions.to_vec(),
            nearest_color: nearest.color,
            distance,
            cultural_variations: self.cultural_variations(color),
            similar_colors,
            contrasting_emotions,
        }
    }

    /// Primary emotion -> hexes carrying it, optionally for one culture.
    pub fn emotion_map(
        &self,
        culture: Option<&str>,
    ) -> Result<BTreeMap<&'static str, Vec<String>>, ColorError> {
        let culture = match culture {
            Some(c) => {
                let wanted = c.trim().to_ascii_lowercase();
                let known = self
                    .records
                    .iter()
                    .map(|r| r.culture)
                    .find(|known| *known == wanted)
                    .ok_or_else(|| ColorError::InvalidCulture(c.to_string()))?;
                Some(known)
            }
            None => None,
        };

        let mut map: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for r in self.records {
            if culture.is_some_and(|c| c != r.culture) {
                continue;
            }
            let hexes = map.entry(r.primary_emotion).or_default();
            let hex = r.color.to_hex();
            if !hexes.contains(&hex) {
                hexes.push(hex);
            }
        }
        Ok(map)
    }
}

impl Default for EmotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// [`EmotionClassifier::analyze`] on the process-wide classifier.
pub fn analyze(color: Rgb) -> EmotionAnalysis {
    EmotionClassifier::global().analyze(color)
}

/// [`EmotionClassifier::emotion_map`] on the process-wide classifier.
pub fn emotion_map(
    culture: Option<&str>,
) -> Result<BTreeMap<&'static str, Vec<String>>, ColorError> {
    EmotionClassifier::global().emotion_map(culture)
}
