//! Labeled color/emotion pairs used to train the classifiers.
//!
//! Several colors appear once per culture with different meanings; red is
//! excitement in the western set and luck in the eastern set.

use crate::color::Rgb;
use serde::Serialize;

pub const WESTERN: &str = "western";
pub const EASTERN: &str = "eastern";

/// One labeled training example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionRecord {
    pub color: Rgb,
    pub primary_emotion: &'static str,
    pub emotions: &'static [&'static str],
    pub culture: &'static str,
}

const fn record(
    hex: u32,
    primary_emotion: &'static str,
    emotions: &'static [&'static str],
    culture: &'static str,
) -> EmotionRecord {
    EmotionRecord {
        color: Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8),
        primary_emotion,
        emotions,
        culture,
    }
}

pub static RECORDS: &[EmotionRecord] = &[
    record(0xff0000, "excitement", &["excitement", "passion", "love", "danger"], WESTERN),
    record(0xdc143c, "passion", &["passion", "desire", "intensity"], WESTERN),
    record(0xff69b4, "love", &["love", "romance", "playfulness"], WESTERN),
    record(0xffa500, "enthusiasm", &["enthusiasm", "warmth", "creativity"], WESTERN),
    record(0xff7f50, "enthusiasm", &["enthusiasm", "friendliness", "warmth"], WESTERN),
    record(0xffd700, "happiness", &["happiness", "optimism", "energy"], WESTERN),
    record(0xffff00, "happiness", &["happiness", "cheerfulness", "caution"], WESTERN),
    record(0x008000, "growth", &["growth", "harmony", "freshness"], WESTERN),
    record(0x00ff00, "growth", &["growth", "vitality", "renewal"], WESTERN),
    record(0x40e0d0, "calm", &["calm", "clarity", "refreshment"], WESTERN),
    record(0x87ceeb, "calm", &["calm", "peace", "openness"], WESTERN),
    record(0x0000ff, "trust", &["trust", "calm", "stability", "loyalty"], WESTERN),
    record(0x000080, "trust", &["trust", "authority", "confidence"], WESTERN),
    record(0x800080, "luxury", &["luxury", "mystery", "creativity"], WESTERN),
    record(0x4b0082, "mystery", &["mystery", "intuition", "depth"], WESTERN),
    record(0xe6e6fa, "serenity", &["serenity", "nostalgia", "gentleness"], WESTERN),
    record(0x000000, "sophistication", &["sophistication", "power", "mystery", "grief"], WESTERN),
    record(0xffffff, "purity", &["purity", "simplicity", "cleanliness"], WESTERN),
    record(0x808080, "neutrality", &["neutrality", "balance", "melancholy"], WESTERN),
    record(0x8b4513, "comfort", &["comfort", "stability", "earthiness"], WESTERN),
    record(0xff0000, "luck", &["luck", "celebration", "prosperity", "joy"], EASTERN),
    record(0xffd700, "prosperity", &["prosperity", "wealth", "royalty"], EASTERN),
    record(0xffff00, "prosperity", &["royalty", "prosperity", "honor"], EASTERN),
    record(0xffffff, "mourning", &["mourning", "remembrance", "purity"], EASTERN),
    record(0x008000, "harmony", &["harmony", "growth", "fertility"], EASTERN),
    record(0x0000ff, "healing", &["healing", "calm", "immortality"], EASTERN),
    record(0x000000, "wisdom", &["wisdom", "mystery", "depth"], EASTERN),
    record(0x800080, "nobility", &["nobility", "wealth", "spirituality"], EASTERN),
    record(0xffa500, "transformation", &["transformation", "happiness", "spirituality"], EASTERN),
    record(0xff69b4, "love", &["love", "femininity", "tenderness"], EASTERN),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_has_about_thirty_records() {
        assert_eq!(RECORDS.len(), 30);
    }

    #[test]
    fn record_unpacks_hex_channels() {
        let r = record(0x8b4513, "x", &[], WESTERN);
        assert_eq!(r.color, Rgb::new(0x8b, 0x45, 0x13));
    }

    #[test]
    fn red_has_one_label_per_culture() {
        let reds: Vec<_> = RECORDS
            .iter()
            .filter(|r| r.color == Rgb::new(255, 0, 0))
            .map(|r| (r.culture, r.primary_emotion))
            .collect();
        assert_eq!(reds, vec![(WESTERN, "excitement"), (EASTERN, "luck")]);
    }

    #[test]
    fn every_record_lists_its_primary_emotion() {
        for r in RECORDS {
            assert!(
                r.emotions.contains(&r.primary_emotion),
                "{} ({}) misses {}",
                r.color,
                r.culture,
                r.primary_emotion
            );
        }
    }
}
