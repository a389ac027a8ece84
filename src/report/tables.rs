//! Immutable lookup tables used by the report builder.
//!
//! These were ambient globals in earlier incarnations of the dashboard; they
//! are owned here now and nothing mutates them.

use crate::types::Element;

/// The ten heavenly stems in canonical order.
pub const STEMS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// The twelve earthly branches in canonical order; also the twelve positions
/// of the share-card reference ring.
pub const BRANCHES: [char; 12] = [
    '子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥',
];

/// Coarse stem-to-element mapping. Unknown characters map to nothing.
pub fn stem_element(stem: char) -> Option<Element> {
    match stem {
        '甲' | '乙' => Some(Element::Wood),
        '丙' | '丁' => Some(Element::Fire),
        '戊' | '己' => Some(Element::Earth),
        '庚' | '辛' => Some(Element::Metal),
        '壬' | '癸' => Some(Element::Water),
        _ => None,
    }
}

/// The ten gods as (full name, short code) pairs, canonical order.
pub const TEN_GODS: [(&str, &str); 10] = [
    ("比肩", "比"),
    ("劫财", "劫"),
    ("食神", "食"),
    ("伤官", "伤"),
    ("偏财", "才"),
    ("正财", "财"),
    ("七杀", "杀"),
    ("正官", "官"),
    ("偏印", "枭"),
    ("正印", "印"),
];

/// Full name for a ten-god short code.
pub fn ten_god_full_name(short: &str) -> Option<&'static str> {
    TEN_GODS
        .iter()
        .find(|(_, code)| *code == short)
        .map(|(full, _)| *full)
}

/// Known spiritual-star names, presence-tested as substrings of the raw
/// calculator output.
pub const STAR_NAMES: [&str; 14] = [
    "天乙", "驿马", "桃花", "华盖", "文昌", "天德", "月德", "劫煞", "亡神", "孤辰", "寡宿",
    "红艳", "将星", "大耗",
];

/// Stars conventionally read as auspicious.
pub const AUSPICIOUS_STARS: [&str; 5] = ["天乙", "文昌", "天德", "月德", "将星"];

/// Stars conventionally read as inauspicious.
pub const INAUSPICIOUS_STARS: [&str; 5] = ["劫煞", "亡神", "孤辰", "寡宿", "大耗"];

/// How many stars the panel shows at most.
pub const MAX_STARS: usize = 8;

/// A classical-text reference shown on the quote panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicalReference {
    /// Source text, e.g. 《滴天髓》.
    pub source: &'static str,
    pub quote: &'static str,
    pub translation: &'static str,
}

/// Reference table for the classical-quote panel. The matcher currently
/// always returns the first entry regardless of chart data; see the module
/// docs in `insights` for why this stays as-is.
pub const CLASSICAL_REFERENCES: [ClassicalReference; 2] = [
    ClassicalReference {
        source: "《滴天髓》",
        quote: "五行之气，贵乎中和。",
        translation: "The energies of the five elements are most prized in balance and harmony.",
    },
    ClassicalReference {
        source: "《穷通宝鉴》",
        quote: "得时俱为旺论，失时便作衰看。",
        translation: "In season, an element is read as flourishing; out of season, as waning.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_stem_maps_to_an_element() {
        for stem in STEMS {
            assert!(stem_element(stem).is_some(), "unmapped stem {stem}");
        }
        assert_eq!(stem_element('子'), None);
        assert_eq!(stem_element('x'), None);
    }

    #[test]
    fn short_codes_round_trip() {
        assert_eq!(ten_god_full_name("比"), Some("比肩"));
        assert_eq!(ten_god_full_name("枭"), Some("偏印"));
        assert_eq!(ten_god_full_name("?"), None);
    }

    #[test]
    fn star_categories_are_subsets_of_known_stars() {
        for star in AUSPICIOUS_STARS.iter().chain(INAUSPICIOUS_STARS.iter()) {
            assert!(STAR_NAMES.contains(star));
        }
    }
}
