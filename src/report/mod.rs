//! Report building: maps a calculation response onto the named display
//! regions of the dashboard.
//!
//! Every region is built independently and tolerates missing sub-fields by
//! rendering "--" or skipping, never by failing. Structured response data is
//! always preferred; the substring/regex mining over `raw_output` is a
//! fragile fallback inherited from the dashboard and is kept as exactly
//! that - an approximation, not something to improve in place.

pub mod insights;
pub mod tables;

use regex_lite::Regex;

use crate::types::{CalculationResult, Element, FiveElements};

pub use insights::{
    classical_quote, climate_reading, dominant_element, life_guidance, personality_insights,
    strength_reading, ClimateReading, LifeGuidance, PersonalityInsights, StrengthReading,
};
pub use tables::ClassicalReference;

/// Placeholder shown for any region with no data.
pub const PLACEHOLDER: &str = "--";

/// One of the four pillar cards.
#[derive(Debug, Clone, PartialEq)]
pub struct PillarCard {
    /// Bilingual label, e.g. "年柱 Year".
    pub label: &'static str,
    /// The two-character stem-branch value, verbatim, or "--".
    pub value: String,
    /// Coarse element derived from the first character of the value.
    pub element: Option<Element>,
}

/// One bar of the five-elements panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBar {
    pub element: Element,
    pub score: f64,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenGod {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarCategory {
    Auspicious,
    Inauspicious,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Star {
    pub name: &'static str,
    pub category: StarCategory,
}

/// One decade-long luck period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuckCycle {
    pub start_year: i32,
    pub end_year: i32,
    /// Stem-branch style name cycled from the fixed tables.
    pub label: String,
    /// Whether this period covers the current calendar year.
    pub current: bool,
}

/// Context the response itself does not carry.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext {
    pub birth_year: i32,
    pub current_year: i32,
}

/// The fully built report: one field per display region.
#[derive(Debug, Clone)]
pub struct Report {
    pub pillars: [PillarCard; 4],
    pub element_bars: [ElementBar; 5],
    pub strength: Option<f64>,
    /// Balance classification; only computed when strength is supplied.
    pub balance: Option<&'static str>,
    pub ten_gods: Vec<TenGod>,
    pub primary_pattern: String,
    pub secondary_pattern: String,
    pub stars: Vec<Star>,
    pub strength_reading: Option<StrengthReading>,
    pub climate: Option<ClimateReading>,
    pub gregorian_date: String,
    pub lunar_date: String,
    pub life_palace: String,
    pub body_palace: String,
    pub taiyuan: String,
    pub solar_terms: String,
    pub luck_cycles: Vec<LuckCycle>,
    pub personality: PersonalityInsights,
    pub guidance: LifeGuidance,
    pub quote: &'static ClassicalReference,
    pub raw_output: Option<String>,
}

impl Report {
    /// Build every region from the response. Pure; the result is only read.
    pub fn build(result: &CalculationResult, ctx: &ReportContext) -> Report {
        let raw = result.raw_output.as_deref();
        let elements = &result.five_elements;
        let (primary_pattern, secondary_pattern) = patterns(result);
        let life_palace = result
            .basic_info
            .life_palace
            .clone()
            .or_else(|| mined_life_palace(raw));
        let solar_terms = result
            .basic_info
            .solar_terms
            .clone()
            .or_else(|| mined_solar_terms(raw));

        Report {
            pillars: pillar_cards(result),
            element_bars: element_bars(elements),
            strength: elements.strength,
            balance: elements
                .strength
                .map(|strength| element_balance(elements, strength)),
            ten_gods: ten_gods(result),
            primary_pattern,
            secondary_pattern,
            stars: spiritual_stars(raw),
            strength_reading: elements.strength.map(strength_reading),
            climate: result.analysis.humidity.map(climate_reading),
            gregorian_date: text_or_placeholder(result.basic_info.gregorian_date.as_deref()),
            lunar_date: text_or_placeholder(result.basic_info.lunar_date.as_deref()),
            life_palace: text_or_placeholder(life_palace.as_deref()),
            body_palace: text_or_placeholder(result.basic_info.body_palace.as_deref()),
            taiyuan: text_or_placeholder(result.basic_info.taiyuan.as_deref()),
            solar_terms: text_or_placeholder(solar_terms.as_deref()),
            luck_cycles: luck_cycles(ctx.birth_year, ctx.current_year),
            personality: personality_insights(elements),
            guidance: life_guidance(),
            quote: classical_quote(),
            raw_output: result.raw_output.clone(),
        }
    }
}

fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// The four pillar cards, values verbatim, coarse element from the first
/// character via the fixed stem table.
pub fn pillar_cards(result: &CalculationResult) -> [PillarCard; 4] {
    let pillars = &result.four_pillars;
    let card = |label: &'static str, value: &Option<String>| {
        let element = value
            .as_deref()
            .and_then(|v| v.chars().next())
            .and_then(tables::stem_element);
        PillarCard {
            label,
            value: text_or_placeholder(value.as_deref()),
            element,
        }
    };
    [
        card("年柱 Year", &pillars.year),
        card("月柱 Month", &pillars.month),
        card("日柱 Day", &pillars.day),
        card("时柱 Hour", &pillars.hour),
    ]
}

/// Five bars in fixed order; a missing score renders as zero, never as a
/// missing slot.
pub fn element_bars(elements: &FiveElements) -> [ElementBar; 5] {
    Element::ALL.map(|element| ElementBar {
        element,
        score: elements.score(element),
        status: elements.status_tag(element).map(str::to_string),
    })
}

/// Coarse balance classification of the score distribution.
///
/// Population variance of the five scores decides first; only when the
/// spread is wide does the separately supplied strength scalar take over.
pub fn element_balance(elements: &FiveElements, strength: f64) -> &'static str {
    let scores = Element::ALL.map(|e| elements.score(e));
    let mean = scores.iter().sum::<f64>() / 5.0;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / 5.0;

    if variance < 10.0 {
        "Balanced"
    } else if strength > 35.0 {
        "Strong"
    } else if strength < 25.0 {
        "Weak"
    } else {
        "Moderate"
    }
}

/// Ten-gods panel.
///
/// With structured short codes, each code maps through the fixed full-name
/// table (unknown codes pass through unchanged). Without structured data
/// this falls back to the first six canonical ten gods - an illustrative
/// placeholder, not a real extraction; parsing them out of the raw text was
/// never implemented.
pub fn ten_gods(result: &CalculationResult) -> Vec<TenGod> {
    let codes = &result.analysis.ten_gods;
    if !codes.is_empty() {
        return codes
            .iter()
            .map(|code| TenGod {
                name: tables::ten_god_full_name(code)
                    .map(str::to_string)
                    .unwrap_or_else(|| code.clone()),
                code: code.clone(),
            })
            .collect();
    }

    tables::TEN_GODS
        .iter()
        .take(6)
        .map(|(full, short)| TenGod {
            name: (*full).to_string(),
            code: (*short).to_string(),
        })
        .collect()
}

/// Pattern panel: structured `analysis.patterns` first, else regex mining of
/// the raw output, else placeholders.
pub fn patterns(result: &CalculationResult) -> (String, String) {
    let structured = &result.analysis.patterns;
    if !structured.is_empty() {
        let primary = text_or_placeholder(structured.first().map(String::as_str));
        let secondary = text_or_placeholder(structured.get(1).map(String::as_str));
        return (primary, secondary);
    }

    let mut primary = PLACEHOLDER.to_string();
    if let Some(raw) = result.raw_output.as_deref() {
        // The calculator prints a line like "格局选用：正格：正官格；用神：…".
        if let Some(captured) = Regex::new("格局选用：([^\n]+)")
            .ok()
            .and_then(|re| re.captures(raw))
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        {
            let parts: Vec<&str> = captured.split(['：', '；']).collect();
            if parts.len() > 1 {
                primary = parts[1].trim().to_string();
            }
        }
    }
    (primary, PLACEHOLDER.to_string())
}

/// Spiritual-stars panel: presence test of the fixed star names as
/// substrings of the raw output, capped, bucketed by the fixed category
/// lists (anything unlisted counts as special).
pub fn spiritual_stars(raw_output: Option<&str>) -> Vec<Star> {
    let Some(raw) = raw_output else {
        return Vec::new();
    };
    tables::STAR_NAMES
        .iter()
        .filter(|name| raw.contains(*name))
        .take(tables::MAX_STARS)
        .map(|name| Star {
            name,
            category: star_category(name),
        })
        .collect()
}

fn star_category(name: &str) -> StarCategory {
    if tables::AUSPICIOUS_STARS.contains(&name) {
        StarCategory::Auspicious
    } else if tables::INAUSPICIOUS_STARS.contains(&name) {
        StarCategory::Inauspicious
    } else {
        StarCategory::Special
    }
}

/// Eight sequential ten-year periods starting at the birth year, names
/// cycled from the stem and branch tables by index.
///
/// This is a display-only deterministic generator, not a calculated
/// luck-pillar sequence; real luck pillars depend on gender and the solar
/// term of birth, which this dashboard never computed.
pub fn luck_cycles(birth_year: i32, current_year: i32) -> Vec<LuckCycle> {
    (0..8)
        .map(|i| {
            let start_year = birth_year + 10 * i as i32;
            let end_year = start_year + 9;
            LuckCycle {
                start_year,
                end_year,
                label: format!(
                    "{}{}",
                    tables::STEMS[i % tables::STEMS.len()],
                    tables::BRANCHES[i % tables::BRANCHES.len()]
                ),
                current: (start_year..=end_year).contains(&current_year),
            }
        })
        .collect()
}

/// Mine the solar-terms line out of the raw output: the first "立X" term
/// followed by two whitespace-separated tokens.
fn mined_solar_terms(raw_output: Option<&str>) -> Option<String> {
    let raw = raw_output?;
    Regex::new(r"立\S+\s+\S+\s+\S+")
        .ok()?
        .find(raw)
        .map(|m| m.as_str().to_string())
}

/// Mine the life palace out of the raw output ("命宫:XX").
fn mined_life_palace(raw_output: Option<&str>) -> Option<String> {
    let raw = raw_output?;
    Regex::new(r"命宫:(\S+)")
        .ok()?
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn elements_with(scores: &[(char, f64)]) -> FiveElements {
        FiveElements {
            scores: scores.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn equal_scores_classify_balanced_for_any_strength() {
        let elements = elements_with(&[
            ('木', 20.0),
            ('火', 20.0),
            ('土', 20.0),
            ('金', 20.0),
            ('水', 20.0),
        ]);
        assert_eq!(element_balance(&elements, 50.0), "Balanced");
        assert_eq!(element_balance(&elements, 0.0), "Balanced");
    }

    #[test]
    fn variance_is_checked_before_strength() {
        // variance ~ 196, well over the balanced band, so the strength
        // branch decides: 36 > 35 is Strong.
        let elements = elements_with(&[
            ('木', 40.0),
            ('火', 5.0),
            ('土', 5.0),
            ('金', 5.0),
            ('水', 5.0),
        ]);
        assert_eq!(element_balance(&elements, 36.0), "Strong");
        assert_eq!(element_balance(&elements, 20.0), "Weak");
        assert_eq!(element_balance(&elements, 30.0), "Moderate");
    }

    #[test]
    fn pillar_cards_derive_elements_and_placeholders() {
        let result = CalculationResult {
            four_pillars: crate::types::FourPillars {
                year: Some("庚午".to_string()),
                month: Some("辛巳".to_string()),
                day: Some("甲子".to_string()),
                hour: None,
            },
            ..Default::default()
        };
        let cards = pillar_cards(&result);
        assert_eq!(cards[0].value, "庚午");
        assert_eq!(cards[0].element, Some(Element::Metal));
        assert_eq!(cards[2].element, Some(Element::Wood));
        assert_eq!(cards[3].value, PLACEHOLDER);
        assert_eq!(cards[3].element, None);
    }

    #[test]
    fn all_five_bars_render_with_missing_scores() {
        let bars = element_bars(&elements_with(&[('木', 10.0)]));
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].score, 10.0);
        assert!(bars[1..].iter().all(|bar| bar.score == 0.0));
    }

    #[test]
    fn structured_ten_gods_map_through_the_table() {
        let result = CalculationResult {
            analysis: crate::types::Analysis {
                ten_gods: vec!["官".to_string(), "印".to_string(), "??".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let gods = ten_gods(&result);
        assert_eq!(gods[0].name, "正官");
        assert_eq!(gods[1].name, "正印");
        // Unknown code passes through unchanged.
        assert_eq!(gods[2].name, "??");
    }

    #[test]
    fn ten_gods_fallback_is_the_first_six() {
        let gods = ten_gods(&CalculationResult::default());
        assert_eq!(gods.len(), 6);
        assert_eq!(gods[0].name, "比肩");
        assert_eq!(gods[5].name, "正财");
    }

    #[test]
    fn patterns_prefer_structured_data() {
        let result = CalculationResult {
            analysis: crate::types::Analysis {
                patterns: vec!["正官格".to_string()],
                ..Default::default()
            },
            raw_output: Some("格局选用：杂气：偏财格".to_string()),
            ..Default::default()
        };
        let (primary, secondary) = patterns(&result);
        assert_eq!(primary, "正官格");
        assert_eq!(secondary, PLACEHOLDER);
    }

    #[test]
    fn patterns_fall_back_to_raw_output_mining() {
        let result = CalculationResult {
            raw_output: Some("……\n格局选用：正格：正官格；用神：印\n……".to_string()),
            ..Default::default()
        };
        let (primary, secondary) = patterns(&result);
        assert_eq!(primary, "正官格");
        assert_eq!(secondary, PLACEHOLDER);
    }

    #[test]
    fn patterns_default_to_placeholders() {
        let (primary, secondary) = patterns(&CalculationResult::default());
        assert_eq!(primary, PLACEHOLDER);
        assert_eq!(secondary, PLACEHOLDER);
    }

    #[test]
    fn stars_are_presence_tested_capped_and_bucketed() {
        let raw = "天乙贵人 驿马 桃花 华盖 文昌 天德 月德 劫煞 亡神 孤辰 寡宿 红艳";
        let stars = spiritual_stars(Some(raw));
        assert_eq!(stars.len(), tables::MAX_STARS);
        assert_eq!(stars[0].name, "天乙");
        assert_eq!(stars[0].category, StarCategory::Auspicious);
        let horse = stars.iter().find(|s| s.name == "驿马").unwrap();
        assert_eq!(horse.category, StarCategory::Special);
        let robbery = stars.iter().find(|s| s.name == "劫煞").unwrap();
        assert_eq!(robbery.category, StarCategory::Inauspicious);
    }

    #[test]
    fn no_raw_output_means_no_stars() {
        assert!(spiritual_stars(None).is_empty());
    }

    #[test]
    fn luck_cycles_are_eight_decades_with_current_flag() {
        let cycles = luck_cycles(1990, 2024);
        assert_eq!(cycles.len(), 8);
        assert_eq!(cycles[0].start_year, 1990);
        assert_eq!(cycles[0].end_year, 1999);
        assert_eq!(cycles[7].start_year, 2060);
        let current: Vec<&LuckCycle> = cycles.iter().filter(|c| c.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].start_year, 2020);
        assert_eq!(current[0].end_year, 2029);
    }

    #[test]
    fn luck_cycle_labels_cycle_the_name_tables() {
        let cycles = luck_cycles(1990, 2024);
        assert_eq!(cycles[0].label, "甲子");
        assert_eq!(cycles[1].label, "乙丑");
        assert_eq!(cycles[7].label, "辛未");
    }

    #[test]
    fn report_build_tolerates_an_empty_result() {
        let ctx = ReportContext {
            birth_year: 1990,
            current_year: 2024,
        };
        let report = Report::build(&CalculationResult::default(), &ctx);
        assert!(report.pillars.iter().all(|c| c.value == PLACEHOLDER));
        assert_eq!(report.balance, None);
        assert_eq!(report.gregorian_date, PLACEHOLDER);
        assert_eq!(report.solar_terms, PLACEHOLDER);
        assert!(report.stars.is_empty());
        assert_eq!(report.ten_gods.len(), 6);
        assert_eq!(report.quote.source, "《滴天髓》");
    }

    #[test]
    fn report_mines_basic_info_from_raw_output() {
        let result = CalculationResult {
            raw_output: Some(
                "公历: 1990-5-15 农历: 庚午年四月廿一\n立夏 5月6日 10:35\n命宫:癸酉 胎元:壬申"
                    .to_string(),
            ),
            ..Default::default()
        };
        let ctx = ReportContext {
            birth_year: 1990,
            current_year: 2024,
        };
        let report = Report::build(&result, &ctx);
        assert_eq!(report.life_palace, "癸酉");
        assert_eq!(report.solar_terms, "立夏 5月6日 10:35");
    }

    #[test]
    fn structured_basic_info_wins_over_mining() {
        let result = CalculationResult {
            basic_info: crate::types::BasicInfo {
                life_palace: Some("丁丑".to_string()),
                solar_terms: Some("立春 2月4日 09:02".to_string()),
                ..Default::default()
            },
            raw_output: Some("命宫:癸酉\n立夏 5月6日 10:35".to_string()),
            ..Default::default()
        };
        let ctx = ReportContext {
            birth_year: 1990,
            current_year: 2024,
        };
        let report = Report::build(&result, &ctx);
        assert_eq!(report.life_palace, "丁丑");
        assert_eq!(report.solar_terms, "立春 2月4日 09:02");
    }

    #[test]
    fn status_tags_flow_into_bars() {
        let mut status = HashMap::new();
        status.insert("木".to_string(), "旺".to_string());
        let elements = FiveElements {
            scores: [("木".to_string(), 30.0)].into_iter().collect(),
            status,
            ..Default::default()
        };
        let bars = element_bars(&elements);
        assert_eq!(bars[0].status.as_deref(), Some("旺"));
        assert_eq!(bars[1].status, None);
    }
}
