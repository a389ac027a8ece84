//! Core types: the submitted birth data and the calculation response model.
//!
//! The response types are deliberately lenient: every field is optional or
//! defaulted, because the rendering side must tolerate any missing sub-field
//! and show a placeholder instead of failing.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The five elements in their fixed display order.
///
/// Every bar chart and score table iterates in this order; ties for the
/// dominant element are broken by it as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// The single-character key used by the calculation service.
    pub fn key(self) -> char {
        match self {
            Element::Wood => '木',
            Element::Fire => '火',
            Element::Earth => '土',
            Element::Metal => '金',
            Element::Water => '水',
        }
    }

    /// Bilingual display name, as shown on the bar chart.
    pub fn display_name(self) -> &'static str {
        match self {
            Element::Wood => "木 Wood",
            Element::Fire => "火 Fire",
            Element::Earth => "土 Earth",
            Element::Metal => "金 Metal",
            Element::Water => "水 Water",
        }
    }

    /// Fixed chart color for this element.
    pub fn color(self) -> &'static str {
        match self {
            Element::Wood => "#059669",
            Element::Fire => "#dc2626",
            Element::Earth => "#ea580c",
            Element::Metal => "#64748b",
            Element::Water => "#1d4ed8",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Which calendar the submitted date is expressed in.
///
/// The service calls the solar calendar "gregorian" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CalendarType {
    #[serde(rename = "gregorian")]
    Solar,
    #[serde(rename = "lunar")]
    Lunar,
}

/// One submission's worth of birth data, as read from the form.
///
/// `hour` is optional so that hour zero (the Zi hour) is unambiguously
/// present rather than falsy-missing; `None` means the field was left blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: Option<u32>,
    pub gender: Gender,
    pub calendar_type: CalendarType,
}

/// JSON body of the POST to the calculation endpoint.
#[derive(Debug, Serialize)]
pub struct CalculationRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub gender: Gender,
    pub calendar_type: CalendarType,
}

impl BirthInput {
    /// Build the wire request. Call only after validation; a still-missing
    /// hour is sent as zero.
    pub fn to_request(&self) -> CalculationRequest {
        CalculationRequest {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour.unwrap_or(0),
            gender: self.gender,
            calendar_type: self.calendar_type,
        }
    }
}

/// Response envelope: either a payload or a service-supplied error string.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: bool,
    pub data: Option<CalculationResult>,
    pub error: Option<String>,
}

/// The parsed calculation payload. Shared read-only with the presenter and
/// the chart renderer; replaced wholesale on the next submission, never
/// mutated in place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculationResult {
    #[serde(default)]
    pub four_pillars: FourPillars,
    #[serde(default)]
    pub five_elements: FiveElements,
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub basic_info: BasicInfo,
    /// Raw text output of the upstream calculator, kept for the fallback
    /// text-mining paths.
    #[serde(default)]
    pub raw_output: Option<String>,
}

/// The four stem-branch pillar strings, two characters each.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FourPillars {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub hour: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiveElements {
    /// Element key (木火土金水) to numeric score.
    #[serde(default)]
    pub scores: HashMap<String, f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub strength: Option<f64>,
    /// Element key to qualitative tag (旺相休囚死).
    #[serde(default)]
    pub status: HashMap<String, String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub middle_value: Option<f64>,
    #[serde(default)]
    pub strong_root: Option<String>,
}

impl FiveElements {
    /// Score for an element, zero when the service omitted it. All five
    /// slots must render even when data is missing.
    pub fn score(&self, element: Element) -> f64 {
        self.scores
            .get(&element.key().to_string())
            .copied()
            .unwrap_or(0.0)
    }

    /// Qualitative status tag for an element, if present.
    pub fn status_tag(&self, element: Element) -> Option<&str> {
        self.status
            .get(&element.key().to_string())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Ten-god short codes in pillar order.
    #[serde(default)]
    pub ten_gods: Vec<String>,
    /// Signed humidity score; the service sometimes sends it as a string.
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub humidity_range: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInfo {
    pub gregorian_date: Option<String>,
    pub lunar_date: Option<String>,
    pub life_palace: Option<String>,
    pub body_palace: Option<String>,
    pub taiyuan: Option<String>,
    pub solar_terms: Option<String>,
}

/// Accept a number, a numeric string, or nothing at all.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}
