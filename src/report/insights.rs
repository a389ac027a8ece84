//! Interpretive text panels: strength and climate readings, personality,
//! life guidance, and the classical quote.
//!
//! Several of these are deliberately static. The life-guidance paragraphs
//! never vary with the chart, and the classical-quote matcher always returns
//! the first reference entry. Both reproduce the dashboard's long-standing
//! placeholder behavior; they are known limitations, not bugs to fix
//! silently here.

use crate::report::tables::{ClassicalReference, CLASSICAL_REFERENCES};
use crate::types::{Element, FiveElements};

/// Day-master strength classified from the scalar strength value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReading {
    pub verdict: &'static str,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

/// Classify strength: at or below 29 reads as Weak, anything above as Strong.
pub fn strength_reading(strength: f64) -> StrengthReading {
    if strength <= 29.0 {
        StrengthReading {
            verdict: "Weak",
            description: "The day master is comparatively weak in this chart. Supportive \
                          elements matter more than outlets, and seasons or company that \
                          strengthen the day master tend to feel restorative.",
            recommendations: &[
                "Favor activities and environments associated with your supporting elements.",
                "Avoid overcommitting; a weak day master benefits from steady routines.",
                "Collaboration works better than confrontation when energy runs low.",
            ],
        }
    } else {
        StrengthReading {
            verdict: "Strong",
            description: "The day master is strong in this chart. Outlets for that strength \
                          matter more than further support, and demanding undertakings are \
                          usually well tolerated.",
            recommendations: &[
                "Channel surplus energy into creative or expressive pursuits.",
                "Seek challenges; a strong day master stagnates without an outlet.",
            ],
        }
    }
}

/// Chart climate classified from the signed humidity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClimateReading {
    pub verdict: &'static str,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

/// Classify humidity: below -3 is Cold & Wet, above 3 is Hot & Dry,
/// everything between is Balanced.
pub fn climate_reading(humidity: f64) -> ClimateReading {
    if humidity < -3.0 {
        ClimateReading {
            verdict: "Cold & Wet",
            description: "The chart leans cold and wet. Warming, drying influences bring it \
                          toward equilibrium.",
            recommendations: &[
                "Warmth, light, and activity counteract the chart's dampness.",
                "Fire-element pursuits and sunnier seasons tend to suit you.",
            ],
        }
    } else if humidity > 3.0 {
        ClimateReading {
            verdict: "Hot & Dry",
            description: "The chart leans hot and dry. Cooling, moistening influences bring \
                          it toward equilibrium.",
            recommendations: &[
                "Rest, reflection, and water-element pursuits temper the chart's heat.",
                "Pace yourself in high-pressure stretches; the chart already runs hot.",
            ],
        }
    } else {
        ClimateReading {
            verdict: "Balanced",
            description: "The chart's climate sits within the balanced band; neither warming \
                          nor cooling correction is called for.",
            recommendations: &[
                "Maintain current rhythms; the chart does not ask for correction.",
                "Watch for seasonal swings that could tip the balance either way.",
            ],
        }
    }
}

/// Personality panel: character sketch, strengths, and a growth note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalityInsights {
    pub character: &'static str,
    pub strengths: &'static str,
    pub growth: &'static str,
}

/// The growth paragraph never varies with the chart.
const GROWTH: &str = "Every chart has areas for development, and understanding these can \
                      help you achieve greater balance and fulfillment.";

/// Pick the dominant element: highest score, ties broken by the fixed
/// iteration order (wood, fire, earth, metal, water).
pub fn dominant_element(elements: &FiveElements) -> Option<Element> {
    if elements.scores.is_empty() {
        return None;
    }
    let mut best = Element::Wood;
    let mut best_score = f64::MIN;
    for element in Element::ALL {
        let score = elements.score(element);
        if score > best_score {
            best = element;
            best_score = score;
        }
    }
    Some(best)
}

/// One of five fixed paragraph pairs keyed by the dominant element, plus the
/// constant growth paragraph. With no score data at all, generic text.
pub fn personality_insights(elements: &FiveElements) -> PersonalityInsights {
    let Some(dominant) = dominant_element(elements) else {
        return PersonalityInsights {
            character: "Based on your bazi chart, you possess a unique combination of traits \
                        that reflect the balance of five elements in your constitution.",
            strengths: "Your natural abilities shine through your elemental composition, \
                        providing you with distinctive talents and capabilities.",
            growth: GROWTH,
        };
    };

    let (character, strengths) = match dominant {
        Element::Wood => (
            "You have a strong Wood element, indicating creativity, growth-oriented thinking, \
             and natural leadership abilities.",
            "Your innovative spirit and ability to adapt make you excellent at pioneering new \
             projects and inspiring others.",
        ),
        Element::Fire => (
            "Fire dominates your chart, suggesting passion, enthusiasm, and strong \
             communication skills.",
            "Your charismatic personality and ability to motivate others are your greatest \
             assets in both personal and professional relationships.",
        ),
        Element::Earth => (
            "Earth element prominence indicates stability, reliability, and practical wisdom \
             in your approach to life.",
            "Your grounded nature and ability to build lasting foundations make you a trusted \
             advisor and dependable partner.",
        ),
        Element::Metal => (
            "Metal element strength suggests precision, determination, and strong analytical \
             abilities.",
            "Your attention to detail and systematic approach help you excel in fields \
             requiring accuracy and strategic thinking.",
        ),
        Element::Water => (
            "Water element dominance indicates intuition, adaptability, and deep emotional \
             intelligence.",
            "Your ability to flow with circumstances and understand others' emotions makes \
             you naturally wise and empathetic.",
        ),
    };

    PersonalityInsights {
        character,
        strengths,
        growth: GROWTH,
    }
}

/// Life-guidance panel: four fixed paragraphs, independent of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeGuidance {
    pub career: &'static str,
    pub relationships: &'static str,
    pub health: &'static str,
    pub purpose: &'static str,
}

pub fn life_guidance() -> LifeGuidance {
    LifeGuidance {
        career: "Your elemental composition suggests certain career paths may be more \
                 harmonious with your natural energy. Consider fields that align with your \
                 dominant elements.",
        relationships: "Understanding your bazi chart can help you build more harmonious \
                        relationships by recognizing compatible energy patterns and \
                        communication styles.",
        health: "Your five-element balance indicates specific areas of health to focus on. \
                 Maintaining elemental harmony through lifestyle choices supports overall \
                 wellbeing.",
        purpose: "Your unique bazi pattern reveals your spiritual path and life mission. \
                  Embracing your authentic nature leads to greater fulfillment and success.",
    }
}

/// The classical-quote panel. Matching against the chart was never finished;
/// the first reference is returned for every chart.
pub fn classical_quote() -> &'static ClassicalReference {
    &CLASSICAL_REFERENCES[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements_with(scores: &[(char, f64)]) -> FiveElements {
        FiveElements {
            scores: scores
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn strength_boundary_is_29() {
        assert_eq!(strength_reading(29.0).verdict, "Weak");
        assert_eq!(strength_reading(29.5).verdict, "Strong");
        assert_eq!(strength_reading(0.0).verdict, "Weak");
    }

    #[test]
    fn climate_boundaries() {
        assert_eq!(climate_reading(-3.5).verdict, "Cold & Wet");
        assert_eq!(climate_reading(-3.0).verdict, "Balanced");
        assert_eq!(climate_reading(3.0).verdict, "Balanced");
        assert_eq!(climate_reading(4.0).verdict, "Hot & Dry");
    }

    #[test]
    fn readings_carry_recommendations() {
        for reading in [strength_reading(10.0), strength_reading(40.0)] {
            assert!((2..=3).contains(&reading.recommendations.len()));
        }
        for reading in [
            climate_reading(-10.0),
            climate_reading(0.0),
            climate_reading(10.0),
        ] {
            assert!((2..=3).contains(&reading.recommendations.len()));
        }
    }

    #[test]
    fn dominant_element_ties_break_in_fixed_order() {
        // Fire and water tie; fire comes first in the fixed order.
        let elements = elements_with(&[('火', 20.0), ('水', 20.0), ('木', 5.0)]);
        assert_eq!(dominant_element(&elements), Some(Element::Fire));
    }

    #[test]
    fn no_scores_means_generic_personality() {
        let insights = personality_insights(&FiveElements::default());
        assert!(insights.character.starts_with("Based on your bazi chart"));
    }

    #[test]
    fn water_dominant_personality() {
        let elements = elements_with(&[('水', 42.0), ('金', 10.0)]);
        let insights = personality_insights(&elements);
        assert!(insights.character.contains("Water element dominance"));
    }

    #[test]
    fn quote_is_always_the_first_reference() {
        assert_eq!(classical_quote().source, "《滴天髓》");
    }
}
