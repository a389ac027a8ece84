//! The three chart layouts: pillars card, elements bar chart, share card.
//!
//! All layouts are fixed-size. Each build clears the target scene and
//! redraws it in full from the response, so rebuilding is idempotent and an
//! empty response still produces a complete chart with "--" placeholders.

use std::f64::consts::TAU;

use crate::render::scene::{ChartDocument, TextAnchor};
use crate::report::{pillar_cards, tables};
use crate::types::{CalculationResult, Element};

/// Pixel dimensions of the pillars and elements charts.
pub const WIDE_CHART_SIZE: (u32, u32) = (1080, 540);
/// Pixel dimensions of the share card.
pub const SHARE_CARD_SIZE: (u32, u32) = (1080, 1080);

/// Fixed download file names.
pub const PILLARS_FILE_NAME: &str = "bazi-four-pillars.png";
pub const ELEMENTS_FILE_NAME: &str = "bazi-five-elements.png";
pub const SHARE_CARD_FILE_NAME: &str = "bazi-share-card.png";

// Shared palette.
const PAGE_BG: &str = "#faf7f2";
const CARD_BG: &str = "#ffffff";
const CARD_BORDER: &str = "#e5e7eb";
const INK: &str = "#1f2937";
const MUTED: &str = "#6b7280";
const ACCENT: &str = "#b45309";

/// Owns the three chart scenes and rebuilds them from a calculation result.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    pillars: ChartDocument,
    elements: ChartDocument,
    share: ChartDocument,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer {
    pub fn new() -> Self {
        Self {
            pillars: ChartDocument::new(WIDE_CHART_SIZE.0, WIDE_CHART_SIZE.1),
            elements: ChartDocument::new(WIDE_CHART_SIZE.0, WIDE_CHART_SIZE.1),
            share: ChartDocument::new(SHARE_CARD_SIZE.0, SHARE_CARD_SIZE.1),
        }
    }

    pub fn pillars_chart(&self) -> &ChartDocument {
        &self.pillars
    }

    pub fn elements_chart(&self) -> &ChartDocument {
        &self.elements
    }

    pub fn share_card(&self) -> &ChartDocument {
        &self.share
    }

    /// Rebuild the four-pillars card: four equal cards left to right, each
    /// with the pillar's bilingual label, its stem-branch value centered,
    /// and the derived element underneath.
    pub fn build_pillars_chart(&mut self, result: &CalculationResult) -> &ChartDocument {
        let doc = &mut self.pillars;
        doc.clear();
        doc.rect(0.0, 0.0, 1080.0, 540.0, 0.0, PAGE_BG);
        doc.bold_text(540.0, 80.0, "四柱八字 · Four Pillars", 40.0, INK);

        for (i, card) in pillar_cards(result).iter().enumerate() {
            let x = 32.0 + i as f64 * 262.0;
            doc.stroked_rect(x, 150.0, 230.0, 320.0, 16.0, CARD_BG, CARD_BORDER, 2.0);
            let center = x + 115.0;
            doc.text(center, 210.0, card.label, 28.0, MUTED);
            doc.bold_text(center, 335.0, &card.value, 64.0, INK);
            if let Some(element) = card.element {
                doc.text(center, 425.0, element.display_name(), 28.0, element.color());
            }
        }
        doc
    }

    /// Rebuild the five-elements bar chart: five vertical bars in fixed
    /// order, scaled to the maximum score (1 when all scores are zero so a
    /// flat chart still divides cleanly).
    pub fn build_elements_chart(&mut self, result: &CalculationResult) -> &ChartDocument {
        const BASELINE: f64 = 440.0;
        const MAX_BAR_HEIGHT: f64 = 300.0;
        const BAR_WIDTH: f64 = 120.0;

        let doc = &mut self.elements;
        doc.clear();
        doc.rect(0.0, 0.0, 1080.0, 540.0, 0.0, PAGE_BG);
        doc.bold_text(540.0, 80.0, "五行分析 · Five Elements", 40.0, INK);

        let elements = &result.five_elements;
        let max_score = Element::ALL
            .iter()
            .map(|e| elements.score(*e))
            .fold(0.0_f64, f64::max)
            .max(1.0);

        doc.line(60.0, BASELINE, 1020.0, BASELINE, CARD_BORDER, 2.0);

        for (i, element) in Element::ALL.into_iter().enumerate() {
            let score = elements.score(element);
            let x = 80.0 + i as f64 * 200.0;
            let center = x + BAR_WIDTH / 2.0;
            let height = score / max_score * MAX_BAR_HEIGHT;

            if height > 0.0 {
                doc.rect(x, BASELINE - height, BAR_WIDTH, height, 6.0, element.color());
            }
            doc.text(
                center,
                BASELINE - height - 14.0,
                &format_score(score),
                26.0,
                INK,
            );
            doc.text(center, 480.0, element.display_name(), 26.0, element.color());
            if let Some(status) = elements.status_tag(element) {
                doc.text(center, 514.0, status, 22.0, MUTED);
            }
        }
        doc
    }

    /// Rebuild the circular share card: a twelve-branch reference ring, a
    /// proportional arc ring apportioned by element score, one marker per
    /// pillar at its branch position, the four pillar values, and a footer
    /// caption.
    pub fn build_share_card(&mut self, result: &CalculationResult) -> &ChartDocument {
        const CX: f64 = 540.0;
        const CY: f64 = 470.0;
        const BRANCH_RADIUS: f64 = 330.0;
        const MARKER_RADIUS: f64 = 290.0;
        const ARC_RADIUS: f64 = 250.0;

        let doc = &mut self.share;
        doc.clear();
        doc.rect(0.0, 0.0, 1080.0, 1080.0, 0.0, PAGE_BG);
        doc.bold_text(540.0, 90.0, "八字命盘", 44.0, INK);
        doc.text(540.0, 138.0, "Four Pillars Chart", 26.0, MUTED);

        // Twelve-position reference ring.
        doc.ring(CX, CY, MARKER_RADIUS, CARD_BORDER, 2.0);
        for (i, branch) in tables::BRANCHES.iter().enumerate() {
            let angle = i as f64 * TAU / 12.0;
            let (x, y) = crate::render::scene::ring_point(CX, CY, BRANCH_RADIUS, angle);
            doc.text(x, y + 10.0, &branch.to_string(), 30.0, MUTED);
        }

        // Proportional element ring: arc length apportioned by score share,
        // equal fifths when there are no scores at all.
        let elements = &result.five_elements;
        let scores = Element::ALL.map(|e| elements.score(e));
        let total: f64 = scores.iter().sum();
        let mut angle = 0.0;
        for (element, score) in Element::ALL.into_iter().zip(scores) {
            let fraction = if total > 0.0 { score / total } else { 0.2 };
            if fraction <= 0.0 {
                continue;
            }
            let end = angle + fraction * TAU;
            doc.arc(CX, CY, ARC_RADIUS, angle, end, element.color(), 44.0);
            angle = end;
        }

        // One marker per pillar at its branch position.
        let pillars = &result.four_pillars;
        for value in [&pillars.year, &pillars.month, &pillars.day, &pillars.hour]
            .into_iter()
            .flatten()
        {
            if let Some(index) = branch_index(value) {
                let marker_angle = index as f64 * TAU / 12.0;
                let (x, y) =
                    crate::render::scene::ring_point(CX, CY, MARKER_RADIUS, marker_angle);
                doc.circle(x, y, 12.0, ACCENT);
            }
        }

        // Pillar value cards below the ring.
        for (i, card) in pillar_cards(result).iter().enumerate() {
            let x = 40.0 + i as f64 * 260.0;
            doc.stroked_rect(x, 830.0, 220.0, 140.0, 12.0, CARD_BG, CARD_BORDER, 2.0);
            let center = x + 110.0;
            doc.text(center, 870.0, card.label, 22.0, MUTED);
            doc.bold_text(center, 935.0, &card.value, 40.0, INK);
        }

        doc.push_text(
            540.0,
            1040.0,
            "bazichart · 八字四柱",
            24.0,
            MUTED,
            TextAnchor::Middle,
            false,
        );
        doc
    }
}

/// Branch position of a pillar: the last character of the value that is one
/// of the twelve branch names, scanned from the end.
fn branch_index(value: &str) -> Option<usize> {
    value
        .chars()
        .rev()
        .find_map(|c| tables::BRANCHES.iter().position(|b| *b == c))
}

/// Scores print as integers when whole, one decimal otherwise.
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{score:.1}")
    }
}
