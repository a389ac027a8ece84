//! End-to-end checks: a realistic service response flows through envelope
//! parsing, report building, chart building, and rasterization.

use bazichart::render::{rasterize, ChartRenderer, SHARE_CARD_SIZE, WIDE_CHART_SIZE};
use bazichart::report::{Report, ReportContext, PLACEHOLDER};
use bazichart::types::{ApiEnvelope, CalculationResult};
use bazichart::Element;

const FIXTURE: &str = r#"{
    "success": true,
    "data": {
        "four_pillars": {
            "year": "庚午",
            "month": "辛巳",
            "day": "甲子",
            "hour": "辛未"
        },
        "five_elements": {
            "scores": {"木": 8, "火": 30, "土": 14, "金": 26, "水": 12},
            "strength": 28,
            "status": {"火": "旺", "木": "休"},
            "middle_value": 30,
            "strong_root": "无"
        },
        "analysis": {
            "patterns": ["正官格", "从强格"],
            "ten_gods": ["官", "杀", "比", "印"],
            "humidity": "-5",
            "humidity_range": "[-10,10]"
        },
        "basic_info": {
            "gregorian_date": "1990-5-15",
            "lunar_date": "庚午年四月廿一"
        },
        "raw_output": "公历: 1990-5-15 农历: 庚午年四月廿一\n立夏 5月6日 10:35\n命宫:癸酉 胎元:壬申\n天乙贵人 驿马 文昌 华盖\n格局选用：正格：正官格"
    }
}"#;

fn fixture_result() -> CalculationResult {
    let envelope: ApiEnvelope = serde_json::from_str(FIXTURE).unwrap();
    assert!(envelope.success);
    envelope.data.unwrap()
}

fn fixture_report() -> Report {
    let ctx = ReportContext {
        birth_year: 1990,
        current_year: 2024,
    };
    Report::build(&fixture_result(), &ctx)
}

#[test]
fn report_regions_from_a_full_response() {
    let report = fixture_report();

    assert_eq!(report.pillars[0].value, "庚午");
    assert_eq!(report.pillars[0].element, Some(Element::Metal));
    assert_eq!(report.pillars[2].element, Some(Element::Wood));

    // Fire leads the distribution; wide variance + strength 28 -> Moderate.
    assert_eq!(report.balance, Some("Moderate"));
    assert_eq!(report.strength, Some(28.0));

    // Structured data wins over every fallback path.
    assert_eq!(report.primary_pattern, "正官格");
    assert_eq!(report.secondary_pattern, "从强格");
    assert_eq!(report.ten_gods.len(), 4);
    assert_eq!(report.ten_gods[0].name, "正官");

    // Raw-output mining fills in what the structured payload lacks.
    assert_eq!(report.life_palace, "癸酉");
    assert_eq!(report.solar_terms, "立夏 5月6日 10:35");
    assert_eq!(report.body_palace, PLACEHOLDER);

    let star_names: Vec<&str> = report.stars.iter().map(|s| s.name).collect();
    assert_eq!(star_names, vec!["天乙", "驿马", "华盖", "文昌"]);

    // strength 28 <= 29, humidity -5 < -3.
    assert_eq!(report.strength_reading.as_ref().unwrap().verdict, "Weak");
    assert_eq!(report.climate.as_ref().unwrap().verdict, "Cold & Wet");

    // Fire-dominant personality.
    assert!(report.personality.character.contains("Fire"));

    assert_eq!(report.luck_cycles.len(), 8);
    assert!(report.luck_cycles[3].current);
}

#[test]
fn charts_render_the_fixture() {
    let result = fixture_result();
    let mut renderer = ChartRenderer::new();

    let pillars_svg = renderer.build_pillars_chart(&result).to_svg();
    assert!(pillars_svg.contains("庚午"));
    assert!(pillars_svg.contains("甲子"));

    let elements_svg = renderer.build_elements_chart(&result).to_svg();
    assert!(elements_svg.contains("火 Fire"));
    assert!(elements_svg.contains("旺"));

    let share_svg = renderer.build_share_card(&result).to_svg();
    assert!(share_svg.contains("八字命盘"));
    for branch in ['子', '午', '巳', '未'] {
        assert!(share_svg.contains(branch));
    }
}

#[test]
fn fixture_charts_rasterize_at_fixed_dimensions() {
    let result = fixture_result();
    let mut renderer = ChartRenderer::new();

    renderer.build_elements_chart(&result);
    let (w, h) = WIDE_CHART_SIZE;
    let png = rasterize(renderer.elements_chart(), w, h, "white").unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (w, h));
}

#[test]
fn empty_result_still_renders_and_rasterizes() {
    let result = CalculationResult::default();
    let mut renderer = ChartRenderer::new();

    let svg = renderer.build_pillars_chart(&result).to_svg();
    assert!(svg.contains("--"));

    renderer.build_share_card(&result);
    let (w, h) = SHARE_CARD_SIZE;
    let png = rasterize(renderer.share_card(), w, h, "#faf7f2").unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (w, h));
}

#[test]
fn error_envelope_has_no_payload() {
    let envelope: ApiEnvelope =
        serde_json::from_str(r#"{"success": false, "error": "计算失败: bad input"}"#).unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.error.as_deref(), Some("计算失败: bad input"));
    assert!(envelope.data.is_none());
}
