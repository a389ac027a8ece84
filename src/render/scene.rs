//! The in-memory vector scene behind each chart, and its SVG serialization.
//!
//! A `ChartDocument` is rebuilt from scratch on every render - callers clear
//! it and redraw rather than patching nodes - then serialized to a
//! standalone SVG document for display or rasterization.

use std::f64::consts::TAU;
use std::fmt::Write;

/// Horizontal text anchoring, mirroring the SVG `text-anchor` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// A single drawable node.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Option<String>,
        stroke: Option<String>,
        stroke_width: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: String,
        stroke_width: f64,
    },
    /// A stroked circular arc. Angles are radians measured clockwise from
    /// twelve o'clock.
    Arc {
        cx: f64,
        cy: f64,
        r: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: String,
        stroke_width: f64,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        size: f64,
        fill: String,
        anchor: TextAnchor,
        bold: bool,
    },
}

/// A fixed-size vector scene.
#[derive(Debug, Clone)]
pub struct ChartDocument {
    width: u32,
    height: u32,
    nodes: Vec<SceneNode>,
}

impl ChartDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Drop all drawn nodes. Every chart build starts here so rebuilds are
    /// idempotent.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, rx: f64, fill: &str) {
        self.push(SceneNode::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill: Some(fill.to_string()),
            stroke: None,
            stroke_width: 0.0,
        });
    }

    pub fn stroked_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        fill: &str,
        stroke: &str,
        stroke_width: f64,
    ) {
        self.push(SceneNode::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill: Some(fill.to_string()),
            stroke: Some(stroke.to_string()),
            stroke_width,
        });
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.push(SceneNode::Circle {
            cx,
            cy,
            r,
            fill: Some(fill.to_string()),
            stroke: None,
            stroke_width: 0.0,
        });
    }

    pub fn ring(&mut self, cx: f64, cy: f64, r: f64, stroke: &str, stroke_width: f64) {
        self.push(SceneNode::Circle {
            cx,
            cy,
            r,
            fill: None,
            stroke: Some(stroke.to_string()),
            stroke_width,
        });
    }

    /// Push a stroked arc; a span covering the whole circle degenerates into
    /// a ring so it stays visible.
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        r: f64,
        start_angle: f64,
        end_angle: f64,
        stroke: &str,
        stroke_width: f64,
    ) {
        if end_angle - start_angle >= TAU * 0.9999 {
            self.ring(cx, cy, r, stroke, stroke_width);
            return;
        }
        self.push(SceneNode::Arc {
            cx,
            cy,
            r,
            start_angle,
            end_angle,
            stroke: stroke.to_string(),
            stroke_width,
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, stroke_width: f64) {
        self.push(SceneNode::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: stroke.to_string(),
            stroke_width,
        });
    }

    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str) {
        self.push_text(x, y, content, size, fill, TextAnchor::Middle, false);
    }

    pub fn bold_text(&mut self, x: f64, y: f64, content: &str, size: f64, fill: &str) {
        self.push_text(x, y, content, size, fill, TextAnchor::Middle, true);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn push_text(
        &mut self,
        x: f64,
        y: f64,
        content: &str,
        size: f64,
        fill: &str,
        anchor: TextAnchor,
        bold: bool,
    ) {
        self.push(SceneNode::Text {
            x,
            y,
            content: content.to_string(),
            size,
            fill: fill.to_string(),
            anchor,
            bold,
        });
    }

    /// Serialize the scene to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(256 + self.nodes.len() * 96);
        let _ = write!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height,
        );
        for node in &self.nodes {
            write_node(&mut out, node);
        }
        out.push_str("</svg>");
        out
    }
}

fn write_node(out: &mut String, node: &SceneNode) {
    match node {
        SceneNode::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                out,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*width),
                fmt_num(*height),
            );
            if *rx > 0.0 {
                let _ = write!(out, " rx=\"{}\"", fmt_num(*rx));
            }
            write_paint(out, fill.as_deref(), stroke.as_deref(), *stroke_width);
            out.push_str("/>");
        }
        SceneNode::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                fmt_num(*cx),
                fmt_num(*cy),
                fmt_num(*r),
            );
            write_paint(out, fill.as_deref(), stroke.as_deref(), *stroke_width);
            out.push_str("/>");
        }
        SceneNode::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            let _ = write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                fmt_num(*x1),
                fmt_num(*y1),
                fmt_num(*x2),
                fmt_num(*y2),
                stroke,
                fmt_num(*stroke_width),
            );
        }
        SceneNode::Arc {
            cx,
            cy,
            r,
            start_angle,
            end_angle,
            stroke,
            stroke_width,
        } => {
            let (x0, y0) = ring_point(*cx, *cy, *r, *start_angle);
            let (x1, y1) = ring_point(*cx, *cy, *r, *end_angle);
            let large_arc = i32::from(end_angle - start_angle > TAU / 2.0);
            let _ = write!(
                out,
                "<path d=\"M {} {} A {} {} 0 {} 1 {} {}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                fmt_num(x0),
                fmt_num(y0),
                fmt_num(*r),
                fmt_num(*r),
                large_arc,
                fmt_num(x1),
                fmt_num(y1),
                stroke,
                fmt_num(*stroke_width),
            );
        }
        SceneNode::Text {
            x,
            y,
            content,
            size,
            fill,
            anchor,
            bold,
        } => {
            let _ = write!(
                out,
                "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\"",
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*size),
                fill,
                anchor.as_svg(),
            );
            if *bold {
                out.push_str(" font-weight=\"bold\"");
            }
            let _ = write!(out, ">{}</text>", escape_text(content));
        }
    }
}

fn write_paint(out: &mut String, fill: Option<&str>, stroke: Option<&str>, stroke_width: f64) {
    match fill {
        Some(fill) => {
            let _ = write!(out, " fill=\"{fill}\"");
        }
        None => out.push_str(" fill=\"none\""),
    }
    if let Some(stroke) = stroke {
        let _ = write!(
            out,
            " stroke=\"{}\" stroke-width=\"{}\"",
            stroke,
            fmt_num(stroke_width)
        );
    }
}

/// Point on a ring at the given clockwise-from-top angle.
pub fn ring_point(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.sin(), cy - r * angle.cos())
}

/// Escape text content for SVG output.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let sig_figs = 6;
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{rounded:.decimals$}");
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}
