//! Rasterization: serialize a chart scene to SVG, render it into a pixmap of
//! the requested dimensions over the requested background fill, and encode
//! the result as PNG. The returned bytes are complete - callers can hand
//! them straight to a download or a file write.

use std::path::Path;

use image::ImageEncoder;

use crate::errors::RenderError;
use crate::render::scene::ChartDocument;

/// Render the scene to PNG bytes at `width` x `height` pixels.
pub fn rasterize(
    doc: &ChartDocument,
    width: u32,
    height: u32,
    background: &str,
) -> Result<Vec<u8>, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let svg = doc.to_svg();
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| RenderError::SvgParse {
        message: e.to_string(),
    })?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::InvalidDimensions { width, height })?;
    pixmap.fill(parse_color(background)?);

    let sx = width as f32 / doc.width() as f32;
    let sy = height as f32 / doc.height() as f32;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    encode_png(&pixmap)
}

/// Rasterize and write the PNG to `path`.
pub fn rasterize_to_file(
    doc: &ChartDocument,
    path: &Path,
    width: u32,
    height: u32,
    background: &str,
) -> Result<(), RenderError> {
    let png = rasterize(doc, width, height, background)?;
    std::fs::write(path, png)?;
    crate::log::debug!(path = %path.display(), "wrote chart file");
    Ok(())
}

fn encode_png(pixmap: &tiny_skia::Pixmap) -> Result<Vec<u8>, RenderError> {
    // tiny-skia pixels are premultiplied; undo that before encoding.
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(
            &rgba,
            pixmap.width(),
            pixmap.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|source| RenderError::PngEncode { source })?;
    Ok(buf)
}

/// Parse a background fill: a few named colors plus #rrggbb hex.
fn parse_color(value: &str) -> Result<tiny_skia::Color, RenderError> {
    let lower = value.trim().to_ascii_lowercase();
    match lower.as_str() {
        "white" => return Ok(tiny_skia::Color::WHITE),
        "black" => return Ok(tiny_skia::Color::BLACK),
        "transparent" | "none" => return Ok(tiny_skia::Color::TRANSPARENT),
        _ => {}
    }

    if let Some(hex) = lower.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(bits) = u32::from_str_radix(hex, 16) {
                let r = (bits >> 16) as u8;
                let g = (bits >> 8) as u8;
                let b = bits as u8;
                return Ok(tiny_skia::Color::from_rgba8(r, g, b, 255));
            }
        }
    }

    Err(RenderError::InvalidColor {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_and_hex_colors() {
        assert!(parse_color("white").is_ok());
        assert!(parse_color("TRANSPARENT").is_ok());
        let c = parse_color("#faf7f2").unwrap();
        assert!(c.red() > 0.9);
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("#fff").is_err());
        assert!(parse_color("mauve-ish").is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let doc = ChartDocument::new(100, 100);
        assert!(matches!(
            rasterize(&doc, 0, 100, "white"),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn empty_scene_rasterizes_to_requested_dimensions() {
        let doc = ChartDocument::new(1080, 540);
        let png = rasterize(&doc, 1080, 540, "white").unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 1080);
        assert_eq!(decoded.height(), 540);
    }

    #[test]
    fn scale_follows_requested_output_size() {
        let mut doc = ChartDocument::new(100, 100);
        doc.rect(0.0, 0.0, 100.0, 100.0, 0.0, "#000000");
        let png = rasterize(&doc, 200, 200, "white").unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.width(), 200);
        // The full-bleed rect scales with the output: the center stays black.
        assert_eq!(decoded.get_pixel(100, 100)[0], 0);
    }
}
