//! Error types with diagnostic codes using miette.
//!
//! Every failure class maps to a single user-facing message: validation
//! errors say which rule failed, transport errors stay generic (no status
//! codes or stack traces leak to the end user), and a `success:false`
//! response shows the service-supplied string verbatim.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Validation Errors
// ============================================================================

/// Input validation failures, reported before any network call.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    #[diagnostic(code(bazichart::validate::missing_field))]
    MissingField,

    #[error("Please enter a valid year (1900-2100)")]
    #[diagnostic(code(bazichart::validate::year_out_of_range))]
    YearOutOfRange { year: i32 },

    #[error("Please enter a valid month (1-12)")]
    #[diagnostic(code(bazichart::validate::month_out_of_range))]
    MonthOutOfRange { month: u32 },

    #[error("Please enter a valid day (1-31)")]
    #[diagnostic(code(bazichart::validate::day_out_of_range))]
    DayOutOfRange { day: u32 },
}

// ============================================================================
// Client Errors
// ============================================================================

/// Failures of the single POST to the calculation endpoint.
///
/// Transport details are kept on the error for logging but the `Display`
/// text is the generic service-unavailable message in every transport case.
#[derive(Error, Diagnostic, Debug)]
pub enum ClientError {
    #[error("Network error. Please check if the calculation service is available.")]
    #[diagnostic(code(bazichart::client::transport))]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// Any non-2xx status, regardless of body.
    #[error("Network error. Please check if the calculation service is available.")]
    #[diagnostic(code(bazichart::client::status))]
    Status { status: reqwest::StatusCode },

    #[error("Network error. Please check if the calculation service is available.")]
    #[diagnostic(code(bazichart::client::malformed_response))]
    MalformedResponse {
        #[source]
        source: reqwest::Error,
    },

    /// `success: true` but no payload attached.
    #[error("Network error. Please check if the calculation service is available.")]
    #[diagnostic(code(bazichart::client::empty_payload))]
    EmptyPayload,

    /// The service answered `success: false`; its error string is shown
    /// verbatim.
    #[error("{message}")]
    #[diagnostic(code(bazichart::client::service))]
    Service { message: String },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors from serializing or rasterizing a chart scene.
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid raster dimensions {width}x{height}")]
    #[diagnostic(code(bazichart::render::invalid_dimensions))]
    InvalidDimensions { width: u32, height: u32 },

    #[error("invalid background color: {value}")]
    #[diagnostic(code(bazichart::render::invalid_color))]
    InvalidColor { value: String },

    #[error("SVG parse error: {message}")]
    #[diagnostic(code(bazichart::render::svg_parse))]
    SvgParse { message: String },

    #[error("PNG encoding failed")]
    #[diagnostic(code(bazichart::render::png_encode))]
    PngEncode {
        #[source]
        source: image::ImageError,
    },

    #[error("could not write chart file")]
    #[diagnostic(code(bazichart::render::io))]
    Io {
        #[from]
        source: std::io::Error,
    },
}
