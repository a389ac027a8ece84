//! Bazi (Four Pillars) report rendering.
//!
//! This crate turns a birth date into a rendered astrological dashboard: it
//! validates the input, POSTs it to a remote calculation service, maps the
//! JSON response onto the report's display regions, and draws three
//! fixed-size vector charts (a four-pillars card, a five-elements bar
//! chart, and a circular share card) that can be rasterized to PNG.
//!
//! The actual Bazi computation lives entirely in the remote service; this
//! crate is the presentation half of that contract.
//!
//! ```no_run
//! use bazichart::{BirthInput, CalculationClient, CalendarType, Dashboard, Gender};
//!
//! # async fn run() {
//! let client = CalculationClient::new("http://localhost:5001/api/calculate");
//! let mut dashboard = Dashboard::new(client, 2024);
//! let input = BirthInput {
//!     year: 1990,
//!     month: 5,
//!     day: 15,
//!     hour: Some(14),
//!     gender: Gender::Male,
//!     calendar_type: CalendarType::Solar,
//! };
//! let view = dashboard.submit(&input).await;
//! if let Some(report) = view.report() {
//!     println!("balance: {:?}", report.balance);
//! }
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod log;
pub mod render;
pub mod report;
pub mod session;
pub mod types;
pub mod validate;

pub use client::{CalculationClient, DEFAULT_ENDPOINT};
pub use errors::{ClientError, RenderError, ValidationError};
pub use render::{
    rasterize, rasterize_to_file, ChartDocument, ChartRenderer, ELEMENTS_FILE_NAME,
    PILLARS_FILE_NAME, SHARE_CARD_FILE_NAME, SHARE_CARD_SIZE, WIDE_CHART_SIZE,
};
pub use report::{Report, ReportContext};
pub use session::{Dashboard, DashboardView, SubmitState, Tab, TabController};
pub use types::{BirthInput, CalculationResult, CalendarType, Element, Gender};
