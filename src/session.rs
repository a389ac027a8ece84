//! The submit lifecycle: one validation + request + render cycle per
//! submission, with the dashboard holding the single most-recent result.
//!
//! The state machine is `Idle -> Validating -> (Idle on validation failure)
//! -> Submitting -> (Rendered | ErrorShown) -> Idle`. Only one submission
//! can be in flight; re-entrancy is prevented (the submit control stays
//! disabled while busy), not cancelled - an in-flight request cannot be
//! aborted. Every exit path clears the loading state and resolves to either
//! a rendered report or a rendered error, never an unhandled failure.

use crate::client::CalculationClient;
use crate::render::{ChartDocument, ChartRenderer};
use crate::report::{Report, ReportContext};
use crate::types::{BirthInput, CalculationResult};
use crate::validate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Rendered,
    ErrorShown,
}

/// Which result region is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Results,
    Error,
}

/// Boundary to the surrounding page chrome: switches the visible region and
/// brings it into view. The dashboard calls it after every render.
pub trait TabController {
    fn activate(&mut self, tab: Tab);
}

/// What the dashboard currently shows. Showing an error hides the report
/// and vice versa; there is exactly one visible outcome at a time.
#[derive(Debug, Clone)]
pub enum DashboardView {
    Empty,
    Report(Box<Report>),
    Error(String),
}

impl DashboardView {
    pub fn report(&self) -> Option<&Report> {
        match self {
            DashboardView::Report(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DashboardView::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Owns the client, the chart scenes, and the last received result.
pub struct Dashboard {
    client: CalculationClient,
    current_year: i32,
    state: SubmitState,
    view: DashboardView,
    last_result: Option<CalculationResult>,
    charts: ChartRenderer,
    tabs: Option<Box<dyn TabController>>,
}

impl Dashboard {
    pub fn new(client: CalculationClient, current_year: i32) -> Self {
        Self {
            client,
            current_year,
            state: SubmitState::Idle,
            view: DashboardView::Empty,
            last_result: None,
            charts: ChartRenderer::new(),
            tabs: None,
        }
    }

    /// Register the page's tab switcher.
    pub fn set_tab_controller(&mut self, tabs: Box<dyn TabController>) {
        self.tabs = Some(tabs);
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// True while a submission is running; the submit control must stay
    /// disabled for the duration.
    pub fn is_busy(&self) -> bool {
        !matches!(self.state, SubmitState::Idle)
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn last_result(&self) -> Option<&CalculationResult> {
        self.last_result.as_ref()
    }

    pub fn charts(&self) -> &ChartRenderer {
        &self.charts
    }

    /// Run one full submission: validate, call the service, render.
    ///
    /// Validation failures abort before any network call. All failure
    /// classes end up in the same error view with their user-facing
    /// message, and the state always returns to `Idle`.
    pub async fn submit(&mut self, input: &BirthInput) -> &DashboardView {
        if self.is_busy() {
            return &self.view;
        }

        self.state = SubmitState::Validating;
        if let Err(err) = validate(input) {
            self.show_error(err.to_string());
            self.state = SubmitState::Idle;
            return &self.view;
        }

        self.state = SubmitState::Submitting;
        match self.client.submit(input).await {
            Ok(result) => self.show_result(input.year, result),
            Err(err) => self.show_error(err.to_string()),
        }
        self.state = SubmitState::Idle;
        &self.view
    }

    /// Build the share card from the last result, on demand. The pillars
    /// and elements charts rebuild automatically on render; this one only
    /// when the user asks for it.
    pub fn build_share_card(&mut self) -> Option<&ChartDocument> {
        let result = self.last_result.as_ref()?;
        Some(self.charts.build_share_card(result))
    }

    fn show_result(&mut self, birth_year: i32, result: CalculationResult) {
        let ctx = ReportContext {
            birth_year,
            current_year: self.current_year,
        };
        let report = Report::build(&result, &ctx);
        self.charts.build_pillars_chart(&result);
        self.charts.build_elements_chart(&result);
        // Replaced wholesale; the previous result is never patched.
        self.last_result = Some(result);
        self.view = DashboardView::Report(Box::new(report));
        self.state = SubmitState::Rendered;
        if let Some(tabs) = &mut self.tabs {
            tabs.activate(Tab::Results);
        }
    }

    fn show_error(&mut self, message: String) {
        crate::log::debug!(message = %message, "showing error region");
        self.view = DashboardView::Error(message);
        self.state = SubmitState::ErrorShown;
        if let Some(tabs) = &mut self.tabs {
            tabs.activate(Tab::Error);
        }
    }
}
