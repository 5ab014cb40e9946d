//! HTML report generator
//!
//! Produces a single self-contained page with inline styles.

use crate::core::report::{ReportContext, ReportGenerator, ReportView};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "tracker_report.html")]
struct HtmlTemplate<'a> {
    view: &'a ReportView,
}

/// HTML report generator
#[derive(Debug, Default)]
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let view = ctx.view();
        Ok(HtmlTemplate { view: &view }.render()?)
    }
}
