//! Markdown report generator

use crate::core::report::{ReportContext, ReportGenerator, ReportView};
use askama::Template;
use std::error::Error;

#[derive(Template)]
#[template(path = "tracker_report.md", escape = "none")]
struct MarkdownTemplate<'a> {
    view: &'a ReportView,
}

/// Markdown report generator
#[derive(Debug, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let view = ctx.view();
        Ok(MarkdownTemplate { view: &view }.render()?)
    }
}
