use super::{render_document, ReportHeader, Renderer};
use crate::section::SectionRecord;
use crate::styles;

/// Screen renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for HtmlRenderer {
    fn styles(&self) -> String {
        styles::html_styles()
    }

    fn render(
        &self,
        header: &ReportHeader,
        sections: &[SectionRecord],
        styles: &str,
        standalone: bool,
    ) -> String {
        render_document(header, sections, styles, standalone, false)
    }
}
