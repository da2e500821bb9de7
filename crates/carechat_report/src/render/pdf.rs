use super::{render_document, ReportHeader, Renderer};
use crate::section::SectionRecord;
use crate::styles;

/// Print renderer producing HTML for an external PDF converter.
///
/// Uses print styles and separates sections with explicit page breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PdfRenderer {
    fn styles(&self) -> String {
        styles::pdf_styles()
    }

    fn render(
        &self,
        header: &ReportHeader,
        sections: &[SectionRecord],
        styles: &str,
        standalone: bool,
    ) -> String {
        render_document(header, sections, styles, standalone, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HtmlRenderer;
    use crate::section::SectionKind;
    use chrono::Utc;
    use carechat_session::SessionMetadata;
    use serde_json::json;

    #[test]
    fn test_page_breaks_between_sections_only() {
        let header = ReportHeader::from_metadata(&SessionMetadata::new("t"), Utc::now());
        let sections: Vec<SectionRecord> = ["one", "two", "three"]
            .iter()
            .map(|id| {
                SectionRecord::complete(SectionKind::from_id(id), *id, &json!({"k": "v"})).unwrap()
            })
            .collect();

        let pdf = PdfRenderer.render(&header, &sections, &PdfRenderer.styles(), true);
        assert_eq!(pdf.matches(r#"<div class="page-break"></div>"#).count(), 2);
        assert!(pdf.contains("@page"));

        let html = HtmlRenderer.render(&header, &sections, &HtmlRenderer.styles(), true);
        assert!(!html.contains(r#"<div class="page-break">"#));
        assert!(!html.contains("@page"));
    }
}
