//! Stylesheets embedded in rendered reports.
//!
//! Every rule is scoped under `.unified-report` so a fragment can be
//! embedded in another page without leaking styles.

pub const BASE_CSS: &str = r#"
.unified-report {
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
  max-width: 1000px;
  margin: 0 auto;
  background: #fff;
  color: #1a1a1a;
  border-radius: 12px;
  box-shadow: 0 4px 20px rgba(0, 0, 0, 0.1);
  overflow: hidden;
}
.unified-report .report-header {
  background: linear-gradient(135deg, #0066cc 0%, #4a90e2 100%);
  color: #fff;
  padding: 2rem;
  text-align: center;
}
.unified-report .report-header h1 { margin: 0 0 1rem; font-size: 2rem; font-weight: 300; }
.unified-report .report-description { opacity: 0.9; margin-bottom: 1.5rem; }
.unified-report .report-meta {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
  gap: 1rem;
}
.unified-report .meta-item { background: rgba(255, 255, 255, 0.1); padding: 0.75rem; border-radius: 8px; }
.unified-report .meta-label { font-size: 0.9rem; opacity: 0.9; }
.unified-report .meta-value { font-size: 1.1rem; font-weight: 600; }
.unified-report .report-section { border-bottom: 1px solid #f0f0f0; padding: 2rem; }
.unified-report .report-section:last-child { border-bottom: none; }
.unified-report .section-header {
  margin-bottom: 1.5rem;
  padding-bottom: 0.75rem;
  border-bottom: 2px solid #e6f3ff;
}
.unified-report .section-title { font-size: 1.3rem; font-weight: 600; color: #003d7a; margin: 0; }
.unified-report .degraded-notice {
  background: #fff4e5;
  border-left: 4px solid #f0a030;
  border-radius: 8px;
  padding: 0.75rem 1rem;
  margin-bottom: 1rem;
  color: #7a4a00;
}
.unified-report .summary-content {
  background: #f0f8ff;
  border-left: 4px solid #0066cc;
  border-radius: 12px;
  padding: 1.5rem;
}
.unified-report .summary-text { font-size: 1.05rem; line-height: 1.6; }
.unified-report .themes-list { list-style: none; padding: 0; }
.unified-report .themes-list li {
  background: #e6f3ff;
  border-left: 3px solid #0066cc;
  border-radius: 8px;
  margin: 0.5rem 0;
  padding: 0.75rem 1rem;
}
.unified-report .stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
  gap: 1rem;
  margin: 1.5rem 0;
}
.unified-report .stat-card {
  background: linear-gradient(135deg, #0066cc 0%, #4a90e2 100%);
  color: #fff;
  padding: 1.5rem;
  border-radius: 12px;
  text-align: center;
}
.unified-report .stat-value { display: block; font-size: 2rem; font-weight: 700; }
.unified-report .stat-label { font-size: 0.9rem; }
.unified-report .data-table { width: 100%; border-collapse: collapse; margin: 1rem 0; }
.unified-report .data-table th,
.unified-report .data-table td { text-align: left; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e6f3ff; }
.unified-report .nlp-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(250px, 1fr));
  gap: 1.5rem;
}
.unified-report .nlp-card { border: 2px solid #e6f3ff; border-radius: 12px; padding: 1.5rem; }
.unified-report .nlp-title { font-weight: 600; color: #003d7a; font-size: 1.1rem; }
.unified-report .progress-item { margin-bottom: 1rem; font-size: 0.9rem; }
.unified-report .progress-bar { background: #e6f3ff; border-radius: 10px; height: 12px; overflow: hidden; }
.unified-report .progress-fill { height: 100%; border-radius: 10px; }
.unified-report .progress-positive { background: #00a86b; }
.unified-report .progress-neutral { background: #999; }
.unified-report .progress-negative { background: #ff6b6b; }
.unified-report .progress-active { background: #0066cc; }
.unified-report .progress-passive { background: #9370db; }
.unified-report .saved-message {
  background: #f0f8ff;
  border-left: 4px solid #0066cc;
  border-radius: 8px;
  padding: 1rem;
  margin: 1rem 0;
}
.unified-report .message-text { font-style: italic; color: #003d7a; }
.unified-report .message-note { color: #0066cc; font-size: 0.9rem; }
.unified-report .message-date { color: #999; font-size: 0.85rem; margin: 0; }
.unified-report .generated-by { text-align: right; font-size: 0.85rem; color: #666; font-style: italic; }
.unified-report .no-data { color: #666; font-style: italic; text-align: center; padding: 2rem; }
.unified-report .generic-data dt { font-weight: 600; color: #003d7a; }
.unified-report .generic-data dd { margin: 0 0 0.75rem; font-family: monospace; white-space: pre-wrap; }
"#;

pub const PRINT_CSS: &str = r#"
@page { size: A4; margin: 1cm; }
.unified-report.print-mode { box-shadow: none; border-radius: 0; max-width: 100%; }
.unified-report .report-section { page-break-inside: avoid; }
.unified-report .report-header { page-break-after: avoid; }
.unified-report .page-break { page-break-after: always; break-after: page; height: 0; }
.unified-report .stats-grid,
.unified-report .nlp-grid { grid-template-columns: repeat(2, 1fr); }
"#;

/// Styles for on-screen viewing.
pub fn html_styles() -> String {
    BASE_CSS.to_string()
}

/// Styles for print and PDF conversion.
pub fn pdf_styles() -> String {
    format!("{}{}", BASE_CSS, PRINT_CSS)
}
