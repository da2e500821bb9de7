//! Renderers turning ordered section records into HTML.
//!
//! Both renderers share [`sections::render_section`], so a section's markup
//! is identical on screen and in print. They differ only in stylesheet and
//! in the page breaks the print renderer places between sections.

mod html;
mod pdf;
pub mod sections;

use chrono::{DateTime, Utc};
use carechat_session::{ParticipantKind, SessionMetadata};
use serde::{Deserialize, Serialize};

use crate::section::SectionRecord;

pub use html::HtmlRenderer;
pub use pdf::PdfRenderer;
pub use sections::render_section;

/// Turns section records into a document.
pub trait Renderer: Send + Sync {
    /// Stylesheet this renderer embeds by default
    fn styles(&self) -> String;

    /// Render `sections` in order. `standalone` selects a full HTML5
    /// document over an embeddable fragment.
    fn render(
        &self,
        header: &ReportHeader,
        sections: &[SectionRecord],
        styles: &str,
        standalone: bool,
    ) -> String;
}

/// Document header, built from session metadata alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub session_id: String,
    pub title: String,
    pub description: Option<String>,
    /// "Name (role)" per participant
    pub participants: Vec<String>,
    pub session_started: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
}

impl ReportHeader {
    pub fn from_metadata(metadata: &SessionMetadata, generated_at: DateTime<Utc>) -> Self {
        Self {
            session_id: metadata.id.clone(),
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            participants: metadata
                .participants
                .iter()
                .map(|p| {
                    let role = match p.kind {
                        ParticipantKind::Patient => "patient",
                        ParticipantKind::Clinician => "clinician",
                    };
                    format!("{} ({})", p.display_name, role)
                })
                .collect(),
            session_started: metadata.created_at,
            generated_at,
        }
    }
}

/// Replace characters outside `[A-Za-z0-9_-]` with `_`, for ids that end
/// up in file names or HTML id attributes.
pub fn safe_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Escape text for HTML element content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn render_header(header: &ReportHeader) -> String {
    let description = header
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="report-description">{}</p>"#, html_escape(d)))
        .unwrap_or_default();

    let participants = if header.participants.is_empty() {
        "None recorded".to_string()
    } else {
        html_escape(&header.participants.join(", "))
    };

    format!(
        r#"<header class="report-header">
<h1>{title}</h1>
{description}<div class="report-meta">
<div class="meta-item"><div class="meta-label">Participants</div><div class="meta-value">{participants}</div></div>
<div class="meta-item"><div class="meta-label">Session Started</div><div class="meta-value">{started}</div></div>
<div class="meta-item"><div class="meta-label">Report Generated</div><div class="meta-value">{generated}</div></div>
</div>
</header>"#,
        title = html_escape(&header.title),
        description = description,
        participants = participants,
        started = header.session_started.format("%Y-%m-%d %H:%M"),
        generated = header.generated_at.format("%Y-%m-%d %H:%M"),
    )
}

/// Lay out header and sections, optionally as a full document.
pub(crate) fn render_document(
    header: &ReportHeader,
    sections: &[SectionRecord],
    styles: &str,
    standalone: bool,
    print_mode: bool,
) -> String {
    let separator = if print_mode {
        "\n<div class=\"page-break\"></div>\n"
    } else {
        "\n"
    };
    let body = sections
        .iter()
        .map(render_section)
        .collect::<Vec<_>>()
        .join(separator);

    let report = format!(
        r#"<div class="unified-report{mode}" data-session="{session}">
{header}
<div class="report-content">
{body}
</div>
</div>"#,
        mode = if print_mode { " print-mode" } else { "" },
        session = html_escape(&header.session_id),
        header = render_header(header),
        body = body,
    );

    if !standalone {
        return format!("<style>{}</style>\n{}", styles, report);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} - Session Report</title>
<style>{styles}</style>
</head>
<body>
{report}
</body>
</html>
"#,
        title = html_escape(&header.title),
        styles = styles,
        report = report,
    )
}
