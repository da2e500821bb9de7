//! Per-section rendering shared by every renderer.

use serde_json::Value;
use tracing::warn;

use crate::components::{
    AiSummaryData, CooccurrenceData, DescriptiveStats, NlpAnalysisData, SavedMessagesData,
};
use crate::error::ReportResult;
use crate::section::{SectionData, SectionKind, SectionRecord};

use super::{html_escape, safe_id};

/// Render one record as a `<section>` element.
///
/// The wrapper carries the section id so each section stays addressable in
/// both the screen and the print document.
pub fn render_section(record: &SectionRecord) -> String {
    let id = record.section_id.as_str();
    let (status, notice) = match record.status.reason() {
        Some(reason) => (
            "degraded",
            format!(
                r#"<div class="degraded-notice">This section is incomplete: {}</div>"#,
                html_escape(reason)
            ),
        ),
        None => ("complete", String::new()),
    };

    format!(
        r#"<section class="report-section" id="section-{anchor}" data-section="{id}" data-status="{status}">
<div class="section-header"><h2 class="section-title">{title}</h2></div>
{notice}{body}
</section>"#,
        anchor = safe_id(id),
        id = html_escape(id),
        status = status,
        title = html_escape(&record.title),
        notice = notice,
        body = render_body(record),
    )
}

fn render_body(record: &SectionRecord) -> String {
    let rendered: ReportResult<String> = match &record.section_id {
        SectionKind::AiSummary => record.data_as().map(|d| ai_summary(&d)),
        SectionKind::SavedMessages => record.data_as().map(|d| saved_messages(&d)),
        SectionKind::DescriptiveStats => record.data_as().map(|d| descriptive_stats(&d)),
        SectionKind::NlpAnalysis => record.data_as().map(|d| nlp_analysis(&d)),
        SectionKind::Cooccurrence => record.data_as().map(|d| cooccurrence(&d)),
        SectionKind::Custom(_) => return generic(&record.data),
    };

    rendered.unwrap_or_else(|e| {
        if !record.is_degraded() {
            warn!("Falling back to generic rendering: {}", e);
        }
        generic(&record.data)
    })
}

/// Label plus raw key/value dump for sections without dedicated markup.
fn generic(data: &SectionData) -> String {
    if data.is_empty() {
        return r#"<p class="no-data">No data</p>"#.to_string();
    }

    let mut html = String::from(r#"<dl class="generic-data">"#);
    for (key, value) in data {
        let value = match value {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            html_escape(key),
            html_escape(&value)
        ));
    }
    html.push_str("</dl>");
    html
}

fn percent_bar(label: &str, class: &str, percent: f64) -> String {
    let width = percent.clamp(0.0, 100.0);
    format!(
        r#"<div class="progress-item"><span>{label} ({width:.0}%)</span><div class="progress-bar"><div class="progress-fill progress-{class}" style="width: {width:.0}%"></div></div></div>"#,
        label = label,
        class = class,
        width = width,
    )
}

fn stat_card(value: &str, label: &str) -> String {
    format!(
        r#"<div class="stat-card"><span class="stat-value">{}</span><span class="stat-label">{}</span></div>"#,
        html_escape(value),
        label
    )
}

fn ai_summary(data: &AiSummaryData) -> String {
    let mut html = format!(
        r#"<div class="summary-content"><p class="summary-text">{}</p>"#,
        html_escape(&data.summary)
    );

    if !data.themes.is_empty() {
        html.push_str(r#"<div class="themes-section"><h3>Key Themes Identified</h3><ul class="themes-list">"#);
        for theme in &data.themes {
            html.push_str(&format!("<li>{}</li>", html_escape(theme)));
        }
        html.push_str("</ul></div>");
    }

    if !data.progress_notes.is_empty() {
        html.push_str(&format!(
            r#"<div class="progress-notes"><h3>Progress Notes</h3><p>{}</p></div>"#,
            html_escape(&data.progress_notes)
        ));
    }

    if let Some(model) = &data.generated_with {
        html.push_str(&format!(
            r#"<p class="generated-by">Generated with {}</p>"#,
            html_escape(model)
        ));
    }

    html.push_str("</div>");
    html
}

fn saved_messages(data: &SavedMessagesData) -> String {
    if data.messages.is_empty() {
        return r#"<p class="no-data">No saved messages</p>"#.to_string();
    }

    let mut html = format!(
        r#"<p class="saved-count">{} saved message{}</p>"#,
        data.total_count,
        if data.total_count == 1 { "" } else { "s" }
    );
    for message in &data.messages {
        let note = message
            .note
            .as_deref()
            .map(|n| format!(r#"<p class="message-note">Note: {}</p>"#, html_escape(n)))
            .unwrap_or_default();
        html.push_str(&format!(
            r#"<div class="saved-message" data-message-id="{id}"><p class="message-text">&ldquo;{text}&rdquo;</p>{note}<p class="message-date">{role} &middot; {date}</p></div>"#,
            id = html_escape(&message.id),
            text = html_escape(&message.text),
            note = note,
            role = message.role.display_name(),
            date = html_escape(&message.timestamp_formatted),
        ));
    }
    html
}

fn descriptive_stats(data: &DescriptiveStats) -> String {
    let mut html = String::from(r#"<div class="stats-grid">"#);
    for (value, label) in [
        (data.total_messages.to_string(), "Total Messages"),
        (data.user_messages.to_string(), "User Messages"),
        (data.assistant_messages.to_string(), "AI Responses"),
        (format!("{:.2}h", data.session_duration_hours), "Session Duration"),
        (format!("{:.0}", data.avg_words_per_user_message), "Avg Words/User Msg"),
        (data.total_words.to_string(), "Total Words"),
        (data.conversations_count.to_string(), "Conversations"),
        (format!("{:.1}", data.average_messages_per_chat), "Avg Messages/Chat"),
    ] {
        html.push_str(&stat_card(&value, label));
    }
    html.push_str("</div>");

    let times = &data.response_times;
    if times.count > 0 {
        html.push_str(&format!(
            r#"<h3>Response Times</h3><table class="data-table response-times"><tr><th>Replies</th><th>Min</th><th>Median</th><th>Mean</th><th>Max</th></tr><tr><td>{}</td><td>{:.1}s</td><td>{:.1}s</td><td>{:.1}s</td><td>{:.1}s</td></tr></table>"#,
            times.count, times.min_seconds, times.median_seconds, times.mean_seconds, times.max_seconds
        ));
    }

    if !data.messages_by_day.is_empty() {
        html.push_str(r#"<h3>Messages by Day</h3><table class="data-table messages-by-day"><tr><th>Day</th><th>User</th><th>Assistant</th></tr>"#);
        for (day, counts) in &data.messages_by_day {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(day),
                counts.user,
                counts.assistant
            ));
        }
        html.push_str("</table>");
    }

    html
}

fn nlp_analysis(data: &NlpAnalysisData) -> String {
    if data.message_count == 0 {
        return r#"<p class="no-data">No messages to analyze</p>"#.to_string();
    }

    let shares = &data.sentiment_percentages;
    let mut html = format!(
        r#"<div class="nlp-grid">
<div class="nlp-card sentiment"><h3 class="nlp-title">Sentiment Analysis</h3><div class="sentiment-score">Overall: {score:.2} ({label})</div>{positive}{neutral}{negative}</div>
<div class="nlp-card voice"><h3 class="nlp-title">Voice Analysis</h3>{active}{passive}<p class="nlp-note">Questions: {questions:.0}% of messages</p></div>
</div>"#,
        score = data.average_sentiment,
        label = data.overall_label,
        positive = percent_bar("Positive", "positive", shares.positive),
        neutral = percent_bar("Neutral", "neutral", shares.neutral),
        negative = percent_bar("Negative", "negative", shares.negative),
        active = percent_bar("Active Voice", "active", data.voice.active_ratio * 100.0),
        passive = percent_bar("Passive Voice", "passive", data.voice.passive_ratio * 100.0),
        questions = data.question_frequency,
    );

    if !data.top_keywords.is_empty() {
        html.push_str(r#"<h3>Top Keywords</h3><table class="data-table keywords"><tr><th>Keyword</th><th>Category</th><th>Count</th></tr>"#);
        for keyword in &data.top_keywords {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&keyword.keyword),
                html_escape(&keyword.category),
                keyword.occurrences
            ));
        }
        html.push_str("</table>");
    }

    if !data.questions.is_empty() {
        html.push_str(r#"<h3>Questions Asked</h3><ul class="questions-list">"#);
        for question in &data.questions {
            html.push_str(&format!(
                r#"<li data-message-id="{}">{}</li>"#,
                html_escape(&question.message_id),
                html_escape(&question.text)
            ));
        }
        html.push_str("</ul>");
    }

    html
}

fn cooccurrence(data: &CooccurrenceData) -> String {
    let analysis = &data.analysis;
    if analysis.top_words.is_empty() {
        return r#"<p class="no-data">Not enough text for co-occurrence analysis</p>"#.to_string();
    }

    let mut html = format!(
        r#"<p class="nlp-note">{} unique words across {} sentences</p><table class="data-table top-words"><tr><th>Word</th><th>Count</th></tr>"#,
        analysis.total_unique_words, analysis.total_sentences
    );
    for word in &analysis.top_words {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>",
            html_escape(&word.word),
            word.count
        ));
    }
    html.push_str("</table>");

    if analysis.pairs.is_empty() {
        html.push_str(r#"<p class="no-data">No word pairs occur together often enough</p>"#);
    } else {
        html.push_str(r#"<h3>Strongest Pairs</h3><ul class="pair-list">"#);
        for pair in &analysis.pairs {
            html.push_str(&format!(
                "<li>{} &amp; {} ({})</li>",
                html_escape(&pair.first),
                html_escape(&pair.second),
                pair.count
            ));
        }
        html.push_str("</ul>");
    }

    html
}
