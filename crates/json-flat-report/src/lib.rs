//! Rendering of comparison sessions.
//!
//! This crate owns the presentation side of a comparison run: the fixed-format
//! text summary table and the HTML report produced by substituting named
//! placeholders into a template. It only reads the session's accessors and
//! never feeds anything back into the comparison.

use json_flat_compare::{ComparisonSession, Status};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// The HTML template shipped with the crate. Callers may substitute their own
/// template string as long as it carries the same `${...}` placeholders.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.html");

/// Errors raised while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Status icon shown next to the status line.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Green => "🟢",
        Status::Red => "🔴",
    }
}

/// Theme color used by the HTML report.
pub fn theme_color(status: Status) -> &'static str {
    match status {
        Status::Green => "#4CAF50",
        Status::Red => "#e74c3c",
    }
}

/// Renders the plain-text summary table for a session.
///
/// The layout is fixed: a header block, the overall counts and status, the
/// per-category breakdown sorted by count descending, and the detailed error
/// table.
pub fn render_summary(session: &ComparisonSession) -> String {
    let status = session.status();
    let mut out = String::new();

    out.push_str("\n=========================\n");
    out.push_str("     Summary Report      \n");
    out.push_str("=========================\n\n");
    let _ = writeln!(out, "✅ Total Fields Compared: {}", session.total_fields());
    let _ = writeln!(out, "🎯 Successful Matches: {}", session.match_count());
    let _ = writeln!(out, "❌ Failed Matches: {}", session.failure_count());
    let _ = writeln!(out, "{} Status: {}", status_icon(status), status);

    out.push_str("\nMismatch Breakdown:\n");
    out.push_str("=====================================================\n");
    for (category, count) in breakdown(session) {
        let _ = writeln!(out, "{:<20} | {count}", category.name());
    }
    out.push_str("=====================================================\n\n");

    out.push_str("Detailed Errors:\n");
    out.push_str("=========================\n");
    out.push_str("Type              | Message\n");
    out.push_str("-----------------|------------------------------------------------------------\n");
    for mismatch in session.mismatches() {
        let _ = writeln!(out, "{:<18} | {}", mismatch.category.name(), mismatch.message);
    }
    out.push_str("=========================\n");

    out
}

/// Renders the HTML report by substituting the session into `template`.
///
/// Placeholders: `${totalFields}`, `${successfulMatches}`, `${failedMatches}`,
/// `${status}`, `${statusIcon}`, `${themeColor}`, `${mismatchBreakdown}`,
/// `${successfulMatchesTable}`, `${detailedErrors}`. Every occurrence of a
/// placeholder is replaced. Table cell content is HTML-escaped.
pub fn render_html(session: &ComparisonSession, template: &str) -> String {
    let status = session.status();

    let breakdown_rows: String = breakdown(session)
        .map(|(category, count)| format!("<tr><td>{}</td><td>{count}</td></tr>", category.name()))
        .collect();

    let match_rows = if session.matches().is_empty() {
        "<tr><td colspan='2' class='none'>NONE</td></tr>".to_string()
    } else {
        session
            .matches()
            .iter()
            .map(|m| {
                format!(
                    "<tr><td>{}</td><td>{}</td></tr>",
                    escape_html(&m.path),
                    escape_html(&m.value.to_string())
                )
            })
            .collect()
    };

    let error_rows = if session.mismatches().is_empty() {
        "<tr><td colspan='2' class='none'>NONE</td></tr>".to_string()
    } else {
        session
            .mismatches()
            .iter()
            .map(|m| {
                format!(
                    "<tr><td>{}</td><td>{}</td></tr>",
                    m.category.name(),
                    escape_html(&m.message)
                )
            })
            .collect()
    };

    template
        .replace("${totalFields}", &session.total_fields().to_string())
        .replace("${successfulMatches}", &session.match_count().to_string())
        .replace("${failedMatches}", &session.failure_count().to_string())
        .replace("${status}", &status.to_string())
        .replace("${statusIcon}", status_icon(status))
        .replace("${themeColor}", theme_color(status))
        .replace("${mismatchBreakdown}", &breakdown_rows)
        .replace("${successfulMatchesTable}", &match_rows)
        .replace("${detailedErrors}", &error_rows)
}

/// Renders the HTML report and writes it to `path`.
///
/// # Errors
///
/// Returns [`ReportError::Io`] when the file cannot be written.
pub fn save_html(
    session: &ComparisonSession,
    template: &str,
    path: &Path,
) -> Result<(), ReportError> {
    fs::write(path, render_html(session, template))?;
    Ok(())
}

/// Category counts sorted by count descending; ties keep the canonical
/// category order.
fn breakdown(
    session: &ComparisonSession,
) -> impl Iterator<Item = (json_flat_compare::MismatchCategory, usize)> {
    let mut rows: Vec<_> = session.counts().iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows.into_iter()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
