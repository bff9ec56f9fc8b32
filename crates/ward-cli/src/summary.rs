//! Aligned text rendering of stage quality reports.

use ward_core::quality::QualityReport;

const HEADERS: &[&str] = &[
    "stage",
    "seen",
    "emitted",
    "rejected",
    "deduped",
    "unlinked",
    "ambiguous",
];

/// Render stage summaries as a simple aligned table: stage names left,
/// counts right.
#[must_use]
pub fn render_reports(reports: &[QualityReport]) -> String {
    let rows: Vec<Vec<String>> = reports
        .iter()
        .map(|report| {
            vec![
                report.stage.clone(),
                report.rows_seen.to_string(),
                report.rows_emitted.to_string(),
                report.rows_rejected.to_string(),
                report.rows_deduplicated.to_string(),
                report.rows_unlinked.to_string(),
                report.ambiguous_matches.to_string(),
            ]
        })
        .collect();

    let widths: Vec<usize> = HEADERS
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect();

    let header_line = HEADERS
        .iter()
        .zip(widths.iter().copied())
        .map(|(header, width)| format!("{header:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(header_line.len());

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = row
            .iter()
            .zip(widths.iter().copied())
            .enumerate()
            .map(|(index, (value, width))| {
                if index == 0 {
                    format!("{value:<width$}")
                } else {
                    format!("{value:>width$}")
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line);
    }
    lines.join("\n")
}
