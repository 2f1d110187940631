//! Report rendering from aggregated call data.
//!
//! Builds the post-call HTML report page and a compact text summary.

use crate::aggregations::CallReport;

/// Renders a [`CallReport`] for humans.
pub struct ReportGenerator;

impl ReportGenerator {
    /// Render the full post-call report page.
    ///
    /// Self-contained HTML: summary cards, a ranked emotion breakdown with
    /// bar rows, and the raw percentage map embedded as JSON for the chart
    /// script.
    pub fn html_report(report: &CallReport) -> String {
        let ranked = report.ranked_emotions();
        let dominant = report
            .dominant_emotion()
            .unwrap_or_else(|| "neutral".to_string());
        // `<` is escaped so a label can't terminate the script tag.
        let chart_data = serde_json::to_string(&report.emotion_percentages)
            .unwrap_or_else(|_| "{}".into())
            .replace('<', "\\u003c");

        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        page.push_str("<meta charset=\"utf-8\">\n");
        page.push_str("<title>Call Report</title>\n");
        page.push_str("<style>\n");
        page.push_str(
            "body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; color: #222; }\n\
             .cards { display: flex; gap: 1rem; }\n\
             .card { flex: 1; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; text-align: center; }\n\
             .card .value { font-size: 1.6rem; font-weight: bold; }\n\
             .bar-row { display: flex; align-items: center; gap: 0.5rem; margin: 0.25rem 0; }\n\
             .bar-label { width: 8rem; text-align: right; }\n\
             .bar { background: #4a90d9; height: 1rem; border-radius: 4px; }\n\
             footer { margin-top: 2rem; color: #888; font-size: 0.8rem; }\n",
        );
        page.push_str("</style>\n</head>\n<body>\n");

        page.push_str("<h1>Call Report</h1>\n");

        // Summary cards.
        page.push_str("<div class=\"cards\">\n");
        page.push_str(&format!(
            "<div class=\"card\"><div class=\"value\">{}</div>Dominant emotion</div>\n",
            escape_html(&dominant)
        ));
        page.push_str(&format!(
            "<div class=\"card\"><div class=\"value\">{:.1}%</div>Eye contact</div>\n",
            report.eye_contact_percentage
        ));
        page.push_str(&format!(
            "<div class=\"card\"><div class=\"value\">{}</div>Samples</div>\n",
            report.total_duration
        ));
        page.push_str("</div>\n");

        // Emotion breakdown.
        page.push_str("<h2>Emotion Breakdown</h2>\n");
        for (emotion, pct) in &ranked {
            page.push_str(&format!(
                "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
                 <div class=\"bar\" style=\"width: {:.1}%\"></div><span>{:.1}%</span></div>\n",
                escape_html(emotion),
                pct.min(100.0),
                pct
            ));
        }

        // Chart data for the doughnut renderer.
        page.push_str("<canvas id=\"emotions-chart\" width=\"400\" height=\"200\"></canvas>\n");
        page.push_str(&format!(
            "<script>const emotionData = {};\nconst eyeContactPercentage = {:.2};</script>\n",
            chart_data, report.eye_contact_percentage
        ));

        page.push_str(&format!(
            "<footer>Generated at {}</footer>\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        page.push_str("</body>\n</html>\n");

        page
    }

    /// Compact one-glance summary for logs and the CLI.
    pub fn text_summary(report: &CallReport) -> String {
        let mut output = String::new();

        output.push_str(&format!("  Samples: {}\n", report.total_duration));
        output.push_str(&format!(
            "  Eye contact: {:.1}%\n",
            report.eye_contact_percentage
        ));

        output.push_str("  Emotions:");
        for (emotion, pct) in report.ranked_emotions() {
            output.push_str(&format!(" {}({:.1}%)", emotion, pct));
        }
        output.push('\n');

        output
    }
}

/// Minimal HTML escaping for values interpolated into page markup.
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use callsense_core::types::EmotionSample;

    fn report(entries: &[(&str, bool)]) -> CallReport {
        let samples: Vec<EmotionSample> = entries
            .iter()
            .map(|(emotion, eye_contact)| EmotionSample::new(*emotion, *eye_contact))
            .collect();
        CallReport::from_samples(&samples)
    }

    #[test]
    fn test_html_report_structure() {
        let page = ReportGenerator::html_report(&report(&[
            ("happy", true),
            ("happy", false),
            ("sad", true),
        ]));

        assert!(page.contains("<h1>Call Report</h1>"));
        assert!(page.contains("Emotion Breakdown"));
        assert!(page.contains("happy"));
        assert!(page.contains("66.7%"));
        assert!(page.contains("const emotionData = "));
    }

    #[test]
    fn test_html_report_empty_session() {
        let page = ReportGenerator::html_report(&report(&[]));
        assert!(page.contains("neutral"));
        assert!(page.contains("100.0%"));
        assert!(page.contains("<div class=\"value\">1</div>Samples"));
    }

    #[test]
    fn test_html_report_escapes_labels() {
        let page = ReportGenerator::html_report(&report(&[("<script>alert(1)</script>", true)]));
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_text_summary() {
        let summary = ReportGenerator::text_summary(&report(&[("happy", true), ("sad", false)]));
        assert!(summary.contains("Samples: 2"));
        assert!(summary.contains("Eye contact: 50.0%"));
        assert!(summary.contains("happy(50.0%)"));
        assert!(summary.contains("sad(50.0%)"));
    }
}
