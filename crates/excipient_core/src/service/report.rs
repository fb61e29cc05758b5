//! Report content for one checked formulation.
//!
//! Layout and PDF drawing belong to the caller; this module only decides
//! which lines the report carries.

use crate::model::name::ExcipientName;
use crate::model::pair::Finding;
use serde::Serialize;

pub const REPORT_TITLE: &str = "Excipient Incompatibility Report";
pub const NO_FINDINGS_LINE: &str = "✅ No incompatibilities found.";

/// Line-level report content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportContent {
    pub title: String,
    /// Excipients sorted alphabetically.
    pub excipient_lines: Vec<String>,
    /// One line per finding in finding order, or a single "none" line.
    pub finding_lines: Vec<String>,
}

impl ReportContent {
    pub fn new(excipients: &[ExcipientName], findings: &[Finding]) -> Self {
        let mut excipient_lines: Vec<String> =
            excipients.iter().map(|name| name.to_string()).collect();
        excipient_lines.sort();

        let finding_lines = if findings.is_empty() {
            vec![NO_FINDINGS_LINE.to_string()]
        } else {
            findings.iter().map(finding_line).collect()
        };

        Self {
            title: REPORT_TITLE.to_string(),
            excipient_lines,
            finding_lines,
        }
    }

    /// Plain-text rendering with an optional caller-supplied timestamp.
    pub fn render_text(&self, generated_at: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(stamp) = generated_at {
            out.push_str(&format!("Generated on: {stamp}\n"));
        }
        out.push_str(&self.title);
        out.push_str("\n\nFormulation Excipients:\n");
        for line in &self.excipient_lines {
            out.push_str(&format!("  {line}\n"));
        }
        out.push_str("\nIncompatibility Findings:\n");
        for line in &self.finding_lines {
            out.push_str(&format!("  {line}\n"));
        }
        out
    }
}

fn finding_line(finding: &Finding) -> String {
    format!(
        "❌ {} & {} – {}",
        finding.pair.first(),
        finding.pair.second(),
        finding.severity
    )
}
