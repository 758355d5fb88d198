//! Terminal rendering of claim reports

use std::fmt::Write;

use clap::ValueEnum;

use crate::domain::{ClaimReport, Verdict};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Render a report for the terminal
pub fn render(report: &ClaimReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Pretty => Ok(render_pretty(report)),
    }
}

fn verdict_badge(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::True => "[TRUE]",
        Verdict::False => "[FALSE]",
        Verdict::Unverifiable => "[UNVERIFIABLE]",
        Verdict::Error => "[ERROR]",
        Verdict::Other(_) => "[?]",
    }
}

fn render_pretty(report: &ClaimReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{} Verdict: {}", verdict_badge(&report.verdict), report.verdict);
    let _ = writeln!(out, "Reasoning: {}", report.reasoning);

    if !report.evidence_used.is_empty() {
        let _ = writeln!(out, "\nEvidence used:");
        for evidence in &report.evidence_used {
            let _ = writeln!(out, "  - {}", evidence);
        }
    }

    match &report.metadata {
        Some(_) => {
            let _ = writeln!(out, "\nRetrieved facts:");
            for (fact, score) in report
                .retrieved_context()
                .iter()
                .zip(report.confidence_scores())
            {
                let _ = writeln!(out, "  - [{:.2}] {}", score, fact);
            }

            let entities = report.entities_detected();
            let _ = writeln!(
                out,
                "\nEntities: {}",
                if entities.is_empty() {
                    "none".to_string()
                } else {
                    entities.join(", ")
                }
            );
        }
        None => {
            let _ = writeln!(out, "\nNo retrieval metadata available.");
        }
    }

    if let Some(raw) = &report.raw_response {
        let _ = writeln!(out, "\nRaw model output:\n{}", raw);
    }

    out
}
