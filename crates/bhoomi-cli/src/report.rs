//! Text report card for an analysed case.
//!
//! Renders an [`AnalysisRecord`] as grouped, human-readable sections in the
//! same order as the exported case report.

use std::fmt::Write;

use bhoomi_core::{AnalysisRecord, CaseRecord};
use chrono::{DateTime, Utc};

const DISCLAIMER: &str = "\
IMPORTANT DISCLAIMER: This report is generated by an AI system for informational purposes only \
and should not be considered as legal advice. The analysis is based on the information provided \
and general legal principles. For specific legal advice, please consult with a qualified property \
lawyer in Bangalore who can review your case in detail.";

// ── Public API ──

/// Print a stored case as a report card.
pub fn print_case_report(case: &CaseRecord) {
    print!("{}", render_case_report(case, Utc::now()));
}

/// Print a bare analysis (no stored case) as a report card.
pub fn print_analysis(record: &AnalysisRecord) {
    print!("{}", render_analysis(record));
}

pub fn render_case_report(case: &CaseRecord, generated: DateTime<Utc>) -> String {
    let mut out = String::new();
    heading(&mut out, &case.title);
    field(&mut out, "Dispute Type", case.dispute_type.label());
    field(&mut out, "Case ID", &case.id.to_string());
    field(&mut out, "Status", case.status.as_str());
    field(&mut out, "Filed", &case.created_at.format("%B %d, %Y").to_string());
    field(&mut out, "Analysis Date", &case.updated_at.format("%B %d, %Y").to_string());
    out.push('\n');

    out.push_str(&render_analysis(&case.analysis));

    let _ = writeln!(
        out,
        "Generated by Bhoomi on {}",
        generated.format("%B %d, %Y at %I:%M %p UTC")
    );
    out
}

pub fn render_analysis(record: &AnalysisRecord) -> String {
    let mut out = String::new();

    section(&mut out, "Confidence Assessment");
    let _ = writeln!(out, "  Confidence Score: {}/10", record.confidence_score);
    let _ = writeln!(out, "  {}", record.band().explanation());
    out.push('\n');

    section(&mut out, "Case Summary");
    field(&mut out, "Facts", &record.case_summary.facts);
    field(&mut out, "Claims", &record.case_summary.claims);
    field(&mut out, "Dispute Nature", &record.case_summary.dispute_nature);
    out.push('\n');

    numbered(&mut out, "Key Legal Issues", &record.legal_issues);

    section(&mut out, "Applicable Laws");
    for law in &record.applicable_laws {
        let _ = writeln!(out, "  - {}", law.law);
        let _ = writeln!(out, "      {}", law.relevance);
    }
    out.push('\n');

    bulleted(&mut out, "Missing Evidence", &record.missing_evidence);

    section(&mut out, "Legal Strategies");
    if !record.strategies.plaintiff.is_empty() {
        let _ = writeln!(out, "  For Plaintiff:");
        for s in &record.strategies.plaintiff {
            let _ = writeln!(out, "    - {s}");
        }
    }
    if !record.strategies.defendant.is_empty() {
        let _ = writeln!(out, "  For Defendant:");
        for s in &record.strategies.defendant {
            let _ = writeln!(out, "    - {s}");
        }
    }
    out.push('\n');

    if !record.precedents.is_empty() {
        section(&mut out, "Precedents");
        for p in &record.precedents {
            let _ = writeln!(out, "  - {}", p.case);
            let _ = writeln!(out, "      {}", p.relevance);
        }
        out.push('\n');
    }

    numbered(&mut out, "Recommended Next Steps", &record.next_steps);

    section(&mut out, "Timeline & Cost Estimates");
    field(&mut out, "Estimated Timeline", &record.estimated_timeline);
    field(&mut out, "Estimated Costs", &record.estimated_costs);
    out.push('\n');

    let _ = writeln!(out, "{DISCLAIMER}\n");
    out
}

// ── Section rendering ──

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "=== {title} ===");
}

fn section(out: &mut String, header: &str) {
    let _ = writeln!(out, "{header}");
}

fn field(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(out, "  {:<20} {}", name, value);
}

fn numbered(out: &mut String, header: &str, items: &[String]) {
    section(out, header);
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {item}", i + 1);
    }
    out.push('\n');
}

fn bulleted(out: &mut String, header: &str, items: &[String]) {
    section(out, header);
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
    out.push('\n');
}
