//! Rendering of command payloads to stdout.
//!
//! JSON is the stable machine format; Markdown is for people reading a
//! terminal.

use crate::actions::ScriptedAction;
use crate::history::HistorySummary;
use crate::session::{DiagnosisState, SessionSnapshot};
use cps_common::{AcuityLevel, Diagnosis, OutputFormat};
use cps_config::Catalog;
use serde::Serialize;

/// Catalog entry as listed by `cps cases`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    pub code: Diagnosis,
    pub name: String,
    pub acuity: AcuityLevel,
    pub acuity_label: String,
    pub summary: String,
    pub hotline: String,
    pub definitive: String,
}

pub fn case_summaries(catalog: &Catalog) -> Vec<CaseSummary> {
    catalog
        .cases
        .iter()
        .map(|(dx, case)| CaseSummary {
            code: *dx,
            name: case.name.clone(),
            acuity: case.acuity,
            acuity_label: format!("{} {}", case.acuity.label(), case.acuity.description()),
            summary: case.summary.clone(),
            hotline: case.hotline.clone(),
            definitive: case.definitive.label.clone(),
        })
        .collect()
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn percent(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}

pub fn render_cases_md(cases: &[CaseSummary]) -> String {
    let mut lines = vec![
        "# Cases".to_string(),
        String::new(),
        "| Code | Name | Acuity | Definitive |".to_string(),
        "|------|------|--------|------------|".to_string(),
    ];
    for c in cases {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            c.code,
            c.name,
            c.acuity.label(),
            c.definitive
        ));
    }
    lines.join("\n")
}

pub fn render_actions_md(case: Diagnosis, actions: &[ScriptedAction]) -> String {
    let mut lines = vec![format!("# Actions for {}", case), String::new()];
    for a in actions {
        let findings: Vec<String> = a.entry.evidence.iter().map(ToString::to_string).collect();
        if findings.is_empty() {
            lines.push(format!("- `{}`: {}", a.id, a.label));
        } else {
            lines.push(format!("- `{}`: {} [{}]", a.id, a.label, findings.join(", ")));
        }
    }
    lines.join("\n")
}

pub fn render_snapshot_md(snap: &SessionSnapshot) -> String {
    let mut lines = vec![
        format!("# {} ({})", snap.case_name, snap.case),
        String::new(),
        format!("- Session: `{}`", snap.session_id),
        format!(
            "- Trainee: {}",
            if snap.user.is_empty() { "-" } else { snap.user.as_str() }
        ),
        format!("- Elapsed: {} min", snap.elapsed_minutes),
        format!(
            "- Acuity: {} {} (baseline {})",
            snap.acuity.label(),
            snap.acuity.description(),
            snap.baseline_acuity.label()
        ),
        format!("- Phase: {} (risk {}/20)", snap.phase, snap.risk),
        format!("- Score: {} ({})", snap.score.total, snap.score.rank),
    ];
    match &snap.diagnosis {
        DiagnosisState::Pending => lines.push("- Diagnosis: pending".to_string()),
        DiagnosisState::Confirmed { method } => {
            lines.push(format!("- Diagnosis: confirmed ({})", method))
        }
    }

    lines.push(String::new());
    lines.push("## Posterior".to_string());
    lines.push(String::new());
    lines.push("| Diagnosis | Prior | Posterior |".to_string());
    lines.push("|-----------|-------|-----------|".to_string());
    for (dx, p) in snap.posterior.iter() {
        let marker = if dx == snap.leading { " *" } else { "" };
        lines.push(format!(
            "| {}{} | {} | {} |",
            dx,
            marker,
            percent(snap.prior.get(dx)),
            percent(p)
        ));
    }

    if !snap.feedback.is_empty() {
        lines.push(String::new());
        lines.push("## Feedback".to_string());
        lines.push(String::new());
        for issue in &snap.feedback {
            lines.push(format!(
                "- [{}] {}. {}",
                issue.category, issue.description, issue.improvement
            ));
        }
    }

    if !snap.log.is_empty() {
        lines.push(String::new());
        lines.push("## Log".to_string());
        lines.push(String::new());
        for (i, entry) in snap.log.iter().enumerate() {
            lines.push(format!("{}. {}", i + 1, entry.utterance));
        }
    }
    lines.join("\n")
}

pub fn render_history_md(summary: &HistorySummary) -> String {
    let mut lines = vec![
        "# History".to_string(),
        String::new(),
        format!(
            "Sessions: {}  Average score: {}",
            summary.count, summary.average_score
        ),
    ];
    if summary.records.is_empty() {
        lines.push(String::new());
        lines.push("No sessions recorded yet.".to_string());
        return lines.join("\n");
    }
    lines.push(String::new());
    lines.push("| When | Trainee | Case | Score | Feedback | Evidence |".to_string());
    lines.push("|------|---------|------|-------|----------|----------|".to_string());
    for r in &summary.records {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            r.timestamp.format("%Y-%m-%d %H:%M"),
            r.user,
            r.case,
            r.score,
            r.feedback_count,
            r.evidence_count
        ));
    }
    lines.join("\n")
}

/// Render `value` as JSON or with the given Markdown renderer.
pub fn render<T: Serialize + ?Sized>(
    format: OutputFormat,
    value: &T,
    markdown: impl FnOnce(&T) -> String,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => to_json(value),
        OutputFormat::Md => Ok(markdown(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{sample_record, summarize};
    use crate::session::Session;
    use cps_config::builtin_catalog;

    #[test]
    fn cases_are_listed_in_canonical_order() {
        let cases = case_summaries(builtin_catalog());
        let codes: Vec<_> = cases.iter().map(|c| c.code).collect();
        assert_eq!(codes, Diagnosis::ALL.to_vec());
        let md = render_cases_md(&cases);
        assert!(md.contains("| AoD |"));
        assert!(md.contains("JTAS 1"));
    }

    #[test]
    fn snapshot_markdown_marks_leading_diagnosis() {
        let mut session = Session::new(builtin_catalog(), Diagnosis::AorticDissection).unwrap();
        session.perform("echo_flap_pos").unwrap();
        session.perform("shout_command").unwrap();
        let md = render_snapshot_md(&session.snapshot());
        assert!(md.contains("| AoD * |"));
        assert!(md.contains("## Feedback"));
        assert!(md.contains("[communication]"));
        assert!(md.contains("Phase: initial resuscitation"));
    }

    #[test]
    fn snapshot_json_has_derived_fields() {
        let session = Session::new(builtin_catalog(), Diagnosis::Ami).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&session.snapshot()).unwrap()).unwrap();
        assert_eq!(json["risk"], 6);
        assert_eq!(json["phase"], "initial_resuscitation");
        assert_eq!(json["acuity"], 2);
        assert_eq!(json["score"]["rank"], "S");
        assert_eq!(json["diagnosis"]["status"], "pending");
    }

    #[test]
    fn history_markdown() {
        let empty = render_history_md(&summarize(Vec::new()));
        assert!(empty.contains("No sessions recorded yet."));

        let md = render_history_md(&summarize(vec![sample_record("kim", 90)]));
        assert!(md.contains("Average score: 90"));
        assert!(md.contains("| kim | AoD | 90 |"));
    }
}
