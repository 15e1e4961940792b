//! Scripted action menu.
//!
//! The menu offered for a case is derived from its essential actions, so a
//! catalog file can change which interventions and findings are available
//! without code changes. Ids are stable so the CLI can replay them.

use crate::session::LogEntry;
use cps_common::{Diagnosis, Observation};
use cps_config::CaseDefinition;
use serde::Serialize;

/// One button: an id, a label and the log entry it appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptedAction {
    pub id: String,
    pub label: String,
    pub entry: LogEntry,
}

impl ScriptedAction {
    fn new(id: &str, label: &str, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            entry: LogEntry::new(label).with_tags(tags.iter().copied()),
        }
    }

    fn finding(id: &str, label: &str, tags: &[&str], evidence: Observation) -> Self {
        let mut action = Self::new(id, label, tags);
        action.entry.evidence = vec![evidence];
        action
    }

    /// Positive and negative variants of one finding.
    fn finding_pair(key: &str, label: &str, tags: &[&str]) -> [Self; 2] {
        [
            Self::finding(
                &format!("{key}_pos"),
                &format!("{label} (+)"),
                tags,
                Observation::positive(key),
            ),
            Self::finding(
                &format!("{key}_neg"),
                &format!("{label} (-)"),
                tags,
                Observation::negative(key),
            ),
        ]
    }
}

/// Build the ordered action menu for a case.
pub fn action_menu(case: &CaseDefinition, dx: Diagnosis) -> Vec<ScriptedAction> {
    let mut menu = vec![
        ScriptedAction::new("oxygen", "Oxygen 5 L by mask.", &["oxygen"]),
        ScriptedAction::new("monitor", "Attach the monitor.", &["monitor"]),
    ];

    if case.requires("line_pressure") {
        menu.push(ScriptedAction::new(
            "line_pressure",
            "Secure an 18G pressure line in the right arm.",
            &["line", "pressure"],
        ));
    } else {
        menu.push(ScriptedAction::new(
            "line",
            "Secure an 18G line in the right arm.",
            &["line"],
        ));
    }

    if case.requires("bloods_ddimer") {
        menu.push(ScriptedAction::new(
            "bloods_ddimer",
            "Draw bloods including D-dimer.",
            &["bloods", "ddimer"],
        ));
    } else if case.requires("bloods_abg") {
        menu.push(ScriptedAction::new(
            "bloods_abg",
            "Draw bloods including an arterial blood gas.",
            &["bloods", "abg"],
        ));
    } else {
        menu.push(ScriptedAction::new("bloods", "Draw bloods.", &["bloods"]));
    }

    if case.requires("ecg") {
        menu.push(ScriptedAction::new("ecg", "Record a 12-lead ECG.", &["ecg"]));
        menu.extend(ScriptedAction::finding_pair("ecg_ste", "ECG: ST elevation", &["ecg"]));
    }

    if case.requires("echo") || case.requires("echo_rv") {
        menu.push(ScriptedAction::new("echo", "Perform an echocardiogram.", &["echo"]));
        let flap = if dx == Diagnosis::AorticDissection {
            ScriptedAction::finding(
                "echo_flap_pos",
                "Echo: dissection flap (+)",
                &["echo"],
                Observation::positive("echo_flap"),
            )
        } else {
            ScriptedAction::finding(
                "echo_flap_neg",
                "Echo: dissection flap (-)",
                &["echo"],
                Observation::negative("echo_flap"),
            )
        };
        menu.push(flap);
        if dx == Diagnosis::PulmonaryEmbolism || case.requires("echo_rv") {
            menu.extend(ScriptedAction::finding_pair(
                "echo_rv_strain",
                "Echo: right heart strain",
                &["echo"],
            ));
        }
    }

    if case.requires("xray") {
        menu.push(ScriptedAction::new("xray", "Take a chest X-ray.", &["xray"]));
        menu.extend(ScriptedAction::finding_pair(
            "xray_pneumothorax",
            "X-ray: pneumothorax",
            &["xray"],
        ));
    }

    if case.requires("ct_esoph") {
        menu.push(ScriptedAction::new(
            "ct_esoph",
            "Contrast CT esophagram.",
            &["ct_esoph"],
        ));
        menu.extend(ScriptedAction::finding_pair(
            "ct_esoph_leak",
            "CT: contrast leak",
            &["ct_esoph"],
        ));
    }

    menu.push(ScriptedAction::new(
        "check_allergy",
        "Do you have any contrast allergy?",
        &["check_allergy"],
    ));

    if case.requires("bloods_ddimer") {
        menu.push(ScriptedAction::finding(
            "ddimer_high_pos",
            "D-dimer high (+)",
            &["ddimer"],
            Observation::positive("ddimer_high"),
        ));
        menu.push(ScriptedAction::finding(
            "ddimer_high_neg",
            "D-dimer normal (-)",
            &["ddimer"],
            Observation::negative("ddimer_high"),
        ));
    }

    if case.requires("needle_decompression") {
        menu.push(ScriptedAction::new(
            "decompression",
            "Suspected tension pneumothorax: immediate needle decompression.",
            &["decompression"],
        ));
    }

    // Evaluation probes.
    let mut silent = ScriptedAction::new("silent_delay", "(Works in silence, falling behind...)", &[]);
    silent.entry = silent
        .entry
        .with_delay_sec(420)
        .with_missing_actions(1)
        .with_tone(Some(0));
    menu.push(silent);

    let mut shout = ScriptedAction::new("shout_command", "Hurry up! Move faster!", &["command"]);
    shout.entry = shout.entry.with_tone(Some(0));
    menu.push(shout);

    menu
}

/// Look up an action by id in a case's menu.
pub fn find_action(case: &CaseDefinition, dx: Diagnosis, id: &str) -> Option<ScriptedAction> {
    action_menu(case, dx).into_iter().find(|a| a.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cps_config::builtin_catalog;

    fn ids(dx: Diagnosis) -> Vec<String> {
        let case = builtin_catalog().case(dx).unwrap();
        action_menu(case, dx).into_iter().map(|a| a.id).collect()
    }

    #[test]
    fn ami_menu() {
        assert_eq!(
            ids(Diagnosis::Ami),
            vec![
                "oxygen",
                "monitor",
                "line",
                "bloods",
                "ecg",
                "ecg_ste_pos",
                "ecg_ste_neg",
                "echo",
                "echo_flap_neg",
                "check_allergy",
                "silent_delay",
                "shout_command",
            ]
        );
    }

    #[test]
    fn dissection_menu_has_pressure_line_and_positive_flap() {
        let ids = ids(Diagnosis::AorticDissection);
        assert!(ids.contains(&"line_pressure".to_string()));
        assert!(!ids.contains(&"line".to_string()));
        assert!(ids.contains(&"echo_flap_pos".to_string()));
        assert!(!ids.contains(&"echo_flap_neg".to_string()));
        assert!(!ids.contains(&"ecg".to_string()));
    }

    #[test]
    fn pe_menu() {
        assert_eq!(
            ids(Diagnosis::PulmonaryEmbolism),
            vec![
                "oxygen",
                "monitor",
                "line",
                "bloods_ddimer",
                "echo",
                "echo_flap_neg",
                "echo_rv_strain_pos",
                "echo_rv_strain_neg",
                "check_allergy",
                "ddimer_high_pos",
                "ddimer_high_neg",
                "silent_delay",
                "shout_command",
            ]
        );
    }

    #[test]
    fn tension_pneumothorax_menu() {
        assert_eq!(
            ids(Diagnosis::TensionPneumothorax),
            vec![
                "oxygen",
                "monitor",
                "line",
                "bloods_abg",
                "check_allergy",
                "decompression",
                "silent_delay",
                "shout_command",
            ]
        );
    }

    #[test]
    fn boerhaave_menu_has_xray_and_esophagram() {
        let ids = ids(Diagnosis::Boerhaave);
        for id in ["xray", "xray_pneumothorax_pos", "ct_esoph", "ct_esoph_leak_pos", "ct_esoph_leak_neg"] {
            assert!(ids.contains(&id.to_string()), "missing {id}");
        }
    }

    #[test]
    fn probes_carry_deficiencies() {
        let case = builtin_catalog().case(Diagnosis::Ami).unwrap();
        let silent = find_action(case, Diagnosis::Ami, "silent_delay").unwrap();
        assert_eq!(silent.entry.delay_sec, 420);
        assert_eq!(silent.entry.missing_actions, 1);
        assert_eq!(silent.entry.tone_score, Some(0));

        let shout = find_action(case, Diagnosis::Ami, "shout_command").unwrap();
        assert!(shout.entry.has_tag("command"));
        assert_eq!(shout.entry.tone_score, Some(0));
        assert_eq!(shout.entry.delay_sec, 0);
    }

    #[test]
    fn finding_actions_carry_evidence() {
        let case = builtin_catalog().case(Diagnosis::Ami).unwrap();
        let ste = find_action(case, Diagnosis::Ami, "ecg_ste_pos").unwrap();
        assert_eq!(ste.entry.evidence, vec![Observation::positive("ecg_ste")]);
        assert_eq!(ste.entry.tone_score, Some(3));
        assert!(find_action(case, Diagnosis::Ami, "decompression").is_none());
    }
}
