//! Session lifecycle against real history stores.

use chrono::{TimeZone, Utc};
use cps_common::Diagnosis;
use cps_config::builtin_catalog;
use cps_core::history::{summarize, FileHistoryStore, HistoryStore, MemoryHistoryStore};
use cps_core::session::{DiagnosisState, LogEntry, Session};
use tempfile::TempDir;

#[test]
fn full_dissection_workup_is_saved_to_file() {
    let dir = TempDir::new().unwrap();
    let mut store = FileHistoryStore::new(dir.path().join("chestpain_sim_history_v1.json"));

    let mut session = Session::new(builtin_catalog(), Diagnosis::AorticDissection)
        .unwrap()
        .with_user("kato");
    for action in ["oxygen", "monitor", "line_pressure", "bloods", "echo", "echo_flap_pos", "check_allergy"] {
        session.perform(action).unwrap();
    }
    session.set_elapsed_minutes(8.0);

    let snap = session.snapshot();
    assert_eq!(snap.leading, Diagnosis::AorticDissection);
    // 6 * 1.05^8 = 8.86
    assert_eq!(snap.risk, 9);

    let when = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
    let record = session.confirm_diagnosis(&mut store, when).unwrap();
    assert_eq!(record.score, 95);
    assert_eq!(record.evidence_count, 1);
    assert!((record.posterior.sum() - 1.0).abs() < 1e-9);

    let reopened = FileHistoryStore::new(store.path());
    assert_eq!(reopened.load(), vec![record]);
}

#[test]
fn confirmation_is_saved_once_per_session() {
    let mut store = MemoryHistoryStore::new();
    let mut session = Session::new(builtin_catalog(), Diagnosis::Boerhaave).unwrap();
    session.perform("ct_esoph_leak_pos").unwrap();

    let when = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    assert!(session.confirm_diagnosis(&mut store, when).is_some());
    assert!(session.confirm_diagnosis(&mut store, when).is_none());
    assert_eq!(store.load().len(), 1);
    assert_eq!(
        session.diagnosis(),
        &DiagnosisState::Confirmed {
            method: "ct_esoph".to_string()
        }
    );

    // Reset allows a new confirmation.
    session.reset();
    assert!(session.confirm_diagnosis(&mut store, when).is_some());
    assert_eq!(store.load().len(), 2);
}

#[test]
fn free_form_entries_feed_feedback() {
    let mut session = Session::new(builtin_catalog(), Diagnosis::TensionPneumothorax).unwrap();
    session.append(
        LogEntry::new("Ordered CT before decompression")
            .with_missed_differentials(3)
            .with_delay_sec(600),
    );
    let snap = session.snapshot();
    assert_eq!(snap.feedback.len(), 2);
    assert_eq!(snap.score.total, 90);
    // 6 + 9 + 1
    assert_eq!(snap.risk, 16);
}

#[test]
fn history_summary_across_sessions() {
    let mut store = MemoryHistoryStore::new();
    let when = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
    for (case, probes) in [
        (Diagnosis::Ami, 0),
        (Diagnosis::PulmonaryEmbolism, 1),
        (Diagnosis::TensionPneumothorax, 2),
    ] {
        let mut session = Session::new(builtin_catalog(), case).unwrap();
        for _ in 0..probes {
            session.perform("shout_command").unwrap();
        }
        session.confirm_diagnosis(&mut store, when);
    }

    let summary = summarize(store.load());
    assert_eq!(summary.count, 3);
    // (100 + 95 + 90) / 3
    assert_eq!(summary.average_score, 95);
    assert_eq!(summary.records[0].case, Diagnosis::TensionPneumothorax);

    store.clear();
    assert!(store.load().is_empty());
}

#[test]
fn repeated_negative_echo_keeps_every_diagnosis_possible() {
    let mut session = Session::new(builtin_catalog(), Diagnosis::Ami).unwrap();
    for _ in 0..400 {
        session.perform("echo_flap_neg").unwrap();
    }
    let snap = session.snapshot();
    assert!(snap.posterior.get(Diagnosis::AorticDissection) > 0.0);
    assert!(snap.posterior.iter().all(|(_, p)| p > 0.0));
    assert!((snap.posterior.sum() - 1.0).abs() < 1e-9);
}
