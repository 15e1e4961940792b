//! Property-based tests for the engine invariants.

use cps_common::{AcuityLevel, Diagnosis, DiagnosisScores, Observation, Sign};
use cps_config::builtin_catalog;
use cps_core::engine::{combine, effective_acuity, estimate_risk, evaluate, score, Grade, Phase};
use cps_core::session::LogEntry;
use proptest::prelude::*;

const FINDINGS: &[&str] = &[
    "ecg_ste",
    "echo_flap",
    "ddimer_high",
    "echo_rv_strain",
    "xray_pneumothorax",
    "ct_esoph_leak",
];

fn sign() -> impl Strategy<Value = Sign> {
    prop_oneof![Just(Sign::Positive), Just(Sign::Negative)]
}

fn known_observation() -> impl Strategy<Value = Observation> {
    (prop::sample::select(FINDINGS), sign()).prop_map(|(key, sign)| Observation::new(key, sign))
}

fn prior() -> impl Strategy<Value = DiagnosisScores> {
    prop::array::uniform5(0.01f64..1.0).prop_map(|raw| {
        let total: f64 = raw.iter().sum();
        DiagnosisScores::from_array(raw.map(|v| v / total))
    })
}

fn assert_close(a: &DiagnosisScores, b: &DiagnosisScores, tol: f64) {
    for dx in Diagnosis::ALL {
        assert!((a.get(dx) - b.get(dx)).abs() < tol, "{dx}: {} vs {}", a.get(dx), b.get(dx));
    }
}

proptest! {
    #[test]
    fn posterior_is_a_distribution(
        prior in prior(),
        evidence in prop::collection::vec(known_observation(), 0..30),
    ) {
        let post = combine(builtin_catalog(), &prior, &evidence);
        prop_assert!((post.sum() - 1.0).abs() < 1e-9);
        for (_, p) in post.iter() {
            prop_assert!(p > 0.0 && p <= 1.0);
        }
    }

    #[test]
    fn evidence_order_does_not_matter(
        prior in prior(),
        evidence in prop::collection::vec(known_observation(), 0..12),
    ) {
        let forward = combine(builtin_catalog(), &prior, &evidence);
        let mut reversed = evidence.clone();
        reversed.reverse();
        let backward = combine(builtin_catalog(), &prior, &reversed);
        assert_close(&forward, &backward, 1e-9);
    }

    #[test]
    fn unknown_findings_are_ignored(
        prior in prior(),
        evidence in prop::collection::vec(known_observation(), 0..10),
        unknown in "[a-z]{3,10}_unlisted",
        s in sign(),
    ) {
        let base = combine(builtin_catalog(), &prior, &evidence);
        let mut noisy = evidence.clone();
        noisy.push(Observation::new(unknown, s));
        let with_unknown = combine(builtin_catalog(), &prior, &noisy);
        assert_close(&base, &with_unknown, 1e-12);
    }

    #[test]
    fn risk_never_exceeds_twenty(
        minutes in -100.0f64..1000.0,
        missing in 0u32..50,
        missed in 0u32..50,
        delay in 0u32..5000,
    ) {
        let log = vec![LogEntry::new("x")
            .with_missing_actions(missing)
            .with_missed_differentials(missed)
            .with_delay_sec(delay)];
        prop_assert!(estimate_risk(&log, minutes).risk <= 20);
    }

    #[test]
    fn risk_is_monotone(
        minutes in 0.0f64..60.0,
        extra_minutes in 0.0f64..30.0,
        missing in 0u32..5,
        missed in 0u32..5,
    ) {
        let entry = LogEntry::new("x")
            .with_missing_actions(missing)
            .with_missed_differentials(missed);
        let base = estimate_risk(std::slice::from_ref(&entry), minutes).risk;

        prop_assert!(estimate_risk(std::slice::from_ref(&entry), minutes + extra_minutes).risk >= base);
        let more_missing = entry.clone().with_missing_actions(missing + 1);
        prop_assert!(estimate_risk(&[more_missing], minutes).risk >= base);
        let more_missed = entry.with_missed_differentials(missed + 1);
        prop_assert!(estimate_risk(&[more_missed], minutes).risk >= base);
    }

    #[test]
    fn deterioration_overrides_acuity(level in 1u8..=5, risk in 0u8..=20) {
        let baseline = AcuityLevel::try_from(level).unwrap();
        let acuity = effective_acuity(baseline, risk);
        if risk >= 18 {
            prop_assert_eq!(acuity, AcuityLevel::Resuscitation);
        } else {
            prop_assert_eq!(acuity, baseline);
        }
    }

    #[test]
    fn score_stays_in_range(delays in prop::collection::vec(0u32..1000, 0..40)) {
        let log: Vec<LogEntry> = delays
            .iter()
            .map(|d| LogEntry::new("x").with_delay_sec(*d))
            .collect();
        let s = score(&evaluate(&log));
        prop_assert!((60..=100).contains(&s.total));
        prop_assert!(s.rank != Grade::D);
    }
}

#[test]
fn ten_issues_floor_at_sixty_rank_c() {
    let log: Vec<LogEntry> = (0..10)
        .map(|_| LogEntry::new("late").with_delay_sec(400))
        .collect();
    let issues = evaluate(&log);
    assert_eq!(issues.len(), 10);
    let s = score(&issues);
    assert_eq!(s.total, 60);
    assert_eq!(s.rank, Grade::C);
}

#[test]
fn uniform_prior_with_flap_strongly_favors_dissection() {
    let post = combine(
        builtin_catalog(),
        &DiagnosisScores::uniform(),
        &[Observation::positive("echo_flap")],
    );
    let (leading, p) = post.leading();
    assert_eq!(leading, Diagnosis::AorticDissection);
    assert!(p > 0.5);
}

#[test]
fn baseline_examples() {
    let empty = estimate_risk(&[], 0.0);
    assert_eq!(empty.risk, 6);
    assert_eq!(empty.phase, Phase::InitialResuscitation);

    let missing = estimate_risk(&[LogEntry::new("x").with_missing_actions(5)], 0.0);
    assert_eq!(missing.risk, 16);
    assert_eq!(missing.phase, Phase::InitialResuscitation);
}
