//! Evidence combination P(D|e) over the five diagnoses.
//!
//! Each diagnosis is updated independently in log-odds space: the prior is
//! clamped and converted to log-odds, every recognized finding adds
//! ln(LR+) or ln(LR-) to each diagnosis, and the resulting probabilities
//! are renormalized onto the simplex. Log-odds addition is commutative, so
//! the result does not depend on evidence order.

use cps_common::{Diagnosis, DiagnosisScores, Observation, Sign};
use cps_config::{Catalog, LikelihoodRatio};
use cps_math::{inv_logit, log_ratio, logit, normalize_in_place};
use serde::{Deserialize, Serialize};

/// Log-LR contribution of one logged finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceContribution {
    pub key: String,
    pub sign: Sign,
    /// False when the finding has no row in the ratio table (skipped).
    pub recognized: bool,
    pub log_lr: DiagnosisScores,
}

/// Posterior together with the terms that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombineResult {
    pub prior: DiagnosisScores,
    pub posterior: DiagnosisScores,
    /// Per-diagnosis log-odds after all evidence, before renormalization.
    pub log_odds: DiagnosisScores,
    pub contributions: Vec<EvidenceContribution>,
    pub leading: Diagnosis,
}

/// Combine `prior` with `evidence` using the catalog's ratio table.
pub fn combine(catalog: &Catalog, prior: &DiagnosisScores, evidence: &[Observation]) -> DiagnosisScores {
    explain(catalog, prior, evidence).posterior
}

/// Like [`combine`], but keeps the per-finding breakdown.
pub fn explain(catalog: &Catalog, prior: &DiagnosisScores, evidence: &[Observation]) -> CombineResult {
    let mut log_odds = prior.map(|_, p| logit(p));
    let mut contributions = Vec::with_capacity(evidence.len());

    for obs in evidence {
        let Some(row) = catalog.row(&obs.key) else {
            contributions.push(EvidenceContribution {
                key: obs.key.clone(),
                sign: obs.sign,
                recognized: false,
                log_lr: DiagnosisScores::default(),
            });
            continue;
        };

        let term = DiagnosisScores::default().map(|dx, _| {
            let ratio = row.get(&dx).copied().unwrap_or(LikelihoodRatio::NEUTRAL);
            log_ratio(ratio.for_sign(obs.sign))
        });
        log_odds = log_odds.map(|dx, z| z + term.get(dx));
        contributions.push(EvidenceContribution {
            key: obs.key.clone(),
            sign: obs.sign,
            recognized: true,
            log_lr: term,
        });
    }

    // inv_logit underflows to 0 below about -745; keep every diagnosis on the
    // open simplex.
    let mut values = log_odds
        .map(|_, z| inv_logit(z).max(f64::MIN_POSITIVE))
        .as_array();
    if !normalize_in_place(&mut values) {
        values = DiagnosisScores::uniform().as_array();
    }
    let posterior = DiagnosisScores::from_array(values);

    CombineResult {
        prior: *prior,
        posterior,
        log_odds,
        contributions,
        leading: posterior.leading().0,
    }
}
