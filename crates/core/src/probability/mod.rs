// Exact Bayesian primitives over genotype distributions.

mod punnet;

use std::collections::BTreeMap;

use num_traits::Zero;

use crate::error::{InferenceError, Result};
use crate::inheritance::{phenotype_class, Mode, Phenotype};
use crate::types::{total_mass, GenotypeDistribution, Probability};

pub use punnet::{certain, cross, uniform};

/// Rescale a distribution so its probabilities sum to exactly one,
/// dropping every outcome with probability zero.
///
/// Works for any key type, so it serves both genotype distributions and
/// parent-pair posteriors.
///
/// # Errors
/// Returns [`InferenceError::ZeroMass`] when the total mass is zero
/// (including the empty distribution).
pub fn normalize<K: Ord + Clone>(
    distribution: &BTreeMap<K, Probability>,
) -> Result<BTreeMap<K, Probability>> {
    let total = total_mass(distribution);
    if total.is_zero() {
        return Err(InferenceError::ZeroMass);
    }
    Ok(distribution
        .iter()
        .filter(|(_, p)| !p.is_zero())
        .map(|(k, p)| (k.clone(), p / &total))
        .collect())
}

/// Restrict `distribution` to the genotypes that could produce the
/// `observed` phenotype under `mode`, then normalize.
///
/// Returns the empty distribution when nothing survives; whether that is
/// fatal is the caller's decision.
pub fn constrain(
    mode: Mode,
    observed: Phenotype,
    distribution: &GenotypeDistribution,
) -> GenotypeDistribution {
    let filtered: GenotypeDistribution = distribution
        .iter()
        .filter(|(g, _)| phenotype_class(g, mode).admits(observed))
        .map(|(g, p)| (*g, p.clone()))
        .collect();
    normalize(&filtered).unwrap_or_default()
}

/// Probability mass of `distribution` consistent with the `observed`
/// phenotype, without renormalizing.
pub fn occurrence_mass(
    mode: Mode,
    observed: Phenotype,
    distribution: &GenotypeDistribution,
) -> Probability {
    distribution
        .iter()
        .filter(|(g, _)| phenotype_class(g, mode).admits(observed))
        .fold(Probability::zero(), |acc, (_, p)| acc + p)
}
