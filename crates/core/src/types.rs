use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::inheritance::Genotype;

/// Exact probability. Arbitrary precision so deep pedigrees never overflow.
pub type Probability = num_rational::BigRational;

/// Mapping from genotype to probability. Sums to exactly one, or is empty
/// when no genotype is possible.
pub type GenotypeDistribution = BTreeMap<Genotype, Probability>;

/// Joint distribution over (maternal genotype, paternal genotype) pairs.
pub type ParentPairDistribution = BTreeMap<(Genotype, Genotype), Probability>;

/// The probability `numer / denom`.
pub fn ratio(numer: usize, denom: usize) -> Probability {
    Probability::new(BigInt::from(numer), BigInt::from(denom))
}

/// Total probability mass of a distribution.
pub fn total_mass<K>(distribution: &BTreeMap<K, Probability>) -> Probability {
    distribution
        .values()
        .fold(Probability::zero(), |acc, p| acc + p)
}
