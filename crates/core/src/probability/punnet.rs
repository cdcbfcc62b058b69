use num_traits::Zero;

use crate::inheritance::Genotype;
use crate::types::{ratio, GenotypeDistribution, Probability};

/// Uniform distribution over the supplied genotypes. Repeated genotypes
/// count with their multiplicity.
pub fn uniform<I>(genotypes: I) -> GenotypeDistribution
where
    I: IntoIterator<Item = Genotype>,
{
    let genotypes: Vec<Genotype> = genotypes.into_iter().collect();
    let n = genotypes.len();
    let mut distribution = GenotypeDistribution::new();
    for genotype in genotypes {
        *distribution.entry(genotype).or_insert_with(Probability::zero) += ratio(1, n);
    }
    distribution
}

/// A distribution that is certain of one genotype.
pub fn certain(genotype: Genotype) -> GenotypeDistribution {
    uniform([genotype])
}

/// Punnet-square cross of two parental distributions.
///
/// Every (maternal genotype, paternal genotype) combination contributes its
/// four ordered allele pairings, maternal allele first, each weighted by
/// `p(mother) * p(father) / 4`. Contributions to the same offspring genotype
/// accumulate. The output is not normalized: its mass is the product of the
/// input masses.
pub fn cross(mother: &GenotypeDistribution, father: &GenotypeDistribution) -> GenotypeDistribution {
    let quarter = ratio(1, 4);
    let mut offspring = GenotypeDistribution::new();
    for (m_genotype, m_prob) in mother {
        for (f_genotype, f_prob) in father {
            let weight = m_prob * f_prob * &quarter;
            for maternal in m_genotype.allele_bytes() {
                for paternal in f_genotype.allele_bytes() {
                    *offspring
                        .entry(Genotype::from_alleles(maternal, paternal))
                        .or_insert_with(Probability::zero) += &weight;
                }
            }
        }
    }
    offspring
}
