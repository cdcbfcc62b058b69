use num_traits::{ToPrimitive, Zero};

use crate::inheritance::{is_affected, Genotype, Mode, Phenotype};
use crate::pedigree::Pedigree;
use crate::types::{GenotypeDistribution, Probability};

/// Inferred genotypes of one individual under one mode of inheritance.
#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeReport {
    /// Index of the individual in the pedigree.
    pub individual: usize,
    pub id: String,
    pub phenotype: Phenotype,
    pub mode: Mode,
    /// Posterior genotype distribution, summing to exactly one.
    pub distribution: GenotypeDistribution,
}

impl GenotypeReport {
    /// Report for `individual` carrying an already inferred `distribution`.
    ///
    /// # Panics
    /// Panics if `individual` is out of bounds, as [`Pedigree::individual`].
    pub fn new(
        pedigree: &Pedigree,
        individual: usize,
        mode: Mode,
        distribution: GenotypeDistribution,
    ) -> Self {
        let ind = pedigree.individual(individual);
        Self {
            individual,
            id: ind.id().to_string(),
            phenotype: ind.phenotype(),
            mode,
            distribution,
        }
    }

    /// Posterior probability of `genotype` (zero if it is ruled out).
    pub fn probability(&self, genotype: &Genotype) -> Probability {
        self.distribution
            .get(genotype)
            .cloned()
            .unwrap_or_else(Probability::zero)
    }

    /// [`GenotypeReport::probability`] as a float, for display.
    pub fn probability_f64(&self, genotype: &Genotype) -> f64 {
        self.probability(genotype).to_f64().unwrap_or(f64::NAN)
    }

    /// Probability that the individual carries the disease allele without
    /// being affected by it.
    pub fn carrier_probability(&self) -> Probability {
        let allele = self.mode.affecting_allele();
        self.distribution
            .iter()
            .filter(|(g, _)| g.contains(allele) && !is_affected(g, self.mode))
            .fold(Probability::zero(), |acc, (_, p)| acc + p)
    }

    /// The most probable genotype. Ties go to the first in genotype order.
    pub fn most_likely(&self) -> Option<(Genotype, &Probability)> {
        self.distribution
            .iter()
            .fold(None, |best: Option<(Genotype, &Probability)>, (g, p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((*g, p)),
            })
    }

    /// Formatted, human-readable table of the distribution.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(&format!(
            "=== {} ({}) under {} ===\n",
            self.id,
            self.phenotype.describe(),
            self.mode
        ));
        for (genotype, p) in &self.distribution {
            s.push_str(&format!(
                "  {}: {:>8} ({:.4})\n",
                genotype,
                p.to_string(),
                p.to_f64().unwrap_or(f64::NAN)
            ));
        }
        let carrier = self.carrier_probability();
        if !carrier.is_zero() {
            s.push_str(&format!(
                "Carrier probability: {} ({:.4})\n",
                carrier,
                carrier.to_f64().unwrap_or(f64::NAN)
            ));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inheritance::Gender;
    use crate::types::ratio;
    use approx::assert_relative_eq;

    fn g(s: &str) -> Genotype {
        Genotype::new(s).unwrap()
    }

    fn report(mode: Mode, affected: bool, entries: &[(&str, usize, usize)]) -> GenotypeReport {
        GenotypeReport {
            individual: 0,
            id: "0.0".to_string(),
            phenotype: Phenotype::new(Gender::Female, affected),
            mode,
            distribution: entries
                .iter()
                .map(|(s, n, d)| (g(s), ratio(*n, *d)))
                .collect(),
        }
    }

    #[test]
    fn test_new_copies_identity_from_pedigree() {
        let ped = Pedigree::from_diagram("f-m\n  |\n  M").unwrap();
        let r = GenotypeReport::new(&ped, 2, Mode::XLinkedRecessive, GenotypeDistribution::new());
        assert_eq!(r.id, "1.1");
        assert_eq!(r.phenotype, Phenotype::new(Gender::Male, true));
    }

    #[test]
    #[should_panic]
    fn test_new_panics_out_of_range() {
        let ped = Pedigree::from_diagram("f-m").unwrap();
        GenotypeReport::new(&ped, 5, Mode::AutosomalDominant, GenotypeDistribution::new());
    }

    #[test]
    fn test_probability_of_missing_genotype_is_zero() {
        let r = report(Mode::AutosomalRecessive, false, &[("AA", 1, 1)]);
        assert!(r.probability(&g("aa")).is_zero());
        assert_eq!(r.probability(&g("AA")), ratio(1, 1));
    }

    #[test]
    fn test_carrier_probability_recessive() {
        let r = report(
            Mode::AutosomalRecessive,
            false,
            &[("AA", 1, 3), ("Aa", 1, 3), ("aA", 1, 3)],
        );
        assert_eq!(r.carrier_probability(), ratio(2, 3));
        assert_relative_eq!(r.probability_f64(&g("Aa")), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_carriers_under_dominant_mode() {
        let r = report(
            Mode::AutosomalDominant,
            true,
            &[("AA", 1, 3), ("Aa", 1, 3), ("aA", 1, 3)],
        );
        assert!(r.carrier_probability().is_zero());
    }

    #[test]
    fn test_most_likely_prefers_first_on_ties() {
        let r = report(
            Mode::XLinkedRecessive,
            false,
            &[("XX", 1, 4), ("Xx", 3, 8), ("xX", 3, 8)],
        );
        let (genotype, p) = r.most_likely().unwrap();
        assert_eq!(genotype, g("Xx"));
        assert_eq!(*p, ratio(3, 8));
    }

    #[test]
    fn test_summary_lists_genotypes() {
        let r = report(Mode::XLinkedRecessive, false, &[("Xx", 1, 2), ("xX", 1, 2)]);
        let s = r.summary();
        assert!(s.contains("an unaffected female"));
        assert!(s.contains("Xx"));
        assert!(s.contains("1/2"));
        assert!(s.contains("Carrier probability: 1"));
    }
}
