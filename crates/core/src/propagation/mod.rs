//! Genotype inference over a pedigree.
//!
//! Two mutually recursive directions:
//!
//! - [`likelihood`] walks *down*: how well a pair of parental genotype
//!   distributions explains every observed descendant.
//! - [`ancestor_distributions`] walks *up*: each parent's distribution is
//!   resolved from their own parents and then re-weighted by how well those
//!   parents explain the whole sibling set ([`back_propagate`]).
//!
//! [`genotype_distribution`] combines both for a single individual.

mod report;
mod screening;

use log::{debug, trace};
use num_traits::{One, Zero};

use crate::error::{InferenceError, Result};
use crate::inheritance::{genotype_possibilities, Gender, Mode};
use crate::pedigree::Pedigree;
use crate::probability::{certain, constrain, cross, normalize, occurrence_mass};
use crate::types::{GenotypeDistribution, ParentPairDistribution, Probability};

pub use report::GenotypeReport;
pub use screening::compatible_modes;

/// Probability that parents with genotype distributions `mother` and
/// `father` produce the observed `children` and, recursively, all of their
/// descendants.
///
/// Each child becomes one parent of its own children, restricted to its
/// observed phenotype; its partner enters with a uniform prior. A childless
/// set contributes one. Impossible generations contribute zero rather than
/// an error.
pub fn likelihood(
    pedigree: &Pedigree,
    mode: Mode,
    children: &[usize],
    mother: &GenotypeDistribution,
    father: &GenotypeDistribution,
) -> Result<Probability> {
    let joint = cross(mother, father);
    let mut product = Probability::one();
    for &child in children {
        let observed = pedigree.individual(child).phenotype();
        product *= occurrence_mass(mode, observed, &joint);

        let (next_mother, next_father) = forward_distributions(pedigree, mode, child, &joint)?;
        product *= likelihood(
            pedigree,
            mode,
            pedigree.children(child),
            &next_mother,
            &next_father,
        )?;
    }
    trace!(
        "likelihood of {} children under {}: {}",
        children.len(),
        mode,
        product
    );
    Ok(product)
}

/// The (mother, father) distributions of the couple `child` forms with
/// their partner.
fn forward_distributions(
    pedigree: &Pedigree,
    mode: Mode,
    child: usize,
    joint: &GenotypeDistribution,
) -> Result<(GenotypeDistribution, GenotypeDistribution)> {
    let ind = pedigree.individual(child);
    let own = constrain(mode, ind.phenotype(), joint);
    let partner_affected = ind.partner().map(|p| pedigree.individual(p).affected());
    match ind.gender() {
        Gender::Female => {
            let partner = genotype_possibilities(mode, Some(Gender::Male), partner_affected)?;
            Ok((own, partner))
        }
        Gender::Male => {
            let partner = genotype_possibilities(mode, Some(Gender::Female), partner_affected)?;
            Ok((partner, own))
        }
    }
}

/// Posterior over (maternal genotype, paternal genotype) pairs given the
/// observed `children`.
///
/// Every pair is weighted by its prior probability times the likelihood
/// of the children under that exact pair, then normalized.
///
/// # Errors
/// Returns [`InferenceError::ZeroMass`] when no pair explains the children.
pub fn fit_parent_pairs(
    pedigree: &Pedigree,
    mode: Mode,
    children: &[usize],
    mother: &GenotypeDistribution,
    father: &GenotypeDistribution,
) -> Result<ParentPairDistribution> {
    let mut weights = ParentPairDistribution::new();
    for (m_genotype, m_prob) in mother {
        for (f_genotype, f_prob) in father {
            let fit = likelihood(
                pedigree,
                mode,
                children,
                &certain(*m_genotype),
                &certain(*f_genotype),
            )?;
            weights.insert((*m_genotype, *f_genotype), fit * m_prob * f_prob);
        }
    }
    normalize(&weights)
}

/// Offspring genotype distribution implied by a parent-pair posterior.
fn offspring_distribution(parents: &ParentPairDistribution) -> Result<GenotypeDistribution> {
    let mut offspring = GenotypeDistribution::new();
    for ((m_genotype, f_genotype), pair_prob) in parents {
        for (genotype, prob) in cross(&certain(*m_genotype), &certain(*f_genotype)) {
            *offspring.entry(genotype).or_insert_with(Probability::zero) += prob * pair_prob;
        }
    }
    normalize(&offspring)
}

/// Independent per-parent marginals of a parent-pair posterior.
pub fn split_parent_pairs(
    parents: &ParentPairDistribution,
) -> (GenotypeDistribution, GenotypeDistribution) {
    let mut mother = GenotypeDistribution::new();
    let mut father = GenotypeDistribution::new();
    for ((m_genotype, f_genotype), prob) in parents {
        *mother.entry(*m_genotype).or_insert_with(Probability::zero) += prob;
        *father.entry(*f_genotype).or_insert_with(Probability::zero) += prob;
    }
    (mother, father)
}

/// Genotype distribution of `individual` given candidate distributions for
/// their parents, the evidence of all their siblings (themselves
/// included), and their own phenotype.
pub fn back_propagate(
    pedigree: &Pedigree,
    mode: Mode,
    individual: usize,
    mother: &GenotypeDistribution,
    father: &GenotypeDistribution,
) -> Result<GenotypeDistribution> {
    let parents = fit_parent_pairs(pedigree, mode, pedigree.siblings(individual), mother, father)?;
    let offspring = offspring_distribution(&parents)?;
    let observed = pedigree.individual(individual).phenotype();
    Ok(constrain(mode, observed, &offspring))
}

/// Best-fit genotype distributions for a couple, using everything known
/// about their ancestry and their siblings.
///
/// An absent member contributes a uniform prior. A present member's
/// distribution is resolved recursively from their own parents and then
/// back-propagated through their sibling set.
pub fn ancestor_distributions(
    pedigree: &Pedigree,
    mode: Mode,
    mother: Option<usize>,
    father: Option<usize>,
) -> Result<(GenotypeDistribution, GenotypeDistribution)> {
    let mother_dist = member_distribution(pedigree, mode, Gender::Female, mother)?;
    let father_dist = member_distribution(pedigree, mode, Gender::Male, father)?;
    Ok((mother_dist, father_dist))
}

fn member_distribution(
    pedigree: &Pedigree,
    mode: Mode,
    gender: Gender,
    member: Option<usize>,
) -> Result<GenotypeDistribution> {
    // Rejects phenotypes the mode can not produce before recursing.
    let prior = genotype_possibilities(
        mode,
        Some(gender),
        member.map(|i| pedigree.individual(i).affected()),
    )?;
    let Some(index) = member else {
        return Ok(prior);
    };
    let (grandmother, grandfather) = pedigree.parents(index);
    let (mother_dist, father_dist) =
        ancestor_distributions(pedigree, mode, grandmother, grandfather)?;
    trace!("back-propagating {} under {}", pedigree.label(index), mode);
    back_propagate(pedigree, mode, index, &mother_dist, &father_dist)
}

/// Genotype distribution of `individual` given every phenotype in the
/// pedigree and a mode of inheritance.
///
/// # Errors
/// - [`InferenceError::NonMendelianPattern`] when the pedigree has zero
///   probability under `mode`.
/// - [`InferenceError::NonMendelianConfiguration`] for a phenotype the mode
///   rules out outright (an affected female under a Y-linked mode).
/// - A pedigree error if `individual` is out of range.
pub fn genotype_distribution(
    pedigree: &Pedigree,
    mode: Mode,
    individual: usize,
) -> Result<GenotypeDistribution> {
    let ind = pedigree.get(individual).ok_or_else(|| {
        InferenceError::Pedigree(format!(
            "Individual index {} is out of range ({} individuals)",
            individual,
            pedigree.n_individuals()
        ))
    })?;
    debug!("Inferring genotypes of {} under {}", pedigree.label(individual), mode);

    let (mother, father) = pedigree.mother_father(individual);
    let marginals = ancestor_distributions(pedigree, mode, mother, father)
        .and_then(|(mother_dist, father_dist)| {
            fit_parent_pairs(
                pedigree,
                mode,
                pedigree.children(individual),
                &mother_dist,
                &father_dist,
            )
        })
        .map(|parents| split_parent_pairs(&parents));

    let (mothers, fathers) = marginals.map_err(|e| match e {
        InferenceError::ZeroMass | InferenceError::EmptyDomain { .. } => {
            InferenceError::NonMendelianPattern {
                individual: pedigree.label(individual),
                mode,
            }
        }
        other => other,
    })?;

    let distribution = match ind.gender() {
        Gender::Female => mothers,
        Gender::Male => fathers,
    };
    debug!(
        "{} has {} possible genotypes under {}",
        pedigree.label(individual),
        distribution.len(),
        mode
    );
    Ok(distribution)
}

/// Reports for every individual, in index order.
pub fn genotype_distributions(pedigree: &Pedigree, mode: Mode) -> Result<Vec<GenotypeReport>> {
    (0..pedigree.n_individuals())
        .map(|index| {
            let distribution = genotype_distribution(pedigree, mode, index)?;
            Ok(GenotypeReport::new(pedigree, index, mode, distribution))
        })
        .collect()
}
