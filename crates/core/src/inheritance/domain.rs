use crate::error::{InferenceError, Result};
use crate::types::{ratio, GenotypeDistribution};

use super::{
    is_affected, Gender, Genotype, Mode, Phenotype, AUTOSOMAL_GENOTYPES,
    FEMALE_SEX_LINKED_GENOTYPES, MALE_SEX_LINKED_GENOTYPES,
};

/// The genotypes a mode allows for an individual of `gender` (or either
/// gender when `None`), ignoring affected status.
fn genotype_alphabet(mode: Mode, gender: Option<Gender>) -> Vec<Genotype> {
    if mode.is_autosomal() {
        return AUTOSOMAL_GENOTYPES.to_vec();
    }
    match gender {
        Some(Gender::Female) => FEMALE_SEX_LINKED_GENOTYPES.to_vec(),
        Some(Gender::Male) => MALE_SEX_LINKED_GENOTYPES.to_vec(),
        None => FEMALE_SEX_LINKED_GENOTYPES
            .iter()
            .chain(MALE_SEX_LINKED_GENOTYPES.iter())
            .copied()
            .collect(),
    }
}

/// Uniform prior over the genotypes consistent with `mode`, `gender` and,
/// when given, `affected`.
///
/// # Errors
/// - [`InferenceError::NonMendelianConfiguration`] for an affected female
///   under a Y-linked mode.
/// - [`InferenceError::EmptyDomain`] when the affected filter leaves no
///   genotype, i.e. the mode cannot produce this phenotype at all.
pub fn genotype_possibilities(
    mode: Mode,
    gender: Option<Gender>,
    affected: Option<bool>,
) -> Result<GenotypeDistribution> {
    if mode == Mode::YLinked && gender == Some(Gender::Female) && affected == Some(true) {
        return Err(InferenceError::NonMendelianConfiguration(
            "a female can not be affected under a y-linked mode of inheritance".to_string(),
        ));
    }

    let mut genotypes = genotype_alphabet(mode, gender);
    if let Some(affected) = affected {
        genotypes.retain(|g| is_affected(g, mode) == affected);
    }

    if genotypes.is_empty() {
        let description = match (gender, affected) {
            (Some(gender), Some(affected)) => Phenotype::new(gender, affected).describe(),
            (None, Some(true)) => "an affected individual".to_string(),
            _ => "an unaffected individual".to_string(),
        };
        return Err(InferenceError::EmptyDomain { mode, description });
    }

    let n = genotypes.len();
    Ok(genotypes.into_iter().map(|g| (g, ratio(1, n))).collect())
}
