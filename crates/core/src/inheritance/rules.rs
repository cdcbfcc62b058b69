use super::{Genotype, Mode, PhenotypeClass};

/// Whether `genotype` produces an affected phenotype under `mode`.
///
/// - autosomal dominant: at least one `A` allele
/// - autosomal recessive: exactly `aa`
/// - X-linked dominant: at least one `X` allele
/// - X-linked recessive: a male with an `x`, or a female with `xx`
/// - Y-linked: every male
pub fn is_affected(genotype: &Genotype, mode: Mode) -> bool {
    match mode {
        Mode::AutosomalDominant => genotype.contains('A'),
        Mode::AutosomalRecessive => genotype.alleles() == ['a', 'a'],
        Mode::XLinkedDominant => genotype.contains('X'),
        Mode::XLinkedRecessive => {
            if genotype.is_male() {
                genotype.contains('x')
            } else {
                genotype.alleles() == ['x', 'x']
            }
        }
        Mode::YLinked => genotype.is_male(),
    }
}

/// The phenotype class `genotype` produces under `mode`.
pub fn phenotype_class(genotype: &Genotype, mode: Mode) -> PhenotypeClass {
    let affected = is_affected(genotype, mode);
    if mode.is_autosomal() {
        return if affected {
            PhenotypeClass::Affected
        } else {
            PhenotypeClass::Unaffected
        };
    }
    match (genotype.is_male(), affected) {
        (false, true) => PhenotypeClass::AffectedFemale,
        (false, false) => PhenotypeClass::UnaffectedFemale,
        (true, true) => PhenotypeClass::AffectedMale,
        (true, false) => PhenotypeClass::UnaffectedMale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inheritance::{
        AUTOSOMAL_GENOTYPES, FEMALE_SEX_LINKED_GENOTYPES, MALE_SEX_LINKED_GENOTYPES,
    };

    fn g(s: &str) -> Genotype {
        Genotype::new(s).unwrap()
    }

    fn all_genotypes() -> Vec<Genotype> {
        AUTOSOMAL_GENOTYPES
            .iter()
            .chain(FEMALE_SEX_LINKED_GENOTYPES.iter())
            .chain(MALE_SEX_LINKED_GENOTYPES.iter())
            .copied()
            .collect()
    }

    /// Table of (genotype, mode, expected class).
    fn expected_classes() -> Vec<(&'static str, Mode, &'static str)> {
        use Mode::*;
        vec![
            ("aa", AutosomalDominant, "fm"),
            ("aA", AutosomalDominant, "FM"),
            ("Aa", AutosomalDominant, "FM"),
            ("AA", AutosomalDominant, "FM"),
            ("aa", AutosomalRecessive, "FM"),
            ("aA", AutosomalRecessive, "fm"),
            ("Aa", AutosomalRecessive, "fm"),
            ("AA", AutosomalRecessive, "fm"),
            ("xx", XLinkedDominant, "f"),
            ("xX", XLinkedDominant, "F"),
            ("Xx", XLinkedDominant, "F"),
            ("XX", XLinkedDominant, "F"),
            ("xy", XLinkedDominant, "m"),
            ("xY", XLinkedDominant, "m"),
            ("Xy", XLinkedDominant, "M"),
            ("XY", XLinkedDominant, "M"),
            ("xx", XLinkedRecessive, "F"),
            ("xX", XLinkedRecessive, "f"),
            ("Xx", XLinkedRecessive, "f"),
            ("XX", XLinkedRecessive, "f"),
            ("xy", XLinkedRecessive, "M"),
            ("xY", XLinkedRecessive, "M"),
            ("Xy", XLinkedRecessive, "m"),
            ("XY", XLinkedRecessive, "m"),
            ("xx", YLinked, "f"),
            ("xX", YLinked, "f"),
            ("Xx", YLinked, "f"),
            ("XX", YLinked, "f"),
            ("xy", YLinked, "M"),
            ("xY", YLinked, "M"),
            ("Xy", YLinked, "M"),
            ("XY", YLinked, "M"),
        ]
    }

    #[test]
    fn test_phenotype_class_table() {
        for (genotype, mode, expected) in expected_classes() {
            assert_eq!(
                phenotype_class(&g(genotype), mode).symbol(),
                expected,
                "{} under {}",
                genotype,
                mode
            );
        }
    }

    #[test]
    fn test_affected_table() {
        for (genotype, mode, expected) in expected_classes() {
            let affected = expected.chars().any(|c| c.is_ascii_uppercase());
            assert_eq!(
                is_affected(&g(genotype), mode),
                affected,
                "{} under {}",
                genotype,
                mode
            );
        }
    }

    #[test]
    fn test_class_agrees_with_affected_for_every_mode() {
        for mode in Mode::ALL {
            for genotype in all_genotypes() {
                assert_eq!(
                    phenotype_class(&genotype, mode).is_affected(),
                    is_affected(&genotype, mode),
                    "{} under {}",
                    genotype,
                    mode
                );
            }
        }
    }

    #[test]
    fn test_sex_linked_class_follows_genotype_gender() {
        for mode in [Mode::XLinkedDominant, Mode::XLinkedRecessive, Mode::YLinked] {
            for genotype in FEMALE_SEX_LINKED_GENOTYPES {
                assert!(matches!(
                    phenotype_class(&genotype, mode),
                    PhenotypeClass::AffectedFemale | PhenotypeClass::UnaffectedFemale
                ));
            }
            for genotype in MALE_SEX_LINKED_GENOTYPES {
                assert!(matches!(
                    phenotype_class(&genotype, mode),
                    PhenotypeClass::AffectedMale | PhenotypeClass::UnaffectedMale
                ));
            }
        }
    }
}
