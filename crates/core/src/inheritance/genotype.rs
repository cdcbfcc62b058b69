use std::fmt;
use std::str::FromStr;

use crate::error::{InferenceError, Result};

use super::Gender;

/// An ordered pair of alleles at one locus, maternal allele first.
///
/// Allele order is significant: `Aa` and `aA` are distinct genotypes, which
/// keeps punnet-square enumeration counts exact.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Genotype([u8; 2]);

/// The four autosomal genotypes. Valid for either gender.
pub const AUTOSOMAL_GENOTYPES: [Genotype; 4] = [
    Genotype(*b"AA"),
    Genotype(*b"Aa"),
    Genotype(*b"aA"),
    Genotype(*b"aa"),
];

/// Sex-chromosome genotypes of a female (two X chromosomes).
pub const FEMALE_SEX_LINKED_GENOTYPES: [Genotype; 4] = [
    Genotype(*b"XX"),
    Genotype(*b"Xx"),
    Genotype(*b"xX"),
    Genotype(*b"xx"),
];

/// Sex-chromosome genotypes of a male (one X, one Y chromosome).
pub const MALE_SEX_LINKED_GENOTYPES: [Genotype; 4] = [
    Genotype(*b"XY"),
    Genotype(*b"Xy"),
    Genotype(*b"xY"),
    Genotype(*b"xy"),
];

impl Genotype {
    /// Parse a two-allele genotype such as `"Aa"` or `"xY"`.
    ///
    /// The genotype must be one of [`AUTOSOMAL_GENOTYPES`],
    /// [`FEMALE_SEX_LINKED_GENOTYPES`] or [`MALE_SEX_LINKED_GENOTYPES`]. A
    /// male carries his X allele first.
    ///
    /// # Errors
    /// Returns [`InferenceError::InvalidGenotype`] otherwise.
    pub fn new(s: &str) -> Result<Self> {
        let known = AUTOSOMAL_GENOTYPES
            .iter()
            .chain(&FEMALE_SEX_LINKED_GENOTYPES)
            .chain(&MALE_SEX_LINKED_GENOTYPES)
            .find(|g| g.0.as_slice() == s.as_bytes());
        known
            .copied()
            .ok_or_else(|| InferenceError::InvalidGenotype(s.to_string()))
    }

    /// Join a maternal and a paternal allele taken from existing genotypes.
    pub(crate) fn from_alleles(maternal: u8, paternal: u8) -> Self {
        Self([maternal, paternal])
    }

    pub(crate) fn allele_bytes(&self) -> [u8; 2] {
        self.0
    }

    /// The two alleles, maternal first.
    pub fn alleles(&self) -> [char; 2] {
        [self.0[0] as char, self.0[1] as char]
    }

    /// Case-sensitive allele membership.
    pub fn contains(&self, allele: char) -> bool {
        self.alleles().contains(&allele)
    }

    /// A genotype belongs to a male when it carries a Y chromosome.
    pub fn is_male(&self) -> bool {
        self.0.iter().any(|b| b.eq_ignore_ascii_case(&b'y'))
    }

    /// Gender implied by the genotype itself. Autosomal genotypes report
    /// [`Gender::Female`] since they carry no Y.
    pub fn gender(&self) -> Gender {
        if self.is_male() {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.alleles();
        write!(f, "{}{}", a, b)
    }
}

impl fmt::Debug for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Genotype({})", self)
    }
}

impl FromStr for Genotype {
    type Err = InferenceError;

    fn from_str(s: &str) -> Result<Self> {
        Genotype::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for s in ["AA", "Aa", "aA", "aa", "XX", "xX", "Xy", "xY"] {
            assert_eq!(Genotype::new(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_allele_order_is_significant() {
        assert_ne!(Genotype::new("Aa").unwrap(), Genotype::new("aA").unwrap());
    }

    #[test]
    fn test_rejects_malformed() {
        for s in ["", "A", "AAA", "Ab", "Ax", "yA", "  "] {
            assert!(
                matches!(Genotype::new(s), Err(InferenceError::InvalidGenotype(_))),
                "'{}' should be rejected",
                s
            );
        }
    }

    #[test]
    fn test_rejects_sex_linked_pairs_outside_the_alphabets() {
        for s in ["YY", "yy", "yX", "Yx", "Yy", "yx"] {
            assert!(
                matches!(Genotype::new(s), Err(InferenceError::InvalidGenotype(_))),
                "'{}' should be rejected",
                s
            );
        }
    }

    #[test]
    fn test_gender_from_y_chromosome() {
        assert!(Genotype::new("xy").unwrap().is_male());
        assert!(Genotype::new("XY").unwrap().is_male());
        assert!(!Genotype::new("Xx").unwrap().is_male());
        assert_eq!(Genotype::new("xY").unwrap().gender(), Gender::Male);
        assert_eq!(Genotype::new("aa").unwrap().gender(), Gender::Female);
    }

    #[test]
    fn test_genotype_tables_match_gender() {
        assert!(FEMALE_SEX_LINKED_GENOTYPES.iter().all(|g| !g.is_male()));
        assert!(MALE_SEX_LINKED_GENOTYPES.iter().all(|g| g.is_male()));
        assert!(AUTOSOMAL_GENOTYPES.iter().all(|g| !g.is_male()));
    }
}
