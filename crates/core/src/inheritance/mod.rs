// Inheritance model: modes, genders, phenotypes and single-locus genotypes.

mod domain;
mod genotype;
mod rules;

use std::fmt;
use std::str::FromStr;

use crate::error::{InferenceError, Result};

pub use domain::genotype_possibilities;
pub use genotype::{
    Genotype, AUTOSOMAL_GENOTYPES, FEMALE_SEX_LINKED_GENOTYPES, MALE_SEX_LINKED_GENOTYPES,
};
pub use rules::{is_affected, phenotype_class};

/// A classical single-locus Mendelian mode of inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mode {
    AutosomalDominant,
    AutosomalRecessive,
    XLinkedDominant,
    XLinkedRecessive,
    YLinked,
}

impl Mode {
    /// Every supported mode, in a fixed order.
    pub const ALL: [Mode; 5] = [
        Mode::AutosomalDominant,
        Mode::AutosomalRecessive,
        Mode::XLinkedDominant,
        Mode::XLinkedRecessive,
        Mode::YLinked,
    ];

    /// Canonical kebab-case name, as accepted by [`Mode::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Mode::AutosomalDominant => "autosomal-dominant",
            Mode::AutosomalRecessive => "autosomal-recessive",
            Mode::XLinkedDominant => "x-linked-dominant",
            Mode::XLinkedRecessive => "x-linked-recessive",
            Mode::YLinked => "y-linked",
        }
    }

    /// Whether the locus sits on an autosome. Autosomal genotypes carry no
    /// information about gender.
    pub fn is_autosomal(self) -> bool {
        matches!(self, Mode::AutosomalDominant | Mode::AutosomalRecessive)
    }

    /// The allele whose presence drives the affected phenotype.
    pub fn affecting_allele(self) -> char {
        match self {
            Mode::AutosomalDominant => 'A',
            Mode::AutosomalRecessive => 'a',
            Mode::XLinkedDominant => 'X',
            Mode::XLinkedRecessive => 'x',
            Mode::YLinked => 'Y',
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = InferenceError;

    /// Parse a mode name. Case-insensitive; `_` and `-` are interchangeable
    /// and the short forms `ad`, `ar`, `xld`, `xlr`, `yl` are accepted.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "autosomal-dominant" | "ad" => Ok(Mode::AutosomalDominant),
            "autosomal-recessive" | "ar" => Ok(Mode::AutosomalRecessive),
            "x-linked-dominant" | "xld" => Ok(Mode::XLinkedDominant),
            "x-linked-recessive" | "xlr" => Ok(Mode::XLinkedRecessive),
            "y-linked" | "yl" => Ok(Mode::YLinked),
            _ => Err(InferenceError::InvalidMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Female,
    Male,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("female"),
            Gender::Male => f.write_str("male"),
        }
    }
}

/// What is observed about an individual: gender and affected status.
///
/// Written in pedigrees as a single symbol: `f`/`m` for unaffected
/// females/males and `F`/`M` for affected ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Phenotype {
    pub gender: Gender,
    pub affected: bool,
}

impl Phenotype {
    pub fn new(gender: Gender, affected: bool) -> Self {
        Self { gender, affected }
    }

    /// Decode a pedigree symbol.
    ///
    /// # Errors
    /// Returns [`InferenceError::InvalidObservation`] for anything other than
    /// `f`, `F`, `m` or `M`.
    pub fn from_symbol(symbol: char) -> Result<Self> {
        let gender = match symbol.to_ascii_lowercase() {
            'f' => Gender::Female,
            'm' => Gender::Male,
            _ => return Err(InferenceError::InvalidObservation(symbol)),
        };
        Ok(Self::new(gender, symbol.is_ascii_uppercase()))
    }

    pub fn symbol(&self) -> char {
        match (self.gender, self.affected) {
            (Gender::Female, false) => 'f',
            (Gender::Female, true) => 'F',
            (Gender::Male, false) => 'm',
            (Gender::Male, true) => 'M',
        }
    }

    /// Short English description, e.g. "an affected female".
    pub fn describe(&self) -> String {
        let status = if self.affected { "affected" } else { "unaffected" };
        format!("an {} {}", status, self.gender)
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The observable category a genotype produces under a mode.
///
/// Autosomal modes do not distinguish gender, so they yield
/// [`PhenotypeClass::Affected`] / [`PhenotypeClass::Unaffected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhenotypeClass {
    /// `F`
    AffectedFemale,
    /// `f`
    UnaffectedFemale,
    /// `M`
    AffectedMale,
    /// `m`
    UnaffectedMale,
    /// `FM`
    Affected,
    /// `fm`
    Unaffected,
}

impl PhenotypeClass {
    pub fn symbol(&self) -> &'static str {
        match self {
            PhenotypeClass::AffectedFemale => "F",
            PhenotypeClass::UnaffectedFemale => "f",
            PhenotypeClass::AffectedMale => "M",
            PhenotypeClass::UnaffectedMale => "m",
            PhenotypeClass::Affected => "FM",
            PhenotypeClass::Unaffected => "fm",
        }
    }

    pub fn is_affected(&self) -> bool {
        matches!(
            self,
            PhenotypeClass::AffectedFemale
                | PhenotypeClass::AffectedMale
                | PhenotypeClass::Affected
        )
    }

    /// Whether an individual observed as `observed` could belong to this
    /// class.
    pub fn admits(&self, observed: Phenotype) -> bool {
        if observed.affected != self.is_affected() {
            return false;
        }
        match self {
            PhenotypeClass::AffectedFemale | PhenotypeClass::UnaffectedFemale => {
                observed.gender == Gender::Female
            }
            PhenotypeClass::AffectedMale | PhenotypeClass::UnaffectedMale => {
                observed.gender == Gender::Male
            }
            PhenotypeClass::Affected | PhenotypeClass::Unaffected => true,
        }
    }
}

impl fmt::Display for PhenotypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
