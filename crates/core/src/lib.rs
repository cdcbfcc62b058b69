pub mod error;
pub mod inheritance;
pub mod pedigree;
pub mod probability;
pub mod propagation;
pub mod types;

pub use error::{InferenceError, Result};
pub use inheritance::{Gender, Genotype, Mode, Phenotype};
pub use pedigree::Pedigree;
pub use propagation::{
    compatible_modes, genotype_distribution, genotype_distributions, GenotypeReport,
};
