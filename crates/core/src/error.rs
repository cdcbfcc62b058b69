use thiserror::Error;

use crate::inheritance::Mode;

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("Invalid mode of inheritance: '{0}'")]
    InvalidMode(String),

    #[error("Invalid genotype: '{0}'")]
    InvalidGenotype(String),

    #[error("Invalid observation symbol: '{0}' (expected one of f, F, m, M)")]
    InvalidObservation(char),

    #[error("Non-Mendelian configuration: {0}")]
    NonMendelianConfiguration(String),

    #[error("No genotype under {mode} can produce {description}")]
    EmptyDomain { mode: Mode, description: String },

    #[error("Probability distribution has zero total mass")]
    ZeroMass,

    #[error("Non-Mendelian pattern: phenotype of {individual} is incompatible with {mode}")]
    NonMendelianPattern { individual: String, mode: Mode },

    #[error("Pedigree error: {0}")]
    Pedigree(String),

    #[error("Diagram error at line {line}, column {column}: {message}")]
    Diagram {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl InferenceError {
    /// Whether this error falsifies a mode hypothesis rather than signalling
    /// malformed input.
    pub fn is_non_mendelian(&self) -> bool {
        matches!(
            self,
            InferenceError::NonMendelianPattern { .. }
                | InferenceError::NonMendelianConfiguration(_)
                | InferenceError::EmptyDomain { .. }
                | InferenceError::ZeroMass
        )
    }
}

pub type Result<T> = std::result::Result<T, InferenceError>;
